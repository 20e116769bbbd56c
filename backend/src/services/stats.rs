//! Adherence statistics
//!
//! Compares doses actually logged against doses the user's reminders
//! scheduled over a trailing window, per medication.

use crate::error::{ApiError, ApiResult};
use crate::repositories::{HistoryRepository, MedicationRepository, ReminderRepository};
use crate::store::DocumentStore;
use chrono::{DateTime, Duration, Utc};
use medtrack_shared::recurrence::occurrences;
use medtrack_shared::types::{AdherenceStatsResponse, MedicationAdherence};
use medtrack_shared::validation;
use std::collections::HashMap;
use uuid::Uuid;

/// Adherence statistics service
pub struct StatsService;

impl StatsService {
    /// Per-medication adherence over the trailing `window_days` ending
    /// at `now`
    pub async fn adherence(
        store: &dyn DocumentStore,
        user_id: Uuid,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> ApiResult<AdherenceStatsResponse> {
        validation::validate_stats_window_days(window_days).map_err(ApiError::Validation)?;
        let since = now - Duration::days(i64::from(window_days));

        let medications = MedicationRepository::list(store, user_id, false).await?;
        let reminders = ReminderRepository::list_active(store, user_id).await?;
        let doses = HistoryRepository::doses_since(store, user_id, since).await?;

        let mut taken: HashMap<Uuid, i64> = HashMap::new();
        for dose in &doses {
            if let Some(medication_id) = dose.medication_id {
                *taken.entry(medication_id).or_default() += 1;
            }
        }

        let mut scheduled: HashMap<Uuid, i64> = HashMap::new();
        for reminder in &reminders {
            if let Some(medication_id) = reminder.medication_id() {
                let count = occurrences(reminder, since, now)?.len() as i64;
                *scheduled.entry(medication_id).or_default() += count;
            }
        }

        let items = medications
            .into_iter()
            .map(|medication| {
                let doses_taken = taken.get(&medication.id).copied().unwrap_or(0);
                let doses_scheduled = scheduled.get(&medication.id).copied().unwrap_or(0);
                let adherence_percent = (doses_scheduled > 0)
                    .then(|| 100.0 * doses_taken as f64 / doses_scheduled as f64);
                MedicationAdherence {
                    medication_id: medication.id.to_string(),
                    medication_name: medication.name,
                    doses_taken,
                    doses_scheduled,
                    adherence_percent,
                }
            })
            .collect();

        Ok(AdherenceStatsResponse {
            window_days,
            since,
            items,
        })
    }
}
