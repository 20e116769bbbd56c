//! Schedule resolution service
//!
//! Expands recurrence rules into concrete occurrences over a half-open
//! `[from, to)` window, either for one reminder or merged across all of
//! a user's active reminders.

use crate::error::{ApiError, ApiResult};
use crate::repositories::ReminderRepository;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use medtrack_shared::models::Reminder;
use medtrack_shared::recurrence::occurrences;
use medtrack_shared::types::{ScheduleItem, ScheduleResponse};
use uuid::Uuid;

/// Schedule resolution service
pub struct ScheduleService;

impl ScheduleService {
    /// Resolve a single reminder's occurrences in `[from, to)`
    pub async fn for_reminder(
        store: &dyn DocumentStore,
        user_id: Uuid,
        reminder_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ApiResult<ScheduleResponse> {
        let reminder = ReminderRepository::get_by_id(store, reminder_id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Reminder not found".to_string()))?;

        let items = Self::expand(&reminder, from, to)?;
        Ok(ScheduleResponse { from, to, items })
    }

    /// Resolve all active reminders into one merged, time-ordered schedule
    pub async fn for_user(
        store: &dyn DocumentStore,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ApiResult<ScheduleResponse> {
        let reminders = ReminderRepository::list_active(store, user_id).await?;

        let mut items = Vec::new();
        for reminder in &reminders {
            items.extend(Self::expand(reminder, from, to)?);
        }
        // Stable sort keeps same-instant occurrences in listing order
        items.sort_by_key(|item| item.occurs_at);

        Ok(ScheduleResponse { from, to, items })
    }

    fn expand(
        reminder: &Reminder,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ApiResult<Vec<ScheduleItem>> {
        let times = occurrences(reminder, from, to)?;
        Ok(times
            .into_iter()
            .map(|occurs_at| ScheduleItem {
                reminder_id: reminder.id.to_string(),
                label: reminder.label.clone(),
                medication_id: reminder.medication_id().map(|id| id.to_string()),
                occurs_at,
            })
            .collect())
    }
}
