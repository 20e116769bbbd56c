//! API request and response types

use crate::models::{
    CustomInterval, DayOfWeek, HistoryEntryKind, MedicationForm, Recurrence, ReminderTarget,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

// ============================================================================
// Auth
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// User profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Profile update request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
}

// ============================================================================
// Medications
// ============================================================================

/// Create medication request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMedicationRequest {
    pub name: String,
    pub dosage: String,
    #[serde(default)]
    pub form: MedicationForm,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Update medication request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMedicationRequest {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub form: Option<MedicationForm>,
    pub notes: Option<String>,
}

/// Medication response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationResponse {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub form: MedicationForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_inactive: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Medication list query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicationListQuery {
    /// Include soft-deleted medications in the listing
    #[serde(default)]
    pub include_inactive: bool,
}

/// Medication list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationListResponse {
    pub items: Vec<MedicationResponse>,
}

// ============================================================================
// Reminders
// ============================================================================

/// Reminder target kind on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderType {
    Medication,
    Observation,
}

/// Repeat mode discriminant on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepeatMode {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom,
}

/// Create reminder request
///
/// The wire shape is flat (a repeat mode plus optional mode-specific
/// fields, mirroring the persisted documents); it is converted into the
/// typed [`Recurrence`] union here, at the boundary, so everything past
/// this point works with valid combinations only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReminderRequest {
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    #[serde(default)]
    pub medication_id: Option<Uuid>,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub time: NaiveTime,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub repeat_mode: RepeatMode,
    #[serde(default)]
    pub days_of_week: Vec<DayOfWeek>,
    /// Anchor date for MONTHLY (day of month) and YEARLY (month + day)
    #[serde(default)]
    pub specific_date: Option<NaiveDate>,
    #[serde(default)]
    pub interval_days: Option<u32>,
    #[serde(default)]
    pub interval_hours: Option<u32>,
    #[serde(default)]
    pub interval_minutes: Option<u32>,
}

impl CreateReminderRequest {
    /// Build the typed recurrence from the flat wire fields
    pub fn recurrence(&self) -> Result<Recurrence, String> {
        build_recurrence(
            self.repeat_mode,
            &self.days_of_week,
            self.specific_date,
            self.interval_days,
            self.interval_hours,
            self.interval_minutes,
        )
    }

    /// Build the typed target from the wire type + medication id
    pub fn target(&self) -> Result<ReminderTarget, String> {
        match (self.reminder_type, self.medication_id) {
            (ReminderType::Medication, Some(medication_id)) => {
                Ok(ReminderTarget::Medication { medication_id })
            }
            (ReminderType::Medication, None) => {
                Err("Medication reminders require a medication_id".to_string())
            }
            (ReminderType::Observation, _) => Ok(ReminderTarget::Observation),
        }
    }
}

/// Convert flat repeat-mode fields into the tagged recurrence union
pub fn build_recurrence(
    repeat_mode: RepeatMode,
    days_of_week: &[DayOfWeek],
    specific_date: Option<NaiveDate>,
    interval_days: Option<u32>,
    interval_hours: Option<u32>,
    interval_minutes: Option<u32>,
) -> Result<Recurrence, String> {
    use chrono::Datelike;

    let recurrence = match repeat_mode {
        RepeatMode::Daily => Recurrence::Daily,
        RepeatMode::Weekly => Recurrence::Weekly {
            days_of_week: days_of_week.iter().copied().collect::<BTreeSet<_>>(),
        },
        RepeatMode::Monthly => {
            let anchor = specific_date
                .ok_or_else(|| "Monthly reminders require a specific_date anchor".to_string())?;
            Recurrence::Monthly {
                day_of_month: anchor.day(),
            }
        }
        RepeatMode::Yearly => {
            let anchor = specific_date
                .ok_or_else(|| "Yearly reminders require a specific_date anchor".to_string())?;
            Recurrence::Yearly {
                month: anchor.month(),
                day: anchor.day(),
            }
        }
        RepeatMode::Custom => Recurrence::Custom {
            interval: CustomInterval {
                days: interval_days.unwrap_or(0),
                hours: interval_hours.unwrap_or(0),
                minutes: interval_minutes.unwrap_or(0),
            },
        },
    };
    recurrence.check()?;
    Ok(recurrence)
}

/// Update reminder request; absent fields are left unchanged
///
/// When `repeat_mode` is present the recurrence is rebuilt from the
/// accompanying mode-specific fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReminderRequest {
    pub label: Option<String>,
    pub description: Option<String>,
    pub time: Option<NaiveTime>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub repeat_mode: Option<RepeatMode>,
    #[serde(default)]
    pub days_of_week: Vec<DayOfWeek>,
    pub specific_date: Option<NaiveDate>,
    pub interval_days: Option<u32>,
    pub interval_hours: Option<u32>,
    pub interval_minutes: Option<u32>,
}

impl UpdateReminderRequest {
    /// The replacement recurrence, if the update re-specifies one
    pub fn recurrence(&self) -> Result<Option<Recurrence>, String> {
        match self.repeat_mode {
            None => Ok(None),
            Some(mode) => build_recurrence(
                mode,
                &self.days_of_week,
                self.specific_date,
                self.interval_days,
                self.interval_hours,
                self.interval_minutes,
            )
            .map(Some),
        }
    }
}

/// Reminder response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub id: String,
    #[serde(flatten)]
    pub target: ReminderTarget,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub time: NaiveTime,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub recurrence: Recurrence,
    pub is_active: bool,
    /// Next time this reminder fires, if the recurrence has not ended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_occurrence: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reminder list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderListResponse {
    pub items: Vec<ReminderResponse>,
}

// ============================================================================
// Schedule
// ============================================================================

/// Query window for schedule resolution, `[from, to)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// One resolved occurrence of a reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub reminder_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_id: Option<String>,
    pub occurs_at: DateTime<Utc>,
}

/// Resolved schedule over a query window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub items: Vec<ScheduleItem>,
}

// ============================================================================
// History
// ============================================================================

/// Create history entry request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHistoryEntryRequest {
    #[serde(rename = "type")]
    pub kind: HistoryEntryKind,
    #[serde(default)]
    pub medication_id: Option<Uuid>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub observation: Option<String>,
    #[serde(default)]
    pub reminder_id: Option<Uuid>,
    #[serde(default = "Utc::now")]
    pub taken_at: DateTime<Utc>,
}

/// Update history entry request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateHistoryEntryRequest {
    pub taken_at: Option<DateTime<Utc>>,
    pub medication_id: Option<Uuid>,
    pub dosage: Option<String>,
    pub observation: Option<String>,
}

/// History entry response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HistoryEntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_id: Option<String>,
    /// Resolved from the medication catalog for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_id: Option<String>,
    pub taken_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// History list query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryListQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Normalized pagination for history listings
#[derive(Debug, Clone, Copy)]
pub struct HistoryPage {
    pub limit: i64,
    pub offset: i64,
}

impl HistoryListQuery {
    /// Clamp pagination to sane bounds (default 50, max 100)
    pub fn page(&self) -> HistoryPage {
        HistoryPage {
            limit: self.limit.unwrap_or(50).clamp(1, 100),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

/// History list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryListResponse {
    pub items: Vec<HistoryEntryResponse>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

// ============================================================================
// Statistics
// ============================================================================

/// Adherence statistics query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdherenceQuery {
    /// Trailing window in days; the server default applies when absent
    pub days: Option<u32>,
}

/// Adherence figures for one medication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationAdherence {
    pub medication_id: String,
    pub medication_name: String,
    /// Doses logged in the window
    pub doses_taken: i64,
    /// Occurrences scheduled by the user's reminders in the window
    pub doses_scheduled: i64,
    /// taken / scheduled, absent when nothing was scheduled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adherence_percent: Option<f64>,
}

/// Adherence statistics response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdherenceStatsResponse {
    pub window_days: u32,
    pub since: DateTime<Utc>,
    pub items: Vec<MedicationAdherence>,
}
