//! Data models for the MedTrack application

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Never exposed to clients; API responses use `UserProfile`
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Day of week for weekly recurrences
///
/// Stored as uppercase names in persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Convert to the chrono weekday used for date arithmetic
    pub fn weekday(self) -> Weekday {
        match self {
            DayOfWeek::Sunday => Weekday::Sun,
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

/// Interval between occurrences of a custom recurrence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomInterval {
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
}

impl CustomInterval {
    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0
    }

    pub fn total_seconds(&self) -> i64 {
        self.days as i64 * 86_400 + self.hours as i64 * 3_600 + self.minutes as i64 * 60
    }

    pub fn as_duration(&self) -> Duration {
        Duration::seconds(self.total_seconds())
    }
}

/// Recurrence pattern of a reminder
///
/// Modeled as a tagged union so that mode-dependent fields (weekly day
/// set, monthly/yearly anchor, custom interval) cannot be combined
/// inconsistently. The tag matches the `repeat_mode` field of persisted
/// documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "repeat_mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recurrence {
    Daily,
    Weekly { days_of_week: BTreeSet<DayOfWeek> },
    Monthly { day_of_month: u32 },
    Yearly { month: u32, day: u32 },
    Custom { interval: CustomInterval },
}

impl Recurrence {
    /// Check the structural invariants that make a recurrence resolvable
    pub fn check(&self) -> Result<(), String> {
        match self {
            Recurrence::Daily => Ok(()),
            Recurrence::Weekly { days_of_week } => {
                if days_of_week.is_empty() {
                    Err("Weekly recurrence requires at least one day of week".to_string())
                } else {
                    Ok(())
                }
            }
            Recurrence::Monthly { day_of_month } => {
                if !(1..=31).contains(day_of_month) {
                    Err("Monthly recurrence day must be between 1 and 31".to_string())
                } else {
                    Ok(())
                }
            }
            Recurrence::Yearly { month, day } => {
                // Validate against a leap year so Feb 29 anchors are allowed
                if NaiveDate::from_ymd_opt(2000, *month, *day).is_none() {
                    Err("Yearly recurrence month/day is not a valid calendar date".to_string())
                } else {
                    Ok(())
                }
            }
            Recurrence::Custom { interval } => {
                if interval.is_zero() {
                    Err("Custom recurrence interval must be positive".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// What a reminder prompts for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderTarget {
    Medication { medication_id: Uuid },
    Observation,
}

/// A user-defined recurring prompt to take a medication or record an
/// observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub target: ReminderTarget,
    pub label: String,
    pub description: Option<String>,
    /// Wall-clock time of day the reminder fires (UTC)
    pub time: NaiveTime,
    /// First date on which the recurrence is active
    pub start_date: NaiveDate,
    /// Last date on which the recurrence is active; unbounded if absent
    pub end_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub recurrence: Recurrence,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reminder {
    /// Medication referenced by this reminder, if it targets one
    pub fn medication_id(&self) -> Option<Uuid> {
        match self.target {
            ReminderTarget::Medication { medication_id } => Some(medication_id),
            ReminderTarget::Observation => None,
        }
    }
}

/// Dosage form classification of a medication
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicationForm {
    #[default]
    Tablet,
    Capsule,
    Liquid,
    Injection,
    Topical,
    Other,
}

/// User-owned medication catalog entry
///
/// Medications are never hard-deleted; `is_inactive` hides them from
/// active lists so history entries keep resolving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub dosage: String,
    pub form: MedicationForm,
    pub notes: Option<String>,
    pub is_inactive: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Kind of history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryEntryKind {
    Medication,
    Observation,
}

/// Logged record of a dose taken or an observation made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: HistoryEntryKind,
    pub medication_id: Option<Uuid>,
    pub dosage: Option<String>,
    pub observation: Option<String>,
    /// Reminder that triggered this entry, when logged from a notification
    pub reminder_id: Option<Uuid>,
    pub taken_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
