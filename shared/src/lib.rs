//! MedTrack Shared Library
//!
//! This crate contains the domain types, the recurrence resolver, and
//! validation utilities shared by the backend and the WASM bindings.

pub mod models;
pub mod recurrence;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use models::{
    CustomInterval, DayOfWeek, HistoryEntry, HistoryEntryKind, Medication, MedicationForm,
    Recurrence, Reminder, ReminderTarget, User,
};
pub use recurrence::{next_occurrence, occurrences, RecurrenceError};
