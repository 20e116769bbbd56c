//! Document store repositories
//!
//! Typed data access over the [`DocumentStore`](crate::store::DocumentStore)
//! boundary. Collection names match the documents the mobile client
//! already persists.

pub mod history;
pub mod medications;
pub mod reminders;
pub mod users;

pub use history::{CreateHistoryEntry, HistoryRepository};
pub use medications::{CreateMedication, MedicationRepository, UpdateMedication};
pub use reminders::{CreateReminder, ReminderRepository};
pub use users::UserRepository;
