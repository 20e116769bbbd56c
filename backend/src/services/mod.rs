//! Business logic services
//!
//! Services validate input, enforce ownership and cross-entity
//! invariants, and translate between wire DTOs and persisted models.
//! Handlers stay thin; repositories stay dumb.

pub mod history;
pub mod medications;
pub mod reminders;
pub mod schedule;
pub mod stats;
pub mod user;

pub use history::HistoryService;
pub use medications::MedicationService;
pub use reminders::ReminderService;
pub use schedule::ScheduleService;
pub use stats::StatsService;
pub use user::UserService;
