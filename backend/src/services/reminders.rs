//! Reminder service
//!
//! Enforces the cross-entity invariants: a medication reminder must
//! point at a medication the user owns that is still active, and the
//! recurrence must be well-formed before anything is persisted.

use crate::error::{ApiError, ApiResult};
use crate::repositories::{CreateReminder, MedicationRepository, ReminderRepository};
use crate::store::DocumentStore;
use chrono::Utc;
use medtrack_shared::models::{Reminder, ReminderTarget};
use medtrack_shared::recurrence::next_occurrence;
use medtrack_shared::types::{
    CreateReminderRequest, ReminderListResponse, ReminderResponse, UpdateReminderRequest,
};
use medtrack_shared::validation;
use uuid::Uuid;

/// Reminder service
pub struct ReminderService;

impl ReminderService {
    pub async fn create(
        store: &dyn DocumentStore,
        user_id: Uuid,
        request: CreateReminderRequest,
    ) -> ApiResult<ReminderResponse> {
        validation::validate_label(&request.label).map_err(ApiError::Validation)?;
        if let Some(description) = &request.description {
            validation::validate_free_text(description).map_err(ApiError::Validation)?;
        }
        validation::validate_date_range(request.start_date, request.end_date)
            .map_err(ApiError::Validation)?;

        let target = request.target().map_err(ApiError::Validation)?;
        let recurrence = request.recurrence().map_err(ApiError::Validation)?;

        Self::check_target(store, user_id, &target).await?;

        let reminder = ReminderRepository::create(
            store,
            CreateReminder {
                user_id,
                target,
                label: request.label,
                description: request.description,
                time: request.time,
                start_date: request.start_date,
                end_date: request.end_date,
                recurrence,
            },
        )
        .await?;
        Self::to_response(reminder)
    }

    pub async fn get(
        store: &dyn DocumentStore,
        user_id: Uuid,
        id: Uuid,
    ) -> ApiResult<ReminderResponse> {
        let reminder = ReminderRepository::get_by_id(store, id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Reminder not found".to_string()))?;
        Self::to_response(reminder)
    }

    pub async fn list(store: &dyn DocumentStore, user_id: Uuid) -> ApiResult<ReminderListResponse> {
        let reminders = ReminderRepository::list(store, user_id).await?;
        let items = reminders
            .into_iter()
            .map(Self::to_response)
            .collect::<ApiResult<Vec<_>>>()?;
        Ok(ReminderListResponse { items })
    }

    pub async fn update(
        store: &dyn DocumentStore,
        user_id: Uuid,
        id: Uuid,
        request: UpdateReminderRequest,
    ) -> ApiResult<ReminderResponse> {
        let mut reminder = ReminderRepository::get_by_id(store, id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Reminder not found".to_string()))?;

        if let Some(label) = request.label.clone() {
            validation::validate_label(&label).map_err(ApiError::Validation)?;
            reminder.label = label;
        }
        if let Some(description) = request.description.clone() {
            validation::validate_free_text(&description).map_err(ApiError::Validation)?;
            reminder.description = Some(description);
        }
        if let Some(time) = request.time {
            reminder.time = time;
        }
        if let Some(start_date) = request.start_date {
            reminder.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            reminder.end_date = Some(end_date);
        }
        if let Some(is_active) = request.is_active {
            reminder.is_active = is_active;
        }
        if let Some(recurrence) = request.recurrence().map_err(ApiError::Validation)? {
            reminder.recurrence = recurrence;
        }

        validation::validate_date_range(reminder.start_date, reminder.end_date)
            .map_err(ApiError::Validation)?;

        reminder.updated_at = Utc::now();
        ReminderRepository::save(store, &reminder).await?;
        Self::to_response(reminder)
    }

    pub async fn delete(store: &dyn DocumentStore, user_id: Uuid, id: Uuid) -> ApiResult<()> {
        if !ReminderRepository::delete(store, id, user_id).await? {
            return Err(ApiError::NotFound("Reminder not found".to_string()));
        }
        Ok(())
    }

    async fn check_target(
        store: &dyn DocumentStore,
        user_id: Uuid,
        target: &ReminderTarget,
    ) -> ApiResult<()> {
        if let ReminderTarget::Medication { medication_id } = target {
            let medication = MedicationRepository::get_by_id(store, *medication_id, user_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Medication not found".to_string()))?;
            if medication.is_inactive {
                return Err(ApiError::Validation(
                    "Cannot create a reminder for an inactive medication".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn to_response(reminder: Reminder) -> ApiResult<ReminderResponse> {
        let next = next_occurrence(&reminder, Utc::now())?;
        Ok(ReminderResponse {
            id: reminder.id.to_string(),
            target: reminder.target,
            label: reminder.label,
            description: reminder.description,
            time: reminder.time,
            start_date: reminder.start_date,
            end_date: reminder.end_date,
            recurrence: reminder.recurrence,
            is_active: reminder.is_active,
            next_occurrence: next,
            created_at: reminder.created_at,
            updated_at: reminder.updated_at,
        })
    }
}
