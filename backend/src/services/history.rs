//! History service
//!
//! Dose and observation logging. The two entry kinds carry different
//! required fields, checked here before anything is stored.

use crate::error::{ApiError, ApiResult};
use crate::repositories::{
    CreateHistoryEntry, HistoryRepository, MedicationRepository, ReminderRepository,
};
use crate::store::DocumentStore;
use medtrack_shared::models::{HistoryEntry, HistoryEntryKind};
use medtrack_shared::types::{
    CreateHistoryEntryRequest, HistoryEntryResponse, HistoryListQuery, HistoryListResponse,
    UpdateHistoryEntryRequest,
};
use medtrack_shared::validation;
use std::collections::HashMap;
use uuid::Uuid;

/// History service
pub struct HistoryService;

impl HistoryService {
    pub async fn create(
        store: &dyn DocumentStore,
        user_id: Uuid,
        request: CreateHistoryEntryRequest,
    ) -> ApiResult<HistoryEntryResponse> {
        match request.kind {
            HistoryEntryKind::Medication => {
                let medication_id = request.medication_id.ok_or_else(|| {
                    ApiError::Validation("Medication entries require a medication_id".to_string())
                })?;
                // The medication must exist and belong to the user;
                // inactive medications are fine, late logging happens
                MedicationRepository::get_by_id(store, medication_id, user_id)
                    .await?
                    .ok_or_else(|| ApiError::NotFound("Medication not found".to_string()))?;
                if let Some(dosage) = &request.dosage {
                    validation::validate_dosage(dosage).map_err(ApiError::Validation)?;
                }
            }
            HistoryEntryKind::Observation => {
                let observation = request.observation.as_deref().ok_or_else(|| {
                    ApiError::Validation("Observation entries require an observation".to_string())
                })?;
                validation::validate_observation(observation).map_err(ApiError::Validation)?;
            }
        }

        if let Some(reminder_id) = request.reminder_id {
            ReminderRepository::get_by_id(store, reminder_id, user_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Reminder not found".to_string()))?;
        }

        let entry = HistoryRepository::create(
            store,
            CreateHistoryEntry {
                user_id,
                kind: request.kind,
                medication_id: request.medication_id,
                dosage: request.dosage,
                observation: request.observation,
                reminder_id: request.reminder_id,
                taken_at: request.taken_at,
            },
        )
        .await?;
        Ok(Self::to_response(entry, None))
    }

    pub async fn get(
        store: &dyn DocumentStore,
        user_id: Uuid,
        id: Uuid,
    ) -> ApiResult<HistoryEntryResponse> {
        let entry = HistoryRepository::get_by_id(store, id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("History entry not found".to_string()))?;
        let name = Self::medication_name(store, user_id, &entry).await?;
        Ok(Self::to_response(entry, name))
    }

    pub async fn list(
        store: &dyn DocumentStore,
        user_id: Uuid,
        query: HistoryListQuery,
    ) -> ApiResult<HistoryListResponse> {
        if let (Some(start), Some(end)) = (query.start, query.end) {
            if start > end {
                return Err(ApiError::BadRequest(
                    "start must not be later than end".to_string(),
                ));
            }
        }

        let page = query.page();
        let (entries, total_count) = HistoryRepository::list_range(
            store,
            user_id,
            query.start,
            query.end,
            page.limit,
            page.offset,
        )
        .await?;

        // One catalog pass resolves every medication name on the page
        let names: HashMap<Uuid, String> = MedicationRepository::list(store, user_id, true)
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        let items: Vec<HistoryEntryResponse> = entries
            .into_iter()
            .map(|entry| {
                let name = entry
                    .medication_id
                    .and_then(|id| names.get(&id).cloned());
                Self::to_response(entry, name)
            })
            .collect();

        let has_more = page.offset + (items.len() as i64) < total_count;
        Ok(HistoryListResponse {
            items,
            total_count,
            limit: page.limit,
            offset: page.offset,
            has_more,
        })
    }

    pub async fn update(
        store: &dyn DocumentStore,
        user_id: Uuid,
        id: Uuid,
        request: UpdateHistoryEntryRequest,
    ) -> ApiResult<HistoryEntryResponse> {
        let mut entry = HistoryRepository::get_by_id(store, id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("History entry not found".to_string()))?;

        if let Some(taken_at) = request.taken_at {
            entry.taken_at = taken_at;
        }
        if let Some(medication_id) = request.medication_id {
            if entry.kind != HistoryEntryKind::Medication {
                return Err(ApiError::Validation(
                    "Only medication entries carry a medication_id".to_string(),
                ));
            }
            MedicationRepository::get_by_id(store, medication_id, user_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Medication not found".to_string()))?;
            entry.medication_id = Some(medication_id);
        }
        if let Some(dosage) = request.dosage {
            validation::validate_dosage(&dosage).map_err(ApiError::Validation)?;
            entry.dosage = Some(dosage);
        }
        if let Some(observation) = request.observation {
            validation::validate_observation(&observation).map_err(ApiError::Validation)?;
            entry.observation = Some(observation);
        }

        HistoryRepository::save(store, &entry).await?;
        let name = Self::medication_name(store, user_id, &entry).await?;
        Ok(Self::to_response(entry, name))
    }

    pub async fn delete(store: &dyn DocumentStore, user_id: Uuid, id: Uuid) -> ApiResult<()> {
        if !HistoryRepository::delete(store, id, user_id).await? {
            return Err(ApiError::NotFound("History entry not found".to_string()));
        }
        Ok(())
    }

    async fn medication_name(
        store: &dyn DocumentStore,
        user_id: Uuid,
        entry: &HistoryEntry,
    ) -> ApiResult<Option<String>> {
        match entry.medication_id {
            Some(id) => Ok(MedicationRepository::get_by_id(store, id, user_id)
                .await?
                .map(|m| m.name)),
            None => Ok(None),
        }
    }

    fn to_response(entry: HistoryEntry, medication_name: Option<String>) -> HistoryEntryResponse {
        HistoryEntryResponse {
            id: entry.id.to_string(),
            kind: entry.kind,
            medication_id: entry.medication_id.map(|id| id.to_string()),
            medication_name,
            dosage: entry.dosage,
            observation: entry.observation,
            reminder_id: entry.reminder_id.map(|id| id.to_string()),
            taken_at: entry.taken_at,
            created_at: entry.created_at,
        }
    }
}
