//! Medication catalog service

use crate::error::{ApiError, ApiResult};
use crate::repositories::{CreateMedication, MedicationRepository, UpdateMedication};
use crate::store::DocumentStore;
use medtrack_shared::models::Medication;
use medtrack_shared::types::{
    CreateMedicationRequest, MedicationListResponse, MedicationResponse, UpdateMedicationRequest,
};
use medtrack_shared::validation;
use uuid::Uuid;

/// Medication catalog service
pub struct MedicationService;

impl MedicationService {
    pub async fn create(
        store: &dyn DocumentStore,
        user_id: Uuid,
        request: CreateMedicationRequest,
    ) -> ApiResult<MedicationResponse> {
        validation::validate_label(&request.name).map_err(ApiError::Validation)?;
        validation::validate_dosage(&request.dosage).map_err(ApiError::Validation)?;
        if let Some(notes) = &request.notes {
            validation::validate_free_text(notes).map_err(ApiError::Validation)?;
        }

        let medication = MedicationRepository::create(
            store,
            CreateMedication {
                user_id,
                name: request.name,
                dosage: request.dosage,
                form: request.form,
                notes: request.notes,
            },
        )
        .await?;
        Ok(Self::to_response(medication))
    }

    pub async fn get(
        store: &dyn DocumentStore,
        user_id: Uuid,
        id: Uuid,
    ) -> ApiResult<MedicationResponse> {
        let medication = MedicationRepository::get_by_id(store, id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Medication not found".to_string()))?;
        Ok(Self::to_response(medication))
    }

    pub async fn list(
        store: &dyn DocumentStore,
        user_id: Uuid,
        include_inactive: bool,
    ) -> ApiResult<MedicationListResponse> {
        let medications = MedicationRepository::list(store, user_id, include_inactive).await?;
        Ok(MedicationListResponse {
            items: medications.into_iter().map(Self::to_response).collect(),
        })
    }

    pub async fn update(
        store: &dyn DocumentStore,
        user_id: Uuid,
        id: Uuid,
        request: UpdateMedicationRequest,
    ) -> ApiResult<MedicationResponse> {
        if let Some(name) = &request.name {
            validation::validate_label(name).map_err(ApiError::Validation)?;
        }
        if let Some(dosage) = &request.dosage {
            validation::validate_dosage(dosage).map_err(ApiError::Validation)?;
        }
        if let Some(notes) = &request.notes {
            validation::validate_free_text(notes).map_err(ApiError::Validation)?;
        }

        let medication = MedicationRepository::update(
            store,
            id,
            user_id,
            UpdateMedication {
                name: request.name,
                dosage: request.dosage,
                form: request.form,
                notes: request.notes,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Medication not found".to_string()))?;
        Ok(Self::to_response(medication))
    }

    /// Soft-delete; history entries keep resolving the medication name
    pub async fn deactivate(
        store: &dyn DocumentStore,
        user_id: Uuid,
        id: Uuid,
    ) -> ApiResult<MedicationResponse> {
        let medication = MedicationRepository::set_inactive(store, id, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Medication not found".to_string()))?;
        Ok(Self::to_response(medication))
    }

    fn to_response(medication: Medication) -> MedicationResponse {
        MedicationResponse {
            id: medication.id.to_string(),
            name: medication.name,
            dosage: medication.dosage,
            form: medication.form,
            notes: medication.notes,
            is_inactive: medication.is_inactive,
            created_at: medication.created_at,
            updated_at: medication.updated_at,
        }
    }
}
