//! Medication repository
//!
//! Medications are soft-deleted only: `is_inactive` hides them from
//! active listings while history entries keep resolving their names.

use crate::store::{DocumentStore, Filter};
use anyhow::Result;
use chrono::Utc;
use medtrack_shared::models::{Medication, MedicationForm};
use serde_json::json;
use uuid::Uuid;

const COLLECTION: &str = "usersMedication";

/// Input for creating a medication
#[derive(Debug, Clone)]
pub struct CreateMedication {
    pub user_id: Uuid,
    pub name: String,
    pub dosage: String,
    pub form: MedicationForm,
    pub notes: Option<String>,
}

/// Input for updating a medication
#[derive(Debug, Clone, Default)]
pub struct UpdateMedication {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub form: Option<MedicationForm>,
    pub notes: Option<String>,
}

/// Medication repository
pub struct MedicationRepository;

impl MedicationRepository {
    /// Create a new medication
    pub async fn create(store: &dyn DocumentStore, input: CreateMedication) -> Result<Medication> {
        let now = Utc::now();
        let medication = Medication {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            name: input.name,
            dosage: input.dosage,
            form: input.form,
            notes: input.notes,
            is_inactive: false,
            created_at: now,
            updated_at: now,
        };
        store
            .insert(
                COLLECTION,
                &medication.id.to_string(),
                serde_json::to_value(&medication)?,
            )
            .await?;
        Ok(medication)
    }

    /// Get a medication by id, scoped to its owner
    pub async fn get_by_id(
        store: &dyn DocumentStore,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Medication>> {
        match store.get(COLLECTION, &id.to_string()).await? {
            Some(doc) => {
                let medication: Medication = serde_json::from_value(doc.data)?;
                Ok((medication.user_id == user_id).then_some(medication))
            }
            None => Ok(None),
        }
    }

    /// List a user's medications, newest first
    pub async fn list(
        store: &dyn DocumentStore,
        user_id: Uuid,
        include_inactive: bool,
    ) -> Result<Vec<Medication>> {
        let mut filter = Filter::new().eq("user_id", json!(user_id));
        if !include_inactive {
            filter = filter.eq("is_inactive", false);
        }
        let docs = store.find(COLLECTION, &filter).await?;
        let mut medications = docs
            .into_iter()
            .map(|doc| serde_json::from_value(doc.data))
            .collect::<Result<Vec<Medication>, _>>()?;
        medications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(medications)
    }

    /// Apply a partial update; returns None when the medication does not
    /// exist or belongs to another user
    pub async fn update(
        store: &dyn DocumentStore,
        id: Uuid,
        user_id: Uuid,
        input: UpdateMedication,
    ) -> Result<Option<Medication>> {
        let Some(mut medication) = Self::get_by_id(store, id, user_id).await? else {
            return Ok(None);
        };
        if let Some(name) = input.name {
            medication.name = name;
        }
        if let Some(dosage) = input.dosage {
            medication.dosage = dosage;
        }
        if let Some(form) = input.form {
            medication.form = form;
        }
        if let Some(notes) = input.notes {
            medication.notes = Some(notes);
        }
        medication.updated_at = Utc::now();
        store
            .update(
                COLLECTION,
                &id.to_string(),
                serde_json::to_value(&medication)?,
            )
            .await?;
        Ok(Some(medication))
    }

    /// Soft-delete: mark the medication inactive
    pub async fn set_inactive(
        store: &dyn DocumentStore,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Medication>> {
        let Some(mut medication) = Self::get_by_id(store, id, user_id).await? else {
            return Ok(None);
        };
        medication.is_inactive = true;
        medication.updated_at = Utc::now();
        store
            .update(
                COLLECTION,
                &id.to_string(),
                serde_json::to_value(&medication)?,
            )
            .await?;
        Ok(Some(medication))
    }
}
