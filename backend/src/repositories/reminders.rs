//! Reminder repository

use crate::store::{DocumentStore, Filter};
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use medtrack_shared::models::{Recurrence, Reminder, ReminderTarget};
use serde_json::json;
use uuid::Uuid;

const COLLECTION: &str = "usersReminders";

/// Input for creating a reminder
#[derive(Debug, Clone)]
pub struct CreateReminder {
    pub user_id: Uuid,
    pub target: ReminderTarget,
    pub label: String,
    pub description: Option<String>,
    pub time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub recurrence: Recurrence,
}

/// Reminder repository
pub struct ReminderRepository;

impl ReminderRepository {
    /// Create a new reminder
    pub async fn create(store: &dyn DocumentStore, input: CreateReminder) -> Result<Reminder> {
        let now = Utc::now();
        let reminder = Reminder {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            target: input.target,
            label: input.label,
            description: input.description,
            time: input.time,
            start_date: input.start_date,
            end_date: input.end_date,
            recurrence: input.recurrence,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        store
            .insert(
                COLLECTION,
                &reminder.id.to_string(),
                serde_json::to_value(&reminder)?,
            )
            .await?;
        Ok(reminder)
    }

    /// Get a reminder by id, scoped to its owner
    pub async fn get_by_id(
        store: &dyn DocumentStore,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Reminder>> {
        match store.get(COLLECTION, &id.to_string()).await? {
            Some(doc) => {
                let reminder: Reminder = serde_json::from_value(doc.data)?;
                Ok((reminder.user_id == user_id).then_some(reminder))
            }
            None => Ok(None),
        }
    }

    /// List a user's reminders, newest first
    pub async fn list(store: &dyn DocumentStore, user_id: Uuid) -> Result<Vec<Reminder>> {
        let filter = Filter::new().eq("user_id", json!(user_id));
        let docs = store.find(COLLECTION, &filter).await?;
        let mut reminders = docs
            .into_iter()
            .map(|doc| serde_json::from_value(doc.data))
            .collect::<Result<Vec<Reminder>, _>>()?;
        reminders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reminders)
    }

    /// List only the reminders that can currently produce occurrences
    pub async fn list_active(store: &dyn DocumentStore, user_id: Uuid) -> Result<Vec<Reminder>> {
        let filter = Filter::new()
            .eq("user_id", json!(user_id))
            .eq("is_active", true);
        let docs = store.find(COLLECTION, &filter).await?;
        let mut reminders = docs
            .into_iter()
            .map(|doc| serde_json::from_value(doc.data))
            .collect::<Result<Vec<Reminder>, _>>()?;
        reminders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reminders)
    }

    /// Persist a modified reminder
    pub async fn save(store: &dyn DocumentStore, reminder: &Reminder) -> Result<()> {
        store
            .update(
                COLLECTION,
                &reminder.id.to_string(),
                serde_json::to_value(reminder)?,
            )
            .await?;
        Ok(())
    }

    /// Remove a reminder; returns whether it existed and was owned
    pub async fn delete(store: &dyn DocumentStore, id: Uuid, user_id: Uuid) -> Result<bool> {
        if Self::get_by_id(store, id, user_id).await?.is_none() {
            return Ok(false);
        }
        store.delete(COLLECTION, &id.to_string()).await?;
        Ok(true)
    }
}
