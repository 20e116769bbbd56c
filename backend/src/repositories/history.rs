//! History entry repository

use crate::store::{DocumentStore, Filter};
use anyhow::Result;
use chrono::{DateTime, Utc};
use medtrack_shared::models::{HistoryEntry, HistoryEntryKind};
use serde_json::json;
use uuid::Uuid;

const COLLECTION: &str = "usersHistory";

/// Input for creating a history entry
#[derive(Debug, Clone)]
pub struct CreateHistoryEntry {
    pub user_id: Uuid,
    pub kind: HistoryEntryKind,
    pub medication_id: Option<Uuid>,
    pub dosage: Option<String>,
    pub observation: Option<String>,
    pub reminder_id: Option<Uuid>,
    pub taken_at: DateTime<Utc>,
}

/// History repository
pub struct HistoryRepository;

impl HistoryRepository {
    /// Create a new history entry
    pub async fn create(store: &dyn DocumentStore, input: CreateHistoryEntry) -> Result<HistoryEntry> {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            kind: input.kind,
            medication_id: input.medication_id,
            dosage: input.dosage,
            observation: input.observation,
            reminder_id: input.reminder_id,
            taken_at: input.taken_at,
            created_at: Utc::now(),
        };
        store
            .insert(COLLECTION, &entry.id.to_string(), serde_json::to_value(&entry)?)
            .await?;
        Ok(entry)
    }

    /// Get an entry by id, scoped to its owner
    pub async fn get_by_id(
        store: &dyn DocumentStore,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<HistoryEntry>> {
        match store.get(COLLECTION, &id.to_string()).await? {
            Some(doc) => {
                let entry: HistoryEntry = serde_json::from_value(doc.data)?;
                Ok((entry.user_id == user_id).then_some(entry))
            }
            None => Ok(None),
        }
    }

    /// All of a user's entries, most recent first
    pub async fn list(store: &dyn DocumentStore, user_id: Uuid) -> Result<Vec<HistoryEntry>> {
        let filter = Filter::new().eq("user_id", json!(user_id));
        let docs = store.find(COLLECTION, &filter).await?;
        let mut entries = docs
            .into_iter()
            .map(|doc| serde_json::from_value(doc.data))
            .collect::<Result<Vec<HistoryEntry>, _>>()?;
        entries.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
        Ok(entries)
    }

    /// Entries inside an optional `[start, end)` window, most recent
    /// first, paginated; returns the page plus the total match count
    pub async fn list_range(
        store: &dyn DocumentStore,
        user_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<HistoryEntry>, i64)> {
        let mut entries = Self::list(store, user_id).await?;
        entries.retain(|entry| {
            start.map_or(true, |s| entry.taken_at >= s) && end.map_or(true, |e| entry.taken_at < e)
        });
        let total = entries.len() as i64;
        let page = entries
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    /// Medication-dose entries taken at or after `since`
    pub async fn doses_since(
        store: &dyn DocumentStore,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<HistoryEntry>> {
        let mut entries = Self::list(store, user_id).await?;
        entries.retain(|entry| entry.kind == HistoryEntryKind::Medication && entry.taken_at >= since);
        Ok(entries)
    }

    /// Persist a modified entry
    pub async fn save(store: &dyn DocumentStore, entry: &HistoryEntry) -> Result<()> {
        store
            .update(COLLECTION, &entry.id.to_string(), serde_json::to_value(entry)?)
            .await?;
        Ok(())
    }

    /// Remove an entry; returns whether it existed and was owned
    pub async fn delete(store: &dyn DocumentStore, id: Uuid, user_id: Uuid) -> Result<bool> {
        if Self::get_by_id(store, id, user_id).await?.is_none() {
            return Ok(false);
        }
        store.delete(COLLECTION, &id.to_string()).await?;
        Ok(true)
    }
}
