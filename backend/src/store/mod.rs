//! Document store boundary
//!
//! Persistence goes through a hosted document database; the backend only
//! sees this interface: collections of opaque JSON documents keyed by id,
//! with equality-conjunction filters. Typed repositories sit on top and
//! serialize at this boundary, so nothing above it knows about the
//! concrete backend.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

mod memory;

pub use memory::MemoryStore;

/// Store layer error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Document already exists: {collection}/{id}")]
    AlreadyExists { collection: String, id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// A stored document: its id plus the raw JSON body
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Conjunction of top-level field equality conditions
///
/// This is the only query shape the store supports (`user_id = X AND
/// is_inactive = false`); anything richer is done in memory by the
/// repositories.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `field == value` condition
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Whether a document body satisfies every condition
    pub fn matches(&self, data: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| data.get(field) == Some(value))
    }
}

/// Interface to the document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document under an explicit id
    async fn insert(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError>;

    /// Fetch a document by id
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Replace an existing document
    async fn update(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError>;

    /// Remove a document
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// All documents in a collection matching the filter
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;
}
