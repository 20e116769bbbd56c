//! User repository

use crate::store::{DocumentStore, Filter};
use anyhow::Result;
use chrono::Utc;
use medtrack_shared::models::User;
use uuid::Uuid;

const COLLECTION: &str = "users";

/// User repository
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(
        store: &dyn DocumentStore,
        email: &str,
        password_hash: &str,
        display_name: Option<String>,
    ) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_lowercase(),
            password_hash: password_hash.to_string(),
            display_name,
            created_at: now,
            updated_at: now,
        };
        store
            .insert(COLLECTION, &user.id.to_string(), serde_json::to_value(&user)?)
            .await?;
        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(store: &dyn DocumentStore, email: &str) -> Result<Option<User>> {
        let filter = Filter::new().eq("email", email.to_lowercase());
        let docs = store.find(COLLECTION, &filter).await?;
        match docs.into_iter().next() {
            Some(doc) => Ok(Some(serde_json::from_value(doc.data)?)),
            None => Ok(None),
        }
    }

    /// Find a user by id
    pub async fn find_by_id(store: &dyn DocumentStore, id: Uuid) -> Result<Option<User>> {
        match store.get(COLLECTION, &id.to_string()).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc.data)?)),
            None => Ok(None),
        }
    }

    /// Check whether an email is already registered
    pub async fn email_exists(store: &dyn DocumentStore, email: &str) -> Result<bool> {
        Ok(Self::find_by_email(store, email).await?.is_some())
    }

    /// Update the mutable profile fields
    pub async fn update_profile(
        store: &dyn DocumentStore,
        id: Uuid,
        display_name: Option<String>,
    ) -> Result<Option<User>> {
        let Some(mut user) = Self::find_by_id(store, id).await? else {
            return Ok(None);
        };
        user.display_name = display_name;
        user.updated_at = Utc::now();
        store
            .update(COLLECTION, &id.to_string(), serde_json::to_value(&user)?)
            .await?;
        Ok(Some(user))
    }
}
