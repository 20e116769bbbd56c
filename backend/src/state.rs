//! Shared application state

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::store::DocumentStore;
use std::sync::Arc;

/// Shared application state available to all request handlers
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DocumentStore>,
    config: Arc<AppConfig>,
    jwt: JwtService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
        );
        Self {
            store,
            config: Arc::new(config),
            jwt,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
