//! Route definitions for the MedTrack API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod history;
mod medications;
mod reminders;
mod stats;

#[cfg(test)]
mod api_tests;
#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use history::history_routes;
pub use medications::medication_routes;
pub use reminders::{reminder_routes, schedule_routes};
pub use stats::stats_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "MedTrack API v1" }))
        .nest("/auth", auth::auth_routes())
        .nest("/medications", medications::medication_routes())
        .nest("/reminders", reminders::reminder_routes())
        .nest("/schedule", reminders::schedule_routes())
        .nest("/history", history::history_routes())
        .nest("/stats", stats::stats_routes())
}
