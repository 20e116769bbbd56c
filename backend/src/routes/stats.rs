//! Statistics API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::StatsService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use medtrack_shared::types::{AdherenceQuery, AdherenceStatsResponse};

/// Create stats routes
pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/adherence", get(get_adherence))
}

/// GET /api/v1/stats/adherence?days - Per-medication adherence over a
/// trailing window (server default when `days` is absent)
async fn get_adherence(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AdherenceQuery>,
) -> Result<Json<AdherenceStatsResponse>, ApiError> {
    let window_days = query.days.unwrap_or(state.config().stats.window_days);
    let stats = StatsService::adherence(
        state.store().as_ref(),
        auth.user_id,
        window_days,
        Utc::now(),
    )
    .await?;
    Ok(Json(stats))
}
