//! History API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::HistoryService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use medtrack_shared::types::{
    CreateHistoryEntryRequest, HistoryEntryResponse, HistoryListQuery, HistoryListResponse,
    UpdateHistoryEntryRequest,
};
use uuid::Uuid;

/// Create history routes
pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_entry).get(list_entries))
        .route("/:id", get(get_entry).put(update_entry).delete(delete_entry))
}

/// POST /api/v1/history - Log a dose or an observation
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateHistoryEntryRequest>,
) -> Result<Json<HistoryEntryResponse>, ApiError> {
    let entry = HistoryService::create(state.store().as_ref(), auth.user_id, req).await?;
    Ok(Json(entry))
}

/// GET /api/v1/history?start&end&limit&offset - Paginated listing
async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<HistoryListQuery>,
) -> Result<Json<HistoryListResponse>, ApiError> {
    let list = HistoryService::list(state.store().as_ref(), auth.user_id, query).await?;
    Ok(Json(list))
}

/// GET /api/v1/history/:id
async fn get_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryEntryResponse>, ApiError> {
    let entry = HistoryService::get(state.store().as_ref(), auth.user_id, id).await?;
    Ok(Json(entry))
}

/// PUT /api/v1/history/:id - Partial update
async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateHistoryEntryRequest>,
) -> Result<Json<HistoryEntryResponse>, ApiError> {
    let entry = HistoryService::update(state.store().as_ref(), auth.user_id, id, req).await?;
    Ok(Json(entry))
}

/// DELETE /api/v1/history/:id
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    HistoryService::delete(state.store().as_ref(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
