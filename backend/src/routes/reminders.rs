//! Reminder and schedule API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::{ReminderService, ScheduleService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use medtrack_shared::types::{
    CreateReminderRequest, ReminderListResponse, ReminderResponse, ScheduleQuery,
    ScheduleResponse, UpdateReminderRequest,
};
use uuid::Uuid;

/// Create reminder routes
pub fn reminder_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_reminder).get(list_reminders))
        .route(
            "/:id",
            get(get_reminder).put(update_reminder).delete(delete_reminder),
        )
        .route("/:id/schedule", get(get_reminder_schedule))
}

/// Create schedule routes (merged view across all active reminders)
pub fn schedule_routes() -> Router<AppState> {
    Router::new().route("/", get(get_schedule))
}

/// POST /api/v1/reminders
async fn create_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateReminderRequest>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let reminder = ReminderService::create(state.store().as_ref(), auth.user_id, req).await?;
    Ok(Json(reminder))
}

/// GET /api/v1/reminders
async fn list_reminders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ReminderListResponse>, ApiError> {
    let list = ReminderService::list(state.store().as_ref(), auth.user_id).await?;
    Ok(Json(list))
}

/// GET /api/v1/reminders/:id
async fn get_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let reminder = ReminderService::get(state.store().as_ref(), auth.user_id, id).await?;
    Ok(Json(reminder))
}

/// PUT /api/v1/reminders/:id - Partial update
async fn update_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateReminderRequest>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let reminder = ReminderService::update(state.store().as_ref(), auth.user_id, id, req).await?;
    Ok(Json(reminder))
}

/// DELETE /api/v1/reminders/:id
async fn delete_reminder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ReminderService::delete(state.store().as_ref(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/reminders/:id/schedule?from&to - One reminder's occurrences
async fn get_reminder_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule = ScheduleService::for_reminder(
        state.store().as_ref(),
        auth.user_id,
        id,
        query.from,
        query.to,
    )
    .await?;
    Ok(Json(schedule))
}

/// GET /api/v1/schedule?from&to - Merged schedule across active reminders
async fn get_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule =
        ScheduleService::for_user(state.store().as_ref(), auth.user_id, query.from, query.to)
            .await?;
    Ok(Json(schedule))
}
