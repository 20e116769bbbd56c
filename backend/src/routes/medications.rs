//! Medication catalog API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::MedicationService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use medtrack_shared::types::{
    CreateMedicationRequest, MedicationListQuery, MedicationListResponse, MedicationResponse,
    UpdateMedicationRequest,
};
use uuid::Uuid;

/// Create medication routes
pub fn medication_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_medication).get(list_medications))
        .route(
            "/:id",
            get(get_medication)
                .put(update_medication)
                .delete(delete_medication),
        )
}

/// POST /api/v1/medications - Add a medication to the catalog
async fn create_medication(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateMedicationRequest>,
) -> Result<Json<MedicationResponse>, ApiError> {
    let medication = MedicationService::create(state.store().as_ref(), auth.user_id, req).await?;
    Ok(Json(medication))
}

/// GET /api/v1/medications - List medications, active ones by default
async fn list_medications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MedicationListQuery>,
) -> Result<Json<MedicationListResponse>, ApiError> {
    let list =
        MedicationService::list(state.store().as_ref(), auth.user_id, query.include_inactive)
            .await?;
    Ok(Json(list))
}

/// GET /api/v1/medications/:id
async fn get_medication(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MedicationResponse>, ApiError> {
    let medication = MedicationService::get(state.store().as_ref(), auth.user_id, id).await?;
    Ok(Json(medication))
}

/// PUT /api/v1/medications/:id - Partial update
async fn update_medication(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMedicationRequest>,
) -> Result<Json<MedicationResponse>, ApiError> {
    let medication =
        MedicationService::update(state.store().as_ref(), auth.user_id, id, req).await?;
    Ok(Json(medication))
}

/// DELETE /api/v1/medications/:id - Soft-delete (mark inactive)
async fn delete_medication(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MedicationResponse>, ApiError> {
    let medication = MedicationService::deactivate(state.store().as_ref(), auth.user_id, id).await?;
    Ok(Json(medication))
}
