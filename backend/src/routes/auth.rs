//! Authentication API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use medtrack_shared::types::{
    AuthTokens, LoginRequest, RegisterRequest, UpdateProfileRequest, UserProfile,
};
use serde::Deserialize;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/me", get(get_me).put(update_me))
}

/// POST /api/v1/auth/register - Create an account
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthTokens>, ApiError> {
    let tokens = UserService::register(&state, req).await?;
    Ok(Json(tokens))
}

/// POST /api/v1/auth/login - Authenticate with email + password
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthTokens>, ApiError> {
    let tokens = UserService::login(&state, req).await?;
    Ok(Json(tokens))
}

#[derive(Deserialize)]
struct RefreshRequest {
    refresh_token: String,
}

/// POST /api/v1/auth/refresh - Exchange a refresh token for new tokens
async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<AuthTokens>, ApiError> {
    let tokens = UserService::refresh(&state, &req.refresh_token).await?;
    Ok(Json(tokens))
}

/// GET /api/v1/auth/me - The authenticated user's profile
async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = UserService::get_profile(&state, auth.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/auth/me - Update the profile
async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = UserService::update_profile(&state, auth.user_id, req).await?;
    Ok(Json(profile))
}
