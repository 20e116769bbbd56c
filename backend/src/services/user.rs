//! User account service

use crate::auth::PasswordService;
use crate::error::{ApiError, ApiResult};
use crate::repositories::UserRepository;
use crate::state::AppState;
use medtrack_shared::models::User;
use medtrack_shared::types::{
    AuthTokens, LoginRequest, RegisterRequest, UpdateProfileRequest, UserProfile,
};
use medtrack_shared::validation;
use uuid::Uuid;

/// User account service
pub struct UserService;

impl UserService {
    /// Register a new account and issue its first token pair
    pub async fn register(state: &AppState, request: RegisterRequest) -> ApiResult<AuthTokens> {
        validation::validate_email(&request.email).map_err(ApiError::Validation)?;
        validation::validate_password(&request.password).map_err(ApiError::Validation)?;

        if UserRepository::email_exists(state.store().as_ref(), &request.email).await? {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(request.password).await?;
        let user = UserRepository::create(
            state.store().as_ref(),
            &request.email,
            &password_hash,
            request.display_name,
        )
        .await?;

        Self::issue_tokens(state, user.id)
    }

    /// Authenticate with email + password
    pub async fn login(state: &AppState, request: LoginRequest) -> ApiResult<AuthTokens> {
        let user = UserRepository::find_by_email(state.store().as_ref(), &request.email)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = PasswordService::verify_async(request.password, user.password_hash).await?;
        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Self::issue_tokens(state, user.id)
    }

    /// Exchange a refresh token for a fresh token pair
    pub async fn refresh(state: &AppState, refresh_token: &str) -> ApiResult<AuthTokens> {
        let claims = state
            .jwt()
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid user id in token".to_string()))?;

        // The account must still exist
        UserRepository::find_by_id(state.store().as_ref(), user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

        Self::issue_tokens(state, user_id)
    }

    /// The authenticated user's profile
    pub async fn get_profile(state: &AppState, user_id: Uuid) -> ApiResult<UserProfile> {
        let user = UserRepository::find_by_id(state.store().as_ref(), user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        Ok(Self::to_profile(user))
    }

    /// Update the mutable profile fields
    pub async fn update_profile(
        state: &AppState,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> ApiResult<UserProfile> {
        if let Some(name) = &request.display_name {
            validation::validate_label(name).map_err(ApiError::Validation)?;
        }
        let user =
            UserRepository::update_profile(state.store().as_ref(), user_id, request.display_name)
                .await?
                .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        Ok(Self::to_profile(user))
    }

    fn issue_tokens(state: &AppState, user_id: Uuid) -> ApiResult<AuthTokens> {
        Ok(AuthTokens {
            access_token: state.jwt().generate_access_token(user_id)?,
            refresh_token: state.jwt().generate_refresh_token(user_id)?,
            token_type: "Bearer".to_string(),
            expires_in: state.jwt().access_token_expiry_secs(),
        })
    }

    fn to_profile(user: User) -> UserProfile {
        UserProfile {
            id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
        }
    }
}
