//! Authentication enforcement tests
//!
//! Unauthenticated or malformed requests to protected endpoints must
//! return 401, and the full register/login/refresh flow must work
//! end to end against the in-memory store.

#[cfg(test)]
mod tests {
    use crate::auth::JwtService;
    use crate::config::AppConfig;
    use crate::routes::create_router;
    use crate::state::AppState;
    use crate::store::MemoryStore;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), AppConfig::default())
    }

    fn test_app() -> Router {
        create_router(test_state())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Generate random invalid tokens
    fn invalid_token_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("".to_string()),
            "[a-zA-Z0-9]{10,50}".prop_map(|s| s),
            "[a-zA-Z0-9]{10}\\.[a-zA-Z0-9]{10}".prop_map(|s| s),
            "[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}".prop_map(|s| s),
        ]
    }

    /// Generate random authorization header formats
    fn auth_header_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            invalid_token_strategy().prop_map(Some),
            invalid_token_strategy().prop_map(|t| Some(format!("Basic {}", t))),
            invalid_token_strategy().prop_map(|t| Some(format!("Bearer {}", t))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Unauthenticated requests to protected endpoints return 401
        #[test]
        fn prop_unauthenticated_requests_return_401(
            auth_header in auth_header_strategy()
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let app = test_app();

                let mut request_builder = Request::builder()
                    .uri("/api/v1/auth/me")
                    .method("GET");

                if let Some(header) = auth_header {
                    request_builder = request_builder.header("Authorization", header);
                }

                let request = request_builder.body(Body::empty()).unwrap();
                let response = app.oneshot(request).await.unwrap();

                prop_assert_eq!(
                    response.status(),
                    StatusCode::UNAUTHORIZED,
                    "Expected 401 for unauthenticated request"
                );

                Ok(())
            })?;
        }
    }

    #[tokio::test]
    async fn register_login_and_me_flow() {
        let state = test_state();
        let app = create_router(state);

        let (status, tokens) = post_json(
            app.clone(),
            "/api/v1/auth/register",
            json!({
                "email": "alex@example.com",
                "password": "long-enough-password",
                "display_name": "Alex"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let access_token = tokens["access_token"].as_str().unwrap().to_string();
        assert_eq!(tokens["token_type"], "Bearer");

        // Login with the same credentials
        let (status, _) = post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({
                "email": "ALEX@example.com",
                "password": "long-enough-password"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Access token works on /me
        let request = Request::builder()
            .uri("/api/v1/auth/me")
            .method("GET")
            .header("Authorization", format!("Bearer {}", access_token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let profile: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(profile["email"], "alex@example.com");
        assert_eq!(profile["display_name"], "Alex");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let app = test_app();
        let body = json!({
            "email": "dup@example.com",
            "password": "long-enough-password"
        });

        let (status, _) = post_json(app.clone(), "/api/v1/auth/register", body.clone()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, error) = post_json(app, "/api/v1/auth/register", body).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn login_with_wrong_password_returns_401() {
        let app = test_app();
        post_json(
            app.clone(),
            "/api/v1/auth/register",
            json!({
                "email": "alex@example.com",
                "password": "long-enough-password"
            }),
        )
        .await;

        let (status, _) = post_json(
            app,
            "/api/v1/auth/login",
            json!({
                "email": "alex@example.com",
                "password": "the-wrong-password"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_rotates_tokens() {
        let app = test_app();
        let (_, tokens) = post_json(
            app.clone(),
            "/api/v1/auth/register",
            json!({
                "email": "alex@example.com",
                "password": "long-enough-password"
            }),
        )
        .await;
        let refresh_token = tokens["refresh_token"].as_str().unwrap();

        let (status, refreshed) = post_json(
            app.clone(),
            "/api/v1/auth/refresh",
            json!({ "refresh_token": refresh_token }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(refreshed["access_token"].is_string());

        // Access tokens are not accepted as refresh tokens
        let (status, _) = post_json(
            app,
            "/api/v1/auth/refresh",
            json!({ "refresh_token": tokens["access_token"] }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_with_wrong_secret_returns_401() {
        let state = test_state();

        // A JWT service with a DIFFERENT secret
        let jwt_service = JwtService::new("wrong-secret-key", 3600, 86400);
        let token = jwt_service.generate_access_token(uuid::Uuid::new_v4()).unwrap();

        let app = create_router(state);
        let request = Request::builder()
            .uri("/api/v1/auth/me")
            .method("GET")
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn weak_password_is_rejected() {
        let app = test_app();
        let (status, error) = post_json(
            app,
            "/api/v1/auth/register",
            json!({
                "email": "alex@example.com",
                "password": "short"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    }
}
