//! End-to-end API tests over the in-memory store
//!
//! Exercises the medication, reminder, schedule, history, and stats
//! endpoints through the full router, including the concrete
//! recurrence scenarios the resolver guarantees.

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::routes::create_router;
    use crate::state::AppState;
    use crate::store::MemoryStore;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Router plus the bearer token of a freshly registered user
    struct TestClient {
        app: Router,
        token: String,
    }

    impl TestClient {
        async fn new() -> Self {
            let state = AppState::new(Arc::new(MemoryStore::new()), AppConfig::default());
            let app = create_router(state);

            let (status, tokens) = Self::send(
                &app,
                "POST",
                "/api/v1/auth/register",
                None,
                Some(json!({
                    "email": "alex@example.com",
                    "password": "long-enough-password"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            let token = tokens["access_token"].as_str().unwrap().to_string();

            Self { app, token }
        }

        async fn send(
            app: &Router,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().uri(uri).method(method);
            if let Some(token) = token {
                builder = builder.header("Authorization", format!("Bearer {}", token));
            }
            let request = match body {
                Some(body) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let response = app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, json)
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            Self::send(&self.app, "GET", uri, Some(&self.token), None).await
        }

        async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            Self::send(&self.app, "POST", uri, Some(&self.token), Some(body)).await
        }

        async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            Self::send(&self.app, "PUT", uri, Some(&self.token), Some(body)).await
        }

        async fn delete(&self, uri: &str) -> (StatusCode, Value) {
            Self::send(&self.app, "DELETE", uri, Some(&self.token), None).await
        }

        async fn create_medication(&self, name: &str) -> String {
            let (status, medication) = self
                .post(
                    "/api/v1/medications",
                    json!({ "name": name, "dosage": "500mg" }),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            medication["id"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn medication_crud_and_soft_delete() {
        let client = TestClient::new().await;

        let id = client.create_medication("Aspirin").await;

        let (status, medication) = client
            .put(
                &format!("/api/v1/medications/{}", id),
                json!({ "dosage": "100mg", "notes": "With food" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(medication["dosage"], "100mg");
        assert_eq!(medication["notes"], "With food");

        // Soft delete hides it from the default listing
        let (status, deleted) = client.delete(&format!("/api/v1/medications/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["is_inactive"], true);

        let (_, listing) = client.get("/api/v1/medications").await;
        assert_eq!(listing["items"].as_array().unwrap().len(), 0);

        let (_, listing) = client.get("/api/v1/medications?include_inactive=true").await;
        assert_eq!(listing["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn daily_reminder_resolves_one_occurrence_per_day() {
        let client = TestClient::new().await;

        let (status, reminder) = client
            .post(
                "/api/v1/reminders",
                json!({
                    "type": "OBSERVATION",
                    "label": "Blood pressure",
                    "time": "08:00:00",
                    "start_date": "2024-01-01",
                    "repeat_mode": "DAILY"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let id = reminder["id"].as_str().unwrap();

        let (status, schedule) = client
            .get(&format!(
                "/api/v1/reminders/{}/schedule?from=2024-01-01T00:00:00Z&to=2024-01-04T00:00:00Z",
                id
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        let items = schedule["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["occurs_at"], "2024-01-01T08:00:00Z");
        assert_eq!(items[2]["occurs_at"], "2024-01-03T08:00:00Z");
    }

    #[tokio::test]
    async fn weekly_reminder_fires_only_on_selected_days() {
        let client = TestClient::new().await;

        let (status, reminder) = client
            .post(
                "/api/v1/reminders",
                json!({
                    "type": "OBSERVATION",
                    "label": "Weigh-in",
                    "time": "07:30:00",
                    "start_date": "2024-01-01",
                    "repeat_mode": "WEEKLY",
                    "days_of_week": ["MONDAY", "THURSDAY"]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let id = reminder["id"].as_str().unwrap();

        // 2024-01-01 is a Monday; two weeks hold four selected days
        let (_, schedule) = client
            .get(&format!(
                "/api/v1/reminders/{}/schedule?from=2024-01-01T00:00:00Z&to=2024-01-15T00:00:00Z",
                id
            ))
            .await;
        let items = schedule["items"].as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0]["occurs_at"], "2024-01-01T07:30:00Z");
        assert_eq!(items[1]["occurs_at"], "2024-01-04T07:30:00Z");
    }

    #[tokio::test]
    async fn custom_interval_reminder_resolves_from_its_anchor() {
        let client = TestClient::new().await;

        let (status, reminder) = client
            .post(
                "/api/v1/reminders",
                json!({
                    "type": "OBSERVATION",
                    "label": "Eye drops",
                    "time": "06:00:00",
                    "start_date": "2024-01-01",
                    "repeat_mode": "CUSTOM",
                    "interval_hours": 8
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let id = reminder["id"].as_str().unwrap();

        let (_, schedule) = client
            .get(&format!(
                "/api/v1/reminders/{}/schedule?from=2024-01-01T00:00:00Z&to=2024-01-02T00:00:00Z",
                id
            ))
            .await;
        let items = schedule["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["occurs_at"], "2024-01-01T06:00:00Z");
        assert_eq!(items[1]["occurs_at"], "2024-01-01T14:00:00Z");
        assert_eq!(items[2]["occurs_at"], "2024-01-01T22:00:00Z");
    }

    #[tokio::test]
    async fn weekly_reminder_without_days_is_rejected() {
        let client = TestClient::new().await;

        let (status, error) = client
            .post(
                "/api/v1/reminders",
                json!({
                    "type": "OBSERVATION",
                    "label": "Weigh-in",
                    "time": "07:30:00",
                    "start_date": "2024-01-01",
                    "repeat_mode": "WEEKLY"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn medication_reminder_requires_an_owned_active_medication() {
        let client = TestClient::new().await;

        // Unknown medication
        let (status, _) = client
            .post(
                "/api/v1/reminders",
                json!({
                    "type": "MEDICATION",
                    "medication_id": uuid::Uuid::new_v4(),
                    "label": "Morning dose",
                    "time": "08:00:00",
                    "start_date": "2024-01-01",
                    "repeat_mode": "DAILY"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Inactive medication
        let id = client.create_medication("Aspirin").await;
        client.delete(&format!("/api/v1/medications/{}", id)).await;

        let (status, error) = client
            .post(
                "/api/v1/reminders",
                json!({
                    "type": "MEDICATION",
                    "medication_id": id,
                    "label": "Morning dose",
                    "time": "08:00:00",
                    "start_date": "2024-01-01",
                    "repeat_mode": "DAILY"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn merged_schedule_spans_reminders_in_time_order() {
        let client = TestClient::new().await;

        for (label, time) in [("Evening", "20:00:00"), ("Morning", "08:00:00")] {
            let (status, _) = client
                .post(
                    "/api/v1/reminders",
                    json!({
                        "type": "OBSERVATION",
                        "label": label,
                        "time": time,
                        "start_date": "2024-01-01",
                        "repeat_mode": "DAILY"
                    }),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, schedule) = client
            .get("/api/v1/schedule?from=2024-01-01T00:00:00Z&to=2024-01-02T00:00:00Z")
            .await;
        assert_eq!(status, StatusCode::OK);
        let items = schedule["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["label"], "Morning");
        assert_eq!(items[1]["label"], "Evening");
    }

    #[tokio::test]
    async fn deactivated_reminder_drops_out_of_the_schedule() {
        let client = TestClient::new().await;

        let (_, reminder) = client
            .post(
                "/api/v1/reminders",
                json!({
                    "type": "OBSERVATION",
                    "label": "Blood pressure",
                    "time": "08:00:00",
                    "start_date": "2024-01-01",
                    "repeat_mode": "DAILY"
                }),
            )
            .await;
        let id = reminder["id"].as_str().unwrap();

        let (status, updated) = client
            .put(
                &format!("/api/v1/reminders/{}", id),
                json!({ "is_active": false }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["is_active"], false);
        assert!(updated.get("next_occurrence").is_none());

        let (_, schedule) = client
            .get("/api/v1/schedule?from=2024-01-01T00:00:00Z&to=2024-01-08T00:00:00Z")
            .await;
        assert_eq!(schedule["items"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn inverted_schedule_window_is_a_bad_request() {
        let client = TestClient::new().await;
        let (status, error) = client
            .get("/api/v1/schedule?from=2024-01-05T00:00:00Z&to=2024-01-01T00:00:00Z")
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn history_logging_pagination_and_name_join() {
        let client = TestClient::new().await;
        let medication_id = client.create_medication("Aspirin").await;

        for day in 1..=3 {
            let (status, _) = client
                .post(
                    "/api/v1/history",
                    json!({
                        "type": "medication",
                        "medication_id": medication_id,
                        "dosage": "500mg",
                        "taken_at": format!("2024-01-0{}T08:00:00Z", day)
                    }),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, _) = client
            .post(
                "/api/v1/history",
                json!({
                    "type": "observation",
                    "observation": "Slept badly",
                    "taken_at": "2024-01-02T22:00:00Z"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, listing) = client.get("/api/v1/history?limit=2&offset=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listing["total_count"], 4);
        assert_eq!(listing["has_more"], true);
        let items = listing["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        // Most recent first, medication names joined in
        assert_eq!(items[0]["taken_at"], "2024-01-03T08:00:00Z");
        assert_eq!(items[0]["medication_name"], "Aspirin");

        // Window filtering is half-open on the end bound
        let (_, listing) = client
            .get("/api/v1/history?start=2024-01-02T00:00:00Z&end=2024-01-03T08:00:00Z")
            .await;
        assert_eq!(listing["total_count"], 2);
    }

    #[tokio::test]
    async fn history_entry_with_unknown_reminder_is_rejected() {
        let client = TestClient::new().await;
        let medication_id = client.create_medication("Aspirin").await;

        let (status, _) = client
            .post(
                "/api/v1/history",
                json!({
                    "type": "medication",
                    "medication_id": medication_id,
                    "reminder_id": uuid::Uuid::new_v4(),
                    "taken_at": "2024-01-02T08:00:00Z"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn observation_entry_requires_a_body() {
        let client = TestClient::new().await;
        let (status, error) = client
            .post(
                "/api/v1/history",
                json!({ "type": "observation", "taken_at": "2024-01-02T22:00:00Z" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn adherence_counts_taken_against_scheduled() {
        let client = TestClient::new().await;
        let medication_id = client.create_medication("Aspirin").await;

        // One dose per day, started long ago so the whole window is covered
        let (status, _) = client
            .post(
                "/api/v1/reminders",
                json!({
                    "type": "MEDICATION",
                    "medication_id": medication_id,
                    "label": "Morning aspirin",
                    "time": "08:00:00",
                    "start_date": "2020-01-01",
                    "repeat_mode": "DAILY"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        // Log one recent dose inside any 7-day trailing window
        let (status, _) = client
            .post(
                "/api/v1/history",
                json!({
                    "type": "medication",
                    "medication_id": medication_id,
                    "dosage": "500mg"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, stats) = client.get("/api/v1/stats/adherence?days=7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["window_days"], 7);
        let items = stats["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["doses_taken"], 1);
        assert_eq!(items[0]["doses_scheduled"], 7);
        assert!(items[0]["adherence_percent"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn users_cannot_see_each_others_data() {
        let alice = TestClient::new().await;
        let medication_id = alice.create_medication("Aspirin").await;

        // Second account on the same app instance
        let (status, tokens) = TestClient::send(
            &alice.app,
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": "bob@example.com",
                "password": "long-enough-password"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let bob = TestClient {
            app: alice.app.clone(),
            token: tokens["access_token"].as_str().unwrap().to_string(),
        };

        let (status, _) = bob.get(&format!("/api/v1/medications/{}", medication_id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, listing) = bob.get("/api/v1/medications").await;
        assert_eq!(listing["items"].as_array().unwrap().len(), 0);
    }
}
