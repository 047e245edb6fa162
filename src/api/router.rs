//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::{ApiContext, Backend};
use crate::config::ApiConfig;

/// Build the API router over `backend`.
pub fn api_router(backend: Arc<dyn Backend>, config: &ApiConfig) -> Router {
    build_router(ApiContext::new(backend), config.max_body_bytes)
}

fn build_router(ctx: ApiContext, max_body_bytes: usize) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/auth/register", post(endpoints::auth::register))
        .route("/auth/login", post(endpoints::auth::login))
        .route(
            "/patients/:user_id/profile",
            get(endpoints::profiles::get_patient).put(endpoints::profiles::put_patient),
        )
        .route(
            "/providers/:user_id/profile",
            get(endpoints::profiles::get_provider).put(endpoints::profiles::put_provider),
        )
        .with_state(ctx)
        // Layers wrap bottom-up: the audit logger sees the final status.
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(axum::middleware::from_fn(middleware::audit::log_request));

    Router::new().nest("/api", routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::types::testing::{FakeBackend, TEST_PASSWORD};

    fn test_router() -> Router {
        api_router(FakeBackend::shared(), &ApiConfig::default())
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    // ── Health ───────────────────────────────────────────────

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, json) = send(&test_router(), get_request("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let response = test_router()
            .oneshot(get_request("/api/nonexistent"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ── Register / login ─────────────────────────────────────

    #[tokio::test]
    async fn register_returns_201_with_user_shape() {
        let router = test_router();
        let (status, json) = send(
            &router,
            json_request(
                "POST",
                "/api/auth/register",
                json!({ "email": "a@b.com", "password": TEST_PASSWORD }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["role"], "patient");
        assert!(json["id"].is_string());
        assert!(json["created_at"].is_string());
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn register_validation_failure_lists_fields() {
        let (status, json) = send(
            &test_router(),
            json_request(
                "POST",
                "/api/auth/register",
                json!({ "email": "not-an-email", "password": "123", "role": "boss" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
        let fields = json["error"]["fields"].as_object().unwrap();
        let mut names: Vec<&str> = fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["email", "password", "role"]);
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let router = test_router();
        let body = json!({ "email": "a@b.com", "password": TEST_PASSWORD });
        let (first, _) = send(&router, json_request("POST", "/api/auth/register", body.clone())).await;
        let (second, json) = send(&router, json_request("POST", "/api/auth/register", body)).await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let (status, json) = send(&test_router(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn non_object_body_is_non_field_error() {
        let (status, json) = send(
            &test_router(),
            json_request("POST", "/api/auth/login", json!(["a@b.com", "pw"])),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["error"]["fields"]["non_field_errors"][0],
            "Invalid data. Expected a dictionary, but got array."
        );
    }

    #[tokio::test]
    async fn login_missing_fields_reported() {
        let (status, json) = send(
            &test_router(),
            json_request("POST", "/api/auth/login", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["fields"]["email"][0], "This field is required.");
        assert_eq!(json["error"]["fields"]["password"][0], "This field is required.");
    }

    #[tokio::test]
    async fn login_after_register_returns_token() {
        let router = test_router();
        send(
            &router,
            json_request(
                "POST",
                "/api/auth/register",
                json!({ "email": "doc@clinic.org", "password": TEST_PASSWORD, "role": "provider" }),
            ),
        )
        .await;

        let (status, json) = send(
            &router,
            json_request(
                "POST",
                "/api/auth/login",
                json!({ "email": "doc@clinic.org", "password": TEST_PASSWORD }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["role"], "provider");
        assert_eq!(json["message"], "Login successful");
        assert!(!json["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_wrong_password_is_401() {
        let (status, json) = send(
            &test_router(),
            json_request(
                "POST",
                "/api/auth/login",
                json!({ "email": "ghost@clinic.org", "password": "whatever" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
    }

    // ── Profiles ─────────────────────────────────────────────

    #[tokio::test]
    async fn patient_profile_put_then_get() {
        let router = test_router();
        let body = json!({
            "user_id": "p-1",
            "allergies": ["penicillin"],
            "health_data": { "bp": "120/80" }
        });

        let (status, saved) = send(
            &router,
            json_request("PUT", "/api/patients/p-1/profile", body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved, body);

        let (status, loaded) = send(&router, get_request("/api/patients/p-1/profile")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(loaded, body);
    }

    #[tokio::test]
    async fn patient_profile_missing_is_404() {
        let (status, json) = send(&test_router(), get_request("/api/patients/nobody/profile")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn profile_user_id_must_match_path() {
        let (status, json) = send(
            &test_router(),
            json_request("PUT", "/api/patients/p-1/profile", json!({ "user_id": "p-2" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn provider_profile_minimal_put() {
        let (status, json) = send(
            &test_router(),
            json_request(
                "PUT",
                "/api/providers/d-1/profile",
                json!({ "user_id": "d-1", "specialty": "cardiology", "license_number": "LIC-1" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["specialty"], "cardiology");
        assert!(json.get("qualifications").is_none());
    }

    #[tokio::test]
    async fn provider_profile_missing_specialty_rejected() {
        let (status, json) = send(
            &test_router(),
            json_request(
                "PUT",
                "/api/providers/d-1/profile",
                json!({ "user_id": "d-1", "license_number": "LIC-1" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["fields"]["specialty"][0], "This field is required.");
    }

    #[tokio::test]
    async fn oversized_body_is_413() {
        let config = ApiConfig {
            max_body_bytes: 64,
            ..ApiConfig::default()
        };
        let router = api_router(FakeBackend::shared(), &config);
        let body = json!({ "user_id": "p-1", "health_data": "x".repeat(500) });
        let (status, json) = send(
            &router,
            json_request("PUT", "/api/patients/p-1/profile", body),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
    }
}
