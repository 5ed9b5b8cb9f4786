//! Health Check Routes
//!
//! Unauthenticated liveness and readiness probes.

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check payload.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health - Liveness probe
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
))]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/live - Kubernetes liveness probe
pub async fn liveness() -> impl IntoResponse {
    axum::http::StatusCode::OK
}

/// GET /health/ready - Kubernetes readiness probe
///
/// The in-memory store has no external connections to check; readiness
/// equals liveness until a networked backend appears.
pub async fn readiness() -> impl IntoResponse {
    axum::http::StatusCode::OK
}

/// Create the health routes router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let app: Router = Router::new().route("/health", get(health_check));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }
}
