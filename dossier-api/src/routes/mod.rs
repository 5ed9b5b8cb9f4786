//! REST API Routes Module
//!
//! Route handlers organized by entity, assembled into the full router:
//! - Entity CRUD under /api/v1/* (bearer auth required)
//! - Shared report reads under /api/v1/reports/{id} (optional auth)
//! - Health checks at /health (public)
//! - OpenAPI spec at /openapi.json

pub mod admin;
pub mod batch;
pub mod health;
pub mod investigation;
pub mod job;
pub mod report;
pub mod webhook;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, optional_auth_middleware};
use crate::state::AppState;

#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

/// Create the complete API router.
///
/// Everything under /api/v1 requires a bearer token except the report
/// subtree, which runs behind optional auth so public report links work
/// anonymously; its management handlers still fail closed without a
/// token.
pub fn create_api_router(state: AppState) -> Router {
    let auth = state.auth.clone();

    let protected = Router::new()
        .nest("/jobs", job::create_router())
        .nest("/investigations", investigation::create_router())
        .nest("/batch", batch::create_router())
        .nest("/webhooks", webhook::create_router())
        .nest("/admin", admin::create_router())
        .layer(from_fn_with_state(auth.clone(), auth_middleware));

    let reports =
        report::create_router().layer(from_fn_with_state(auth, optional_auth_middleware));

    let api_routes = protected.nest("/reports", reports);

    let router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health::create_router());

    #[cfg(feature = "openapi")]
    let router = router.route("/openapi.json", axum::routing::get(openapi_json));

    router
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config))
        .with_state(state)
}

/// Build the CORS layer from ApiConfig.
///
/// With no configured origins the layer allows any origin, which is only
/// appropriate for development.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: no origins configured, allowing all");
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
