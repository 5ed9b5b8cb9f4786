//! Dossier API - REST API Layer
//!
//! Axum REST endpoints for the Dossier OSINT platform: job submission
//! and lifecycle, investigations and item linking, report compilation
//! and sharing, batch submission, webhook registration, and admin
//! oversight. All state lives behind the `dossier-storage` trait; tool
//! execution and webhook delivery happen outside this codebase.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod poll;
pub mod routes;
pub mod services;
pub mod state;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use auth::{
    extract_bearer_token, generate_token, validate_token, AuthConfig, AuthContext, Claims,
    JwtSecret,
};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use middleware::{
    auth_middleware, optional_auth_middleware, AuthExtractor, OptionalAuthExtractor,
};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use poll::{JobPoller, PollOutcome};
pub use routes::create_api_router;
pub use state::AppState;
pub use types::*;
