//! Axum middleware for the Dossier API.

pub mod auth;

pub use auth::{
    auth_middleware, optional_auth_middleware, AuthExtractor, AuthMiddlewareError,
    OptionalAuthExtractor,
};
