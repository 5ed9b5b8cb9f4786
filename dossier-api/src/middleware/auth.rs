//! Axum Middleware for Authentication
//!
//! Two middleware variants:
//! - `auth_middleware` rejects unauthenticated requests with 401 and
//!   injects `AuthContext` into request extensions;
//! - `optional_auth_middleware` injects the context when a valid token is
//!   present but lets anonymous requests through, for routes with a
//!   public read path (shared reports).

use crate::auth::{extract_bearer_token, validate_token, AuthConfig, AuthContext};
use crate::error::ApiError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Error wrapper for middleware that implements IntoResponse.
#[derive(Debug)]
pub struct AuthMiddlewareError(pub ApiError);

impl IntoResponse for AuthMiddlewareError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

fn context_from_request(config: &AuthConfig, request: &Request) -> Result<AuthContext, ApiError> {
    let header_value = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            ApiError::unauthorized("Authentication required: provide Authorization header")
        })?;

    let token = extract_bearer_token(header_value)?;
    validate_token(config, token)
}

/// Authentication middleware. Rejects unauthenticated requests with 401.
pub async fn auth_middleware(
    State(config): State<Arc<AuthConfig>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthMiddlewareError> {
    let context = context_from_request(&config, &request).map_err(AuthMiddlewareError)?;
    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

/// Optional authentication middleware.
///
/// A valid token injects `AuthContext`; a missing header passes through
/// anonymously. A present-but-invalid token is still a 401, so callers
/// cannot silently fall back to the public path with a bad credential.
pub async fn optional_auth_middleware(
    State(config): State<Arc<AuthConfig>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthMiddlewareError> {
    if request.headers().contains_key("authorization") {
        let context = context_from_request(&config, &request).map_err(AuthMiddlewareError)?;
        request.extensions_mut().insert(context);
    }
    Ok(next.run(request).await)
}

// ============================================================================
// TYPED EXTRACTORS
// ============================================================================

/// Typed extractor for the authenticated request context.
///
/// Requires `auth_middleware` on the route; rejects with 401 when the
/// context is absent so a route accidentally mounted without the
/// middleware fails closed.
#[derive(Debug, Clone, Copy)]
pub struct AuthExtractor(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthExtractor
where
    S: Send + Sync,
{
    type Rejection = AuthMiddlewareError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .map(AuthExtractor)
            .ok_or_else(|| {
                AuthMiddlewareError(ApiError::unauthorized("Authentication required"))
            })
    }
}

impl std::ops::Deref for AuthExtractor {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extractor for routes where authentication is optional.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthExtractor(pub Option<AuthContext>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for OptionalAuthExtractor
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthExtractor(
            parts.extensions.get::<AuthContext>().copied(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::generate_token;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use dossier_core::new_entity_id;
    use tower::ServiceExt;

    fn test_config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::with_secret("test_secret").unwrap())
    }

    fn protected_app(config: Arc<AuthConfig>) -> Router {
        Router::new()
            .route(
                "/protected",
                get(|AuthExtractor(auth): AuthExtractor| async move { auth.user_id.to_string() }),
            )
            .layer(middleware::from_fn_with_state(config, auth_middleware))
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let config = test_config();
        let user_id = new_entity_id();
        let token = generate_token(&config, user_id).unwrap();
        let app = protected_app(config);

        let request = Request::builder()
            .uri("/protected")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&body), user_id.to_string());
    }

    #[tokio::test]
    async fn test_missing_header_is_401() {
        let app = protected_app(test_config());
        let request = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_401() {
        let app = protected_app(test_config());
        let request = Request::builder()
            .uri("/protected")
            .header("authorization", "Bearer not.a.token")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_scheme_is_401() {
        let app = protected_app(test_config());
        let request = Request::builder()
            .uri("/protected")
            .header("authorization", "Basic abc")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_optional_auth_allows_anonymous() {
        let config = test_config();
        let app = Router::new()
            .route(
                "/maybe",
                get(
                    |OptionalAuthExtractor(auth): OptionalAuthExtractor| async move {
                        match auth {
                            Some(context) => context.user_id.to_string(),
                            None => "anonymous".to_string(),
                        }
                    },
                ),
            )
            .layer(middleware::from_fn_with_state(
                config,
                optional_auth_middleware,
            ));

        let request = Request::builder()
            .uri("/maybe")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&body), "anonymous");
    }

    #[tokio::test]
    async fn test_optional_auth_rejects_bad_token() {
        let config = test_config();
        let app = Router::new()
            .route("/maybe", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                config,
                optional_auth_middleware,
            ));

        let request = Request::builder()
            .uri("/maybe")
            .header("authorization", "Bearer bogus")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
