//! Path parameter extractor for entity IDs.
//!
//! Wraps `Path<Uuid>` so that a malformed ID produces the standard error
//! envelope with a 400, instead of axum's plain-text rejection.

use crate::error::ApiError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// Extractor for a single UUID path parameter.
#[derive(Debug, Clone, Copy)]
pub struct PathUuid(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for PathUuid
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<Uuid> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::invalid_format("id", "valid UUID"))?;
        Ok(PathUuid(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/things/:id",
            get(|PathUuid(id): PathUuid| async move { id.to_string() }),
        )
    }

    #[tokio::test]
    async fn test_valid_uuid_extracted() {
        let id = Uuid::now_v7();
        let request = Request::builder()
            .uri(format!("/things/{}", id))
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_uuid_is_400() {
        let request = Request::builder()
            .uri("/things/not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INVALID_FORMAT");
    }
}
