//! Batch REST API Routes
//!
//! Batch submission and inspection. There is no executor in this
//! codebase; accepted batches sit in Pending until one picks them up.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::ApiResult,
    extractors::PathUuid,
    middleware::AuthExtractor,
    services::batch_service,
    state::AppState,
    types::{ApiResponse, BatchDetailResponse, CreateBatchRequest, ListBatchesResponse},
};

/// POST /api/v1/batch - Submit a batch of tool operations
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/batch",
    tag = "Batches",
    request_body = CreateBatchRequest,
    responses(
        (status = 201, description = "Batch accepted", body = BatchDetailResponse),
        (status = 400, description = "Invalid batch request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn create_batch(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    Json(req): Json<CreateBatchRequest>,
) -> ApiResult<impl IntoResponse> {
    let (batch, operations) =
        batch_service::create_batch(state.storage.as_ref(), auth.user_id, req)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(BatchDetailResponse { batch, operations })),
    ))
}

/// GET /api/v1/batch - List the caller's batches
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/batch",
    tag = "Batches",
    responses(
        (status = 200, description = "List of batches", body = ListBatchesResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn list_batches(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
) -> ApiResult<impl IntoResponse> {
    let batches = batch_service::list_batches(state.storage.as_ref(), auth.user_id)?;
    let total = batches.len() as i64;
    Ok(Json(ApiResponse::new(ListBatchesResponse {
        batches,
        total,
    })))
}

/// GET /api/v1/batch/{id} - Get a batch with its operations
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/batch/{id}",
    tag = "Batches",
    params(("id" = uuid::Uuid, Path, description = "Batch job ID")),
    responses(
        (status = 200, description = "Batch details", body = BatchDetailResponse),
        (status = 404, description = "Batch not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn get_batch(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<impl IntoResponse> {
    let (batch, operations) =
        batch_service::get_batch_detail(state.storage.as_ref(), auth.user_id, id)?;
    Ok(Json(ApiResponse::new(BatchDetailResponse {
        batch,
        operations,
    })))
}

/// Create the batch routes router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_batch).get(list_batches))
        .route("/:id", get(get_batch))
}
