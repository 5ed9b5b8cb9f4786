//! Investigation REST API Routes
//!
//! Investigation CRUD plus the item sub-resource that links jobs in.
//! Detail reads carry stats computed from live job state.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{patch, post},
    Json, Router,
};

use crate::{
    error::ApiResult,
    extractors::PathUuid,
    middleware::AuthExtractor,
    services::investigation_service,
    state::AppState,
    types::{
        ApiResponse, CreateInvestigationRequest, CreateItemRequest, InvestigationDetailResponse,
        InvestigationResponse, ItemResponse, ListInvestigationsResponse, ListItemsResponse,
        UpdateInvestigationRequest,
    },
};

/// POST /api/v1/investigations - Create an investigation
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/investigations",
    tag = "Investigations",
    request_body = CreateInvestigationRequest,
    responses(
        (status = 201, description = "Investigation created", body = InvestigationResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn create_investigation(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    Json(req): Json<CreateInvestigationRequest>,
) -> ApiResult<impl IntoResponse> {
    let investigation =
        investigation_service::create_investigation(state.storage.as_ref(), auth.user_id, req)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(InvestigationResponse { investigation })),
    ))
}

/// GET /api/v1/investigations - List the caller's investigations with stats
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/investigations",
    tag = "Investigations",
    responses(
        (status = 200, description = "List of investigations", body = ListInvestigationsResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn list_investigations(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
) -> ApiResult<impl IntoResponse> {
    let storage = state.storage.as_ref();
    let list = investigation_service::list_investigations(storage, auth.user_id)?;
    let mut investigations = Vec::with_capacity(list.len());
    for investigation in list {
        let stats = investigation_service::compute_stats(storage, investigation.id)?;
        investigations.push(InvestigationDetailResponse {
            investigation,
            stats,
        });
    }
    let total = investigations.len() as i64;
    Ok(Json(ApiResponse::new(ListInvestigationsResponse {
        investigations,
        total,
    })))
}

/// GET /api/v1/investigations/{id} - Get an investigation with stats
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/investigations/{id}",
    tag = "Investigations",
    params(("id" = uuid::Uuid, Path, description = "Investigation ID")),
    responses(
        (status = 200, description = "Investigation details", body = InvestigationDetailResponse),
        (status = 404, description = "Investigation not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn get_investigation(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<impl IntoResponse> {
    let storage = state.storage.as_ref();
    let investigation =
        investigation_service::get_owned_investigation(storage, auth.user_id, id)?;
    let stats = investigation_service::compute_stats(storage, id)?;
    Ok(Json(ApiResponse::new(InvestigationDetailResponse {
        investigation,
        stats,
    })))
}

/// PATCH /api/v1/investigations/{id} - Update an investigation
#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/api/v1/investigations/{id}",
    tag = "Investigations",
    params(("id" = uuid::Uuid, Path, description = "Investigation ID")),
    request_body = UpdateInvestigationRequest,
    responses(
        (status = 200, description = "Investigation updated", body = InvestigationResponse),
        (status = 400, description = "No updates provided"),
        (status = 404, description = "Investigation not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn update_investigation(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
    Json(req): Json<UpdateInvestigationRequest>,
) -> ApiResult<impl IntoResponse> {
    let investigation = investigation_service::update_investigation(
        state.storage.as_ref(),
        auth.user_id,
        id,
        req,
    )?;
    Ok(Json(ApiResponse::new(InvestigationResponse {
        investigation,
    })))
}

/// DELETE /api/v1/investigations/{id} - Delete an investigation
///
/// Items cascade; linked jobs survive with their link cleared.
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/api/v1/investigations/{id}",
    tag = "Investigations",
    params(("id" = uuid::Uuid, Path, description = "Investigation ID")),
    responses(
        (status = 204, description = "Investigation deleted"),
        (status = 404, description = "Investigation not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn delete_investigation(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<StatusCode> {
    investigation_service::delete_investigation(state.storage.as_ref(), auth.user_id, id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/investigations/{id}/items - Link a job into an investigation
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/investigations/{id}/items",
    tag = "Investigations",
    params(("id" = uuid::Uuid, Path, description = "Investigation ID")),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Job linked", body = ItemResponse),
        (status = 404, description = "Investigation or job not found"),
        (status = 409, description = "Job already linked to this investigation"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn add_item(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
    Json(req): Json<CreateItemRequest>,
) -> ApiResult<impl IntoResponse> {
    let item = investigation_service::add_item(state.storage.as_ref(), auth.user_id, id, req)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ItemResponse { item })),
    ))
}

/// GET /api/v1/investigations/{id}/items - List an investigation's items
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/investigations/{id}/items",
    tag = "Investigations",
    params(("id" = uuid::Uuid, Path, description = "Investigation ID")),
    responses(
        (status = 200, description = "List of items", body = ListItemsResponse),
        (status = 404, description = "Investigation not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<impl IntoResponse> {
    let items = investigation_service::list_items(state.storage.as_ref(), auth.user_id, id)?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::new(ListItemsResponse { items, total })))
}

/// Create the investigation routes router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_investigation).get(list_investigations))
        .route(
            "/:id",
            patch(update_investigation)
                .get(get_investigation)
                .delete(delete_investigation),
        )
        .route("/:id/items", post(add_item).get(list_items))
}
