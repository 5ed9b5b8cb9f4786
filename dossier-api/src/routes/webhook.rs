//! Webhook REST API Routes
//!
//! Registration management for delivery endpoints. The creation response
//! is the only place the signing secret ever appears.

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
    services::webhook_service,
    state::AppState,
    types::{
        ApiResponse, CreateWebhookRequest, CreateWebhookResponse, ListWebhooksResponse,
        UpdateWebhookRequest, WebhookResponse, WebhookSummary,
    },
};

/// POST /api/v1/webhooks - Register a webhook
///
/// The response carries the signing secret exactly once.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/webhooks",
    tag = "Webhooks",
    request_body = CreateWebhookRequest,
    responses(
        (status = 201, description = "Webhook registered", body = CreateWebhookResponse),
        (status = 400, description = "Invalid URL, events, or secret"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn create_webhook(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    Json(req): Json<CreateWebhookRequest>,
) -> ApiResult<impl IntoResponse> {
    let webhook = webhook_service::create_webhook(state.storage.as_ref(), auth.user_id, req)?;
    let secret = webhook.secret.clone();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(CreateWebhookResponse {
            webhook: WebhookSummary::from(webhook),
            secret,
        })),
    ))
}

/// GET /api/v1/webhooks - List the caller's webhooks
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/webhooks",
    tag = "Webhooks",
    responses(
        (status = 200, description = "List of webhooks", body = ListWebhooksResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn list_webhooks(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
) -> ApiResult<impl IntoResponse> {
    let webhooks = webhook_service::list_webhooks(state.storage.as_ref(), auth.user_id)?;
    let total = webhooks.len() as i64;
    let webhooks = webhooks.into_iter().map(WebhookSummary::from).collect();
    Ok(Json(ApiResponse::new(ListWebhooksResponse {
        webhooks,
        total,
    })))
}

/// GET /api/v1/webhooks/{id} - Get one webhook
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/webhooks/{id}",
    tag = "Webhooks",
    params(("id" = uuid::Uuid, Path, description = "Webhook ID")),
    responses(
        (status = 200, description = "Webhook details", body = WebhookResponse),
        (status = 404, description = "Webhook not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn get_webhook(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<impl IntoResponse> {
    let webhook = webhook_service::get_owned_webhook(state.storage.as_ref(), auth.user_id, id)?;
    Ok(Json(ApiResponse::new(WebhookResponse {
        webhook: WebhookSummary::from(webhook),
    })))
}

/// PATCH /api/v1/webhooks/{id} - Update a webhook
#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/api/v1/webhooks/{id}",
    tag = "Webhooks",
    params(("id" = uuid::Uuid, Path, description = "Webhook ID")),
    request_body = UpdateWebhookRequest,
    responses(
        (status = 200, description = "Webhook updated", body = WebhookResponse),
        (status = 400, description = "No updates provided"),
        (status = 404, description = "Webhook not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn update_webhook(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
    Json(req): Json<UpdateWebhookRequest>,
) -> ApiResult<impl IntoResponse> {
    let webhook = webhook_service::update_webhook(state.storage.as_ref(), auth.user_id, id, req)?;
    Ok(Json(ApiResponse::new(WebhookResponse {
        webhook: WebhookSummary::from(webhook),
    })))
}

/// DELETE /api/v1/webhooks/{id} - Delete a webhook
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/api/v1/webhooks/{id}",
    tag = "Webhooks",
    params(("id" = uuid::Uuid, Path, description = "Webhook ID")),
    responses(
        (status = 204, description = "Webhook deleted"),
        (status = 404, description = "Webhook not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn delete_webhook(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<StatusCode> {
    webhook_service::delete_webhook(state.storage.as_ref(), auth.user_id, id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create the webhook routes router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_webhook).get(list_webhooks))
        .route(
            "/:id",
            get(get_webhook).patch(update_webhook).delete(delete_webhook),
        )
}
