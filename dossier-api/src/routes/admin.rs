//! Admin REST API Routes
//!
//! Oversight endpoints. The admin capability is resolved fresh from the
//! profile store inside the service layer on every request.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

use crate::{
    error::ApiResult,
    extractors::PathUuid,
    middleware::AuthExtractor,
    services::admin_service,
    state::AppState,
    types::{ApiResponse, ListAuditResponse, ListUsersResponse, UpdateUserRequest, UserResponse},
};

/// GET /api/v1/admin/users - List all user profiles
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/admin/users",
    tag = "Admin",
    responses(
        (status = 200, description = "List of users", body = ListUsersResponse),
        (status = 403, description = "Admin access required"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
) -> ApiResult<impl IntoResponse> {
    let users = admin_service::list_users(state.storage.as_ref(), auth.user_id)?;
    let total = users.len() as i64;
    Ok(Json(ApiResponse::new(ListUsersResponse { users, total })))
}

/// GET /api/v1/admin/users/{id} - Get one user profile
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/admin/users/{id}",
    tag = "Admin",
    params(("id" = uuid::Uuid, Path, description = "Target user ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Target user not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<impl IntoResponse> {
    let user = admin_service::get_user(state.storage.as_ref(), auth.user_id, id)?;
    Ok(Json(ApiResponse::new(UserResponse { user })))
}

/// PATCH /api/v1/admin/users/{id} - Change a user's role or suspension
#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/api/v1/admin/users/{id}",
    tag = "Admin",
    params(("id" = uuid::Uuid, Path, description = "Target user ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "No updates provided, or self-targeting guard"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Target user not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = admin_service::update_user(state.storage.as_ref(), auth.user_id, id, req)?;
    Ok(Json(ApiResponse::new(UserResponse { user })))
}

/// DELETE /api/v1/admin/users/{id} - Delete a user profile
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    tag = "Admin",
    params(("id" = uuid::Uuid, Path, description = "Target user ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Self-deletion refused"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Target user not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<axum::http::StatusCode> {
    admin_service::delete_user(state.storage.as_ref(), auth.user_id, id)?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/audit/{actor_id} - Read an actor's audit trail
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/admin/audit/{actor_id}",
    tag = "Admin",
    params(("actor_id" = uuid::Uuid, Path, description = "Actor user ID")),
    responses(
        (status = 200, description = "Audit entries, newest first", body = ListAuditResponse),
        (status = 403, description = "Admin access required"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn list_audit(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(actor_id): PathUuid,
) -> ApiResult<impl IntoResponse> {
    let entries = admin_service::list_audit(state.storage.as_ref(), auth.user_id, actor_id)?;
    let total = entries.len() as i64;
    Ok(Json(ApiResponse::new(ListAuditResponse { entries, total })))
}

/// Create the admin routes router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user).patch(update_user).delete(delete_user))
        .route("/audit/:actor_id", get(list_audit))
}
