//! Report REST API Routes
//!
//! The whole subtree runs behind optional authentication: handlers that
//! require identity use `AuthExtractor`, which fails closed with 401 when
//! no context was injected, while the single-report read accepts anonymous
//! callers so shared links work without an account.

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
    middleware::{AuthExtractor, OptionalAuthExtractor},
    services::report_service,
    state::AppState,
    types::{
        ApiResponse, CreateReportRequest, ListReportsResponse, ReportResponse, UpdateReportRequest,
    },
};

/// POST /api/v1/reports - Compile a report from an investigation
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/reports",
    tag = "Reports",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report compiled", body = ReportResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Investigation not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn create_report(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    Json(req): Json<CreateReportRequest>,
) -> ApiResult<impl IntoResponse> {
    let report = report_service::compile_report(state.storage.as_ref(), auth.user_id, req)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ReportResponse { report })),
    ))
}

/// GET /api/v1/reports - List the caller's reports
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "Reports",
    responses(
        (status = 200, description = "List of reports", body = ListReportsResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn list_reports(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
) -> ApiResult<impl IntoResponse> {
    let reports = report_service::list_reports(state.storage.as_ref(), auth.user_id)?;
    let total = reports.len() as i64;
    Ok(Json(ApiResponse::new(ListReportsResponse {
        reports,
        total,
    })))
}

/// GET /api/v1/reports/{id} - Read a report
///
/// Public, unexpired reports are readable without authentication; private
/// reports require the owner's token. An expired public link is 403 for
/// everyone until the owner re-shares.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    params(("id" = uuid::Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report contents", body = ReportResponse),
        (status = 403, description = "Public link expired"),
        (status = 404, description = "Report not found"),
    ),
    security((), ("bearer_auth" = []))
))]
pub async fn get_report(
    State(state): State<AppState>,
    OptionalAuthExtractor(auth): OptionalAuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<impl IntoResponse> {
    let requester = auth.map(|context| context.user_id);
    let report = report_service::get_report_checked(state.storage.as_ref(), requester, id)?;
    Ok(Json(ApiResponse::new(ReportResponse { report })))
}

/// PATCH /api/v1/reports/{id} - Update a report's title or sharing settings
#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    params(("id" = uuid::Uuid, Path, description = "Report ID")),
    request_body = UpdateReportRequest,
    responses(
        (status = 200, description = "Report updated", body = ReportResponse),
        (status = 400, description = "No updates provided"),
        (status = 404, description = "Report not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn update_report(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
    Json(req): Json<UpdateReportRequest>,
) -> ApiResult<impl IntoResponse> {
    let report = report_service::update_report(state.storage.as_ref(), auth.user_id, id, req)?;
    Ok(Json(ApiResponse::new(ReportResponse { report })))
}

/// DELETE /api/v1/reports/{id} - Delete a report
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    params(("id" = uuid::Uuid, Path, description = "Report ID")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 404, description = "Report not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn delete_report(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<StatusCode> {
    report_service::delete_report(state.storage.as_ref(), auth.user_id, id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create the report routes router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_report).get(list_reports))
        .route(
            "/:id",
            get(get_report).patch(update_report).delete(delete_report),
        )
}
