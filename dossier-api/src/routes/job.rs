//! Job REST API Routes
//!
//! Job submission, lookup, and the transition endpoint the external
//! executor reports into.

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
    services::job_service,
    state::AppState,
    types::{ApiResponse, CreateJobRequest, JobResponse, ListJobsResponse},
};
use dossier_core::JobTransition;

/// POST /api/v1/jobs - Submit a new job
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/jobs",
    tag = "Jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Invalid tool input"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn create_job(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    Json(req): Json<CreateJobRequest>,
) -> ApiResult<impl IntoResponse> {
    let job = job_service::create_job(state.storage.as_ref(), auth.user_id, req.input)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(JobResponse { job })),
    ))
}

/// GET /api/v1/jobs - List the caller's jobs
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "List of jobs", body = ListJobsResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn list_jobs(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
) -> ApiResult<impl IntoResponse> {
    let jobs = job_service::list_jobs(state.storage.as_ref(), auth.user_id)?;
    let total = jobs.len() as i64;
    Ok(Json(ApiResponse::new(ListJobsResponse { jobs, total })))
}

/// GET /api/v1/jobs/{id} - Get one job
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    tag = "Jobs",
    params(("id" = uuid::Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job details", body = JobResponse),
        (status = 404, description = "Job not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn get_job(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
) -> ApiResult<impl IntoResponse> {
    let job = job_service::get_owned_job(state.storage.as_ref(), auth.user_id, id)?;
    Ok(Json(ApiResponse::new(JobResponse { job })))
}

/// POST /api/v1/jobs/{id}/transition - Apply a lifecycle transition
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/jobs/{id}/transition",
    tag = "Jobs",
    params(("id" = uuid::Uuid, Path, description = "Job ID")),
    request_body = JobTransition,
    responses(
        (status = 200, description = "Transition applied", body = JobResponse),
        (status = 400, description = "Invalid transition payload"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Job already terminal or transition unreachable"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
))]
pub async fn transition_job(
    State(state): State<AppState>,
    AuthExtractor(auth): AuthExtractor,
    PathUuid(id): PathUuid,
    Json(transition): Json<JobTransition>,
) -> ApiResult<impl IntoResponse> {
    let job = job_service::transition_job(state.storage.as_ref(), auth.user_id, id, &transition)?;
    Ok(Json(ApiResponse::new(JobResponse { job })))
}

/// Create the job routes router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_job).get(list_jobs))
        .route("/:id", get(get_job))
        .route("/:id/transition", post(transition_job))
}
