//! Job Service
//!
//! Job creation, lookup, and lifecycle transitions.

use crate::error::{ApiError, ApiResult};
use dossier_core::{Job, JobTransition, ToolInput};
use dossier_storage::StorageTrait;
use uuid::Uuid;

/// Create a new job for a validated tool input.
pub fn create_job(storage: &dyn StorageTrait, user_id: Uuid, input: ToolInput) -> ApiResult<Job> {
    let job = Job::new(user_id, input)?;
    storage.job_insert(&job)?;
    tracing::info!(job_id = %job.id, tool = %job.tool, "Job created");
    Ok(job)
}

/// Get a job, scoped to its owner.
///
/// A job owned by someone else reads as not-found.
pub fn get_owned_job(storage: &dyn StorageTrait, user_id: Uuid, job_id: Uuid) -> ApiResult<Job> {
    storage
        .job_get(job_id)?
        .filter(|job| job.user_id == user_id)
        .ok_or_else(|| ApiError::entity_not_found("job", job_id))
}

/// List a user's jobs, newest first.
pub fn list_jobs(storage: &dyn StorageTrait, user_id: Uuid) -> ApiResult<Vec<Job>> {
    Ok(storage.job_list_by_user(user_id)?)
}

/// Apply a lifecycle transition reported by the executor.
///
/// The store validates and applies the transition atomically; this layer
/// only adds the ownership check.
pub fn transition_job(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    job_id: Uuid,
    transition: &JobTransition,
) -> ApiResult<Job> {
    get_owned_job(storage, user_id, job_id)?;
    let job = storage.job_apply_transition(job_id, transition)?;
    tracing::info!(job_id = %job.id, status = %job.status, "Job transitioned");
    Ok(job)
}
