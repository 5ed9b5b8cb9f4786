//! Job request/response types.

use dossier_core::{Job, ToolInput};
use serde::{Deserialize, Serialize};

/// Request to create a new job.
///
/// The tool kind is implied by the tagged input payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateJobRequest {
    /// Tool input, tagged by tool kind
    pub input: ToolInput,
}

/// Response containing a single job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JobResponse {
    pub job: Job,
}

/// Response containing a list of jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListJobsResponse {
    pub jobs: Vec<Job>,
    pub total: i64,
}
