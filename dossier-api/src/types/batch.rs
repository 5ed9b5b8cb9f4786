//! Batch job request/response types.

use dossier_core::{BatchJob, BatchOperation, BatchOptions, ToolInput};
use serde::{Deserialize, Serialize};

/// One operation within a batch creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchOperationRequest {
    /// Tool input, tagged by tool kind
    pub input: ToolInput,
    /// Dispatch priority; higher runs first
    #[serde(default)]
    pub priority: i32,
}

/// Request to create a batch job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateBatchRequest {
    pub name: String,
    pub operations: Vec<BatchOperationRequest>,
    #[serde(default)]
    pub options: BatchOptions,
}

/// Response containing a single batch job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchResponse {
    pub batch: BatchJob,
}

/// Detailed batch view: the batch plus its queued operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchDetailResponse {
    pub batch: BatchJob,
    pub operations: Vec<BatchOperation>,
}

/// Response containing a list of batch jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListBatchesResponse {
    pub batches: Vec<BatchJob>,
    pub total: i64,
}
