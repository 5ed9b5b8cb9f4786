//! Batch Service
//!
//! Accepts and stores batch job requests. Everything is validated before
//! anything is written; a partial write after a mid-insert failure is
//! rolled back best-effort.

use crate::error::{ApiError, ApiResult};
use crate::types::CreateBatchRequest;
use crate::validation::ValidateNonEmpty;
use dossier_core::{BatchJob, BatchOperation};
use dossier_storage::StorageTrait;
use uuid::Uuid;

/// Upper bound on operations per batch.
const MAX_OPERATIONS: usize = 100;

/// Create a batch job with its operations.
pub fn create_batch(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    request: CreateBatchRequest,
) -> ApiResult<(BatchJob, Vec<BatchOperation>)> {
    request.name.validate_non_empty("name")?;
    if request.operations.is_empty() {
        return Err(ApiError::validation_failed(
            "Batch must contain at least one operation",
        ));
    }
    if request.operations.len() > MAX_OPERATIONS {
        return Err(ApiError::invalid_range(
            "operations",
            1,
            MAX_OPERATIONS,
        ));
    }
    request.options.validate()?;
    for op in &request.operations {
        op.input.validate()?;
    }

    let batch = BatchJob::new(
        user_id,
        request.name,
        request.operations.len() as i32,
        request.options,
    );
    storage.batch_insert(&batch)?;

    let mut operations = Vec::with_capacity(request.operations.len());
    for op in request.operations {
        let operation = BatchOperation::new(batch.id, user_id, op.input, op.priority);
        if let Err(err) = storage.operation_insert(&operation) {
            // Partial batches are worse than no batch at all.
            if let Err(cleanup_err) = storage.batch_delete(batch.id) {
                tracing::warn!(
                    batch_id = %batch.id,
                    error = %cleanup_err,
                    "Failed to roll back partially created batch"
                );
            }
            return Err(err.into());
        }
        operations.push(operation);
    }

    tracing::info!(
        batch_id = %batch.id,
        operations = operations.len(),
        "Batch created"
    );
    Ok((batch, operations))
}

/// Get a batch, scoped to its owner.
pub fn get_owned_batch(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    batch_id: Uuid,
) -> ApiResult<BatchJob> {
    storage
        .batch_get(batch_id)?
        .filter(|batch| batch.user_id == user_id)
        .ok_or_else(|| ApiError::entity_not_found("batch job", batch_id))
}

/// Get a batch with its operations, priority order.
pub fn get_batch_detail(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    batch_id: Uuid,
) -> ApiResult<(BatchJob, Vec<BatchOperation>)> {
    let batch = get_owned_batch(storage, user_id, batch_id)?;
    let operations = storage.operation_list_by_batch(batch_id)?;
    Ok((batch, operations))
}

/// List a user's batch jobs, newest first.
pub fn list_batches(storage: &dyn StorageTrait, user_id: Uuid) -> ApiResult<Vec<BatchJob>> {
    Ok(storage.batch_list_by_user(user_id)?)
}
