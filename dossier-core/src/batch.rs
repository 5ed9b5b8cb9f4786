//! Batch job and batch operation schemas.
//!
//! Schema-level only: batch execution has no worker in this codebase. The
//! types, validation, and the intended completion invariant are defined so
//! an executor can be added without changing the data model.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::enums::{BatchStatus, OperationStatus};
use crate::error::{DossierError, DossierResult};
use crate::identity::{new_entity_id, EntityId, Timestamp};
use crate::tool::ToolInput;

/// Execution options for a batch job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchOptions {
    /// Concurrent operations an executor may run (1-10).
    pub parallelism: i32,
    /// Stop dispatching new operations after the first failure.
    pub stop_on_error: bool,
    /// Per-operation retry budget (0-5).
    pub max_retries: i32,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallelism: 1,
            stop_on_error: false,
            max_retries: 0,
        }
    }
}

impl BatchOptions {
    pub fn validate(&self) -> DossierResult<()> {
        if !(1..=10).contains(&self.parallelism) {
            return Err(DossierError::invalid_value(
                "parallelism",
                "must be between 1 and 10",
            ));
        }
        if !(0..=5).contains(&self.max_retries) {
            return Err(DossierError::invalid_value(
                "max_retries",
                "must be between 0 and 5",
            ));
        }
        Ok(())
    }
}

/// A requested fan-out of tool operations.
///
/// Intended invariant (unenforced here, no executor in scope): the batch
/// reaches a terminal status exactly when every operation has reached one.
/// All operations Completed means `Completed`; any failures mean `Failed`
/// or `PartiallyCompleted` depending on whether some succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchJob {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub user_id: EntityId,
    pub name: String,
    pub status: BatchStatus,
    pub total_operations: i32,
    pub options: BatchOptions,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub updated_at: Timestamp,
}

impl BatchJob {
    pub fn new(
        user_id: EntityId,
        name: impl Into<String>,
        total_operations: i32,
        options: BatchOptions,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_entity_id(),
            user_id,
            name: name.into(),
            status: BatchStatus::Pending,
            total_operations,
            options,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One requested tool call within a batch job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchOperation {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub batch_job_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub user_id: EntityId,
    pub input: ToolInput,
    pub status: OperationStatus,
    /// Higher priority operations are dispatched first.
    pub priority: i32,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub created_at: Timestamp,
}

impl BatchOperation {
    pub fn new(
        batch_job_id: EntityId,
        user_id: EntityId,
        input: ToolInput,
        priority: i32,
    ) -> Self {
        Self {
            id: new_entity_id(),
            batch_job_id,
            user_id,
            input,
            status: OperationStatus::Queued,
            priority,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_valid() {
        assert!(BatchOptions::default().validate().is_ok());
    }

    #[test]
    fn test_parallelism_bounds() {
        let mut options = BatchOptions::default();
        options.parallelism = 0;
        assert!(options.validate().is_err());
        options.parallelism = 11;
        assert!(options.validate().is_err());
        options.parallelism = 10;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_retry_bounds() {
        let mut options = BatchOptions::default();
        options.max_retries = -1;
        assert!(options.validate().is_err());
        options.max_retries = 6;
        assert!(options.validate().is_err());
        options.max_retries = 5;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_new_batch_job_pending() {
        let batch = BatchJob::new(new_entity_id(), "sweep", 3, BatchOptions::default());
        assert_eq!(batch.status, BatchStatus::Pending);
        assert_eq!(batch.total_operations, 3);
    }

    #[test]
    fn test_new_operation_queued() {
        let batch = BatchJob::new(new_entity_id(), "sweep", 1, BatchOptions::default());
        let op = BatchOperation::new(
            batch.id,
            batch.user_id,
            ToolInput::DomainRecon {
                domain: "example.com".to_string(),
            },
            0,
        );
        assert_eq!(op.status, OperationStatus::Queued);
        assert_eq!(op.batch_job_id, batch.id);
    }
}
