//! Error taxonomy for the Dossier core and storage layers.
//!
//! The API layer maps these onto HTTP status codes; nothing here knows
//! about HTTP.

use thiserror::Error;

use crate::enums::{JobStatus, ResourceKind};
use crate::identity::EntityId;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Entity not found: {kind} with id {id}")]
    NotFound { kind: ResourceKind, id: EntityId },

    #[error("Duplicate {kind}: {reason}")]
    Duplicate { kind: ResourceKind, reason: String },

    #[error("Insert failed for {kind}: {reason}")]
    InsertFailed { kind: ResourceKind, reason: String },

    #[error("Update failed for {kind} with id {id}: {reason}")]
    UpdateFailed {
        kind: ResourceKind,
        id: EntityId,
        reason: String,
    },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors for malformed or semantically invalid input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Constraint violation on {constraint}: {reason}")]
    ConstraintViolation { constraint: String, reason: String },
}

/// Master error type for Dossier operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DossierError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A transition was attempted on a job already in a terminal state.
    #[error("Job {id} is {status} and cannot transition further")]
    TerminalState { id: EntityId, status: JobStatus },

    /// The requested status transition is not in the lifecycle state machine.
    #[error("Invalid job transition from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },
}

/// Result type alias for Dossier core operations.
pub type DossierResult<T> = Result<T, DossierError>;

impl DossierError {
    /// Convenience constructor for a missing-field validation error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        DossierError::Validation(ValidationError::RequiredFieldMissing {
            field: field.into(),
        })
    }

    /// Convenience constructor for an invalid-value validation error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DossierError::Validation(ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        })
    }
}
