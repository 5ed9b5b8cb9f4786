//! Job entity and lifecycle transition rules.
//!
//! A job records one invocation of an external OSINT tool. The external
//! executor drives its status; this module owns the pure rules the store
//! enforces under its write lock.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::enums::JobStatus;
use crate::error::{DossierError, DossierResult};
use crate::identity::{new_entity_id, EntityId, Timestamp};
use crate::tool::{ToolInput, ToolKind, ToolOutput};

/// One recorded invocation of an external OSINT tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Job {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub user_id: EntityId,
    pub tool: ToolKind,
    pub status: JobStatus,
    /// 0-100, monotonic non-decreasing while Running.
    pub progress: i32,
    pub input: ToolInput,
    /// Populated only in terminal states.
    pub output: Option<ToolOutput>,
    /// Non-null iff status is Failed.
    pub error_message: Option<String>,
    /// Set by the investigation-item linker; a job belongs to at most one
    /// investigation at a time.
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Uuid>))]
    pub investigation_id: Option<EntityId>,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub updated_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<DateTime<Utc>>))]
    pub completed_at: Option<Timestamp>,
}

impl Job {
    /// Create a new job in `Pending` for a validated tool input.
    pub fn new(user_id: EntityId, input: ToolInput) -> DossierResult<Self> {
        input.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: new_entity_id(),
            user_id,
            tool: input.kind(),
            status: JobStatus::Pending,
            progress: 0,
            input,
            output: None,
            error_message: None,
            investigation_id: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        })
    }
}

/// A requested status transition, as reported by the external executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JobTransition {
    pub status: JobStatus,
    /// Progress update, meaningful only while Running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
    /// Required when transitioning to Completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ToolOutput>,
    /// Required when transitioning to Failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl JobTransition {
    pub fn running(progress: i32) -> Self {
        Self {
            status: JobStatus::Running,
            progress: Some(progress),
            output: None,
            error_message: None,
        }
    }

    pub fn completed(output: ToolOutput) -> Self {
        Self {
            status: JobStatus::Completed,
            progress: None,
            output: Some(output),
            error_message: None,
        }
    }

    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Failed,
            progress: None,
            output: None,
            error_message: Some(error_message.into()),
        }
    }
}

/// Validate a transition against the current job state.
///
/// Rules:
/// - terminal jobs accept no transition at all;
/// - the target status must be reachable in the lifecycle state machine;
/// - Completed requires an output, Failed requires an error message;
/// - progress must stay within 0-100 and never decrease while Running.
pub fn validate_transition(job: &Job, transition: &JobTransition) -> DossierResult<()> {
    if job.status.is_terminal() {
        return Err(DossierError::TerminalState {
            id: job.id,
            status: job.status,
        });
    }

    if !job.status.can_transition_to(transition.status) {
        return Err(DossierError::InvalidTransition {
            from: job.status,
            to: transition.status,
        });
    }

    match transition.status {
        JobStatus::Completed => {
            if transition.output.is_none() {
                return Err(DossierError::missing_field("output"));
            }
        }
        JobStatus::Failed => {
            match transition.error_message.as_deref() {
                Some(msg) if !msg.trim().is_empty() => {}
                _ => return Err(DossierError::missing_field("error_message")),
            }
        }
        JobStatus::Running => {
            if let Some(progress) = transition.progress {
                if !(0..=100).contains(&progress) {
                    return Err(DossierError::invalid_value(
                        "progress",
                        "must be between 0 and 100",
                    ));
                }
                if progress < job.progress {
                    return Err(DossierError::invalid_value(
                        "progress",
                        "must not decrease while running",
                    ));
                }
            }
        }
        JobStatus::Pending => {}
    }

    Ok(())
}

/// Apply a validated transition, returning the updated job.
///
/// Completed forces progress to 100; Failed freezes the last observed
/// value. A progress value supplied alongside a terminal transition is
/// ignored.
pub fn apply_transition(mut job: Job, transition: &JobTransition) -> DossierResult<Job> {
    validate_transition(&job, transition)?;

    let now = Utc::now();
    job.status = transition.status;
    job.updated_at = now;

    match transition.status {
        JobStatus::Running => {
            if let Some(progress) = transition.progress {
                job.progress = progress;
            }
        }
        JobStatus::Completed => {
            job.progress = 100;
            job.output = transition.output.clone();
            job.completed_at = Some(now);
        }
        JobStatus::Failed => {
            job.error_message = transition.error_message.clone();
            job.completed_at = Some(now);
        }
        JobStatus::Pending => {}
    }

    Ok(job)
}
