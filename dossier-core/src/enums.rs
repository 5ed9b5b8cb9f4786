//! Status enums and discriminators shared across entities.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a job (one invocation of an external OSINT tool).
///
/// Jobs are created `Pending`, moved to `Running` by the external executor,
/// and end in exactly one terminal state. Terminal states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Terminal statuses permit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Whether a transition from `self` to `next` is permitted by the
    /// lifecycle state machine. Self-transitions to `Running` are allowed
    /// so the executor can report progress updates.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        match (self, next) {
            (JobStatus::Pending, JobStatus::Running) => true,
            (JobStatus::Pending, JobStatus::Completed) => true,
            (JobStatus::Pending, JobStatus::Failed) => true,
            (JobStatus::Running, JobStatus::Running) => true,
            (JobStatus::Running, JobStatus::Completed) => true,
            (JobStatus::Running, JobStatus::Failed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Status of an investigation. Transitions are user-driven, not
/// system-driven; any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum InvestigationStatus {
    Active,
    Completed,
    Archived,
}

/// Status of a batch job. Schema-level only: no executor drives these
/// transitions in this codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Pending,
    Running,
    Completed,
    Failed,
    PartiallyCompleted,
}

/// Status of a single operation within a batch job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Skipped,
}

/// Report rendering template selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ReportTemplate {
    Standard,
    Executive,
    Technical,
}

impl Default for ReportTemplate {
    fn default() -> Self {
        ReportTemplate::Standard
    }
}

/// Role of a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
}

/// Webhook event subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum WebhookEvent {
    /// All events (wildcard)
    #[serde(rename = "*")]
    All,
    JobCompleted,
    JobFailed,
    InvestigationUpdated,
    ReportGenerated,
}

/// Resource discriminator for audit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Job,
    Investigation,
    InvestigationItem,
    Report,
    BatchJob,
    Webhook,
    Profile,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResourceKind::Job => "job",
            ResourceKind::Investigation => "investigation",
            ResourceKind::InvestigationItem => "investigation_item",
            ResourceKind::Report => "report",
            ResourceKind::BatchJob => "batch_job",
            ResourceKind::Webhook => "webhook",
            ResourceKind::Profile => "profile",
        };
        write!(f, "{}", s)
    }
}
