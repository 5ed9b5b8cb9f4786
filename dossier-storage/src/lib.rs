//! Dossier Storage - Storage Trait and In-Memory Implementation
//!
//! Defines the storage abstraction for Dossier entities. The store is the
//! atomicity boundary the rest of the system relies on: job transitions
//! are validated and applied under the store's write lock, and the
//! (investigation_id, job_id) uniqueness constraint is enforced on insert.
//! A relational backend would plug in behind the same trait.

pub mod memory;

pub use memory::MemoryStorage;

use chrono::{DateTime, Utc};
use dossier_core::{
    AuditLog, BatchJob, BatchOperation, DossierResult, Investigation, InvestigationItem,
    InvestigationStatus, Job, JobTransition, Profile, Report, UserRole, Webhook, WebhookEvent,
};
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// UPDATE TYPES
// ============================================================================

/// Update payload for investigations.
#[derive(Debug, Clone, Default)]
pub struct InvestigationUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<InvestigationStatus>,
}

/// Update payload for reports.
#[derive(Debug, Clone, Default)]
pub struct ReportUpdate {
    pub title: Option<String>,
    pub is_public: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Update payload for webhooks.
#[derive(Debug, Clone, Default)]
pub struct WebhookUpdate {
    pub url: Option<String>,
    pub events: Option<Vec<WebhookEvent>>,
    pub headers: Option<BTreeMap<String, String>>,
    pub is_active: Option<bool>,
}

/// Update payload for profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub role: Option<UserRole>,
    pub is_suspended: Option<bool>,
}

// ============================================================================
// STORAGE TRAIT
// ============================================================================

/// Storage trait for Dossier entities.
///
/// All methods are row-scoped; ownership checks live in the service layer
/// above. Implementations must make `job_apply_transition` and
/// `item_insert` atomic with respect to concurrent callers.
pub trait StorageTrait: Send + Sync {
    // === Job Operations ===

    /// Insert a new job.
    fn job_insert(&self, job: &Job) -> DossierResult<()>;

    /// Get a job by ID.
    fn job_get(&self, id: Uuid) -> DossierResult<Option<Job>>;

    /// List jobs owned by a user, newest first.
    fn job_list_by_user(&self, user_id: Uuid) -> DossierResult<Vec<Job>>;

    /// Validate and apply a status transition under the write lock.
    ///
    /// This is the compare-and-swap point: of two concurrent terminal
    /// transitions on the same job, exactly one succeeds; the loser
    /// observes a `TerminalState` error.
    fn job_apply_transition(&self, id: Uuid, transition: &JobTransition) -> DossierResult<Job>;

    // === Investigation Operations ===

    /// Insert a new investigation.
    fn investigation_insert(&self, investigation: &Investigation) -> DossierResult<()>;

    /// Get an investigation by ID.
    fn investigation_get(&self, id: Uuid) -> DossierResult<Option<Investigation>>;

    /// List investigations owned by a user, most recently updated first.
    fn investigation_list_by_user(&self, user_id: Uuid) -> DossierResult<Vec<Investigation>>;

    /// Update an investigation.
    fn investigation_update(
        &self,
        id: Uuid,
        update: InvestigationUpdate,
    ) -> DossierResult<Investigation>;

    /// Delete an investigation. Cascades to its items and clears the
    /// `investigation_id` link on affected jobs; the jobs survive.
    fn investigation_delete(&self, id: Uuid) -> DossierResult<()>;

    // === Investigation Item Operations ===

    /// Insert an item linking a job into an investigation.
    ///
    /// Enforces uniqueness of (investigation_id, job_id) atomically and,
    /// in the same logical operation, sets the job's `investigation_id`
    /// if it is currently unset (first-writer-wins).
    fn item_insert(&self, item: &InvestigationItem) -> DossierResult<()>;

    /// List items of an investigation, most recently created first.
    fn item_list_by_investigation(
        &self,
        investigation_id: Uuid,
    ) -> DossierResult<Vec<InvestigationItem>>;

    // === Report Operations ===

    /// Insert a new report.
    fn report_insert(&self, report: &Report) -> DossierResult<()>;

    /// Get a report by ID.
    fn report_get(&self, id: Uuid) -> DossierResult<Option<Report>>;

    /// List reports owned by a user, most recently updated first.
    fn report_list_by_user(&self, user_id: Uuid) -> DossierResult<Vec<Report>>;

    /// Update a report.
    fn report_update(&self, id: Uuid, update: ReportUpdate) -> DossierResult<Report>;

    /// Delete a report.
    fn report_delete(&self, id: Uuid) -> DossierResult<()>;

    // === Batch Operations ===

    /// Insert a new batch job.
    fn batch_insert(&self, batch: &BatchJob) -> DossierResult<()>;

    /// Get a batch job by ID.
    fn batch_get(&self, id: Uuid) -> DossierResult<Option<BatchJob>>;

    /// List batch jobs owned by a user, newest first.
    fn batch_list_by_user(&self, user_id: Uuid) -> DossierResult<Vec<BatchJob>>;

    /// Delete a batch job and its operations (rollback hook for a failed
    /// multi-step create).
    fn batch_delete(&self, id: Uuid) -> DossierResult<()>;

    /// Insert one operation belonging to a batch job.
    fn operation_insert(&self, operation: &BatchOperation) -> DossierResult<()>;

    /// List operations of a batch job, highest priority first.
    fn operation_list_by_batch(&self, batch_job_id: Uuid) -> DossierResult<Vec<BatchOperation>>;

    // === Webhook Operations ===

    /// Insert a new webhook.
    fn webhook_insert(&self, webhook: &Webhook) -> DossierResult<()>;

    /// Get a webhook by ID.
    fn webhook_get(&self, id: Uuid) -> DossierResult<Option<Webhook>>;

    /// List webhooks owned by a user, newest first.
    fn webhook_list_by_user(&self, user_id: Uuid) -> DossierResult<Vec<Webhook>>;

    /// Update a webhook.
    fn webhook_update(&self, id: Uuid, update: WebhookUpdate) -> DossierResult<Webhook>;

    /// Delete a webhook.
    fn webhook_delete(&self, id: Uuid) -> DossierResult<()>;

    // === Profile Operations ===

    /// Insert a new profile.
    fn profile_insert(&self, profile: &Profile) -> DossierResult<()>;

    /// Get a profile by user ID.
    fn profile_get(&self, user_id: Uuid) -> DossierResult<Option<Profile>>;

    /// List all profiles, newest first.
    fn profile_list(&self) -> DossierResult<Vec<Profile>>;

    /// Update a profile.
    fn profile_update(&self, user_id: Uuid, update: ProfileUpdate) -> DossierResult<Profile>;

    /// Delete a profile.
    fn profile_delete(&self, user_id: Uuid) -> DossierResult<()>;

    // === Audit Operations ===

    /// Append an audit record.
    fn audit_append(&self, entry: &AuditLog) -> DossierResult<()>;

    /// List audit records for an actor, newest first.
    fn audit_list_by_actor(&self, actor_id: Uuid) -> DossierResult<Vec<AuditLog>>;
}
