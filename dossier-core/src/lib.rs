//! Dossier Core - Entity Types
//!
//! Pure data structures and invariant rules for the Dossier platform.
//! This crate contains data types and pure validation logic only - no I/O,
//! no storage, no HTTP. All other crates depend on this.

pub mod batch;
pub mod enums;
pub mod error;
pub mod identity;
pub mod investigation;
pub mod job;
pub mod profile;
pub mod report;
pub mod tool;
pub mod webhook;

pub use batch::{BatchJob, BatchOperation, BatchOptions};
pub use enums::{
    BatchStatus, InvestigationStatus, JobStatus, OperationStatus, ReportTemplate, ResourceKind,
    UserRole, WebhookEvent,
};
pub use error::{DossierError, DossierResult, StorageError, ValidationError};
pub use identity::{new_entity_id, EntityId, Timestamp};
pub use investigation::{
    normalize_tags, Investigation, InvestigationItem, InvestigationStats,
};
pub use job::{apply_transition, validate_transition, Job, JobTransition};
pub use profile::{AuditLog, Profile};
pub use report::{DateRange, Report, ReportAccess, ReportMetadata, ReportSection};
pub use tool::{DnsRecord, FoundAccount, ToolInput, ToolKind, ToolOutput};
pub use webhook::Webhook;
