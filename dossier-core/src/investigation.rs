//! Investigation, investigation items, and read-time statistics.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::enums::{InvestigationStatus, JobStatus};
use crate::identity::{new_entity_id, EntityId, Timestamp};

/// A named, user-owned grouping of jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Investigation {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub user_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    /// Order-preserving, deduplicated (first occurrence wins).
    pub tags: Vec<String>,
    pub status: InvestigationStatus,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub updated_at: Timestamp,
}

impl Investigation {
    pub fn new(
        user_id: EntityId,
        name: impl Into<String>,
        description: Option<String>,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_entity_id(),
            user_id,
            name: name.into(),
            description,
            tags: normalize_tags(tags),
            status: InvestigationStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The annotated link between a job and an investigation.
///
/// The pair (investigation_id, job_id) is unique; the store enforces this
/// atomically on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InvestigationItem {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub investigation_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub job_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub user_id: EntityId,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub created_at: Timestamp,
}

impl InvestigationItem {
    pub fn new(
        investigation_id: EntityId,
        job_id: EntityId,
        user_id: EntityId,
        notes: Option<String>,
        tags: Vec<String>,
        is_favorite: bool,
    ) -> Self {
        Self {
            id: new_entity_id(),
            investigation_id,
            job_id,
            user_id,
            notes,
            tags: normalize_tags(tags),
            is_favorite,
            created_at: Utc::now(),
        }
    }
}

/// Derived statistics over the jobs linked into an investigation.
///
/// Computed at read time, never persisted, so they are always consistent
/// with live job state. `pending_jobs` counts Pending and Running jobs in
/// one user-facing bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InvestigationStats {
    pub total_items: i64,
    pub completed_jobs: i64,
    pub pending_jobs: i64,
    pub failed_jobs: i64,
}

impl InvestigationStats {
    /// Compute stats from the statuses of the linked jobs (one entry per
    /// item). Under the current status set the three buckets sum to
    /// `total_items` exactly.
    pub fn compute(statuses: &[JobStatus]) -> Self {
        let mut stats = Self {
            total_items: statuses.len() as i64,
            ..Self::default()
        };
        for status in statuses {
            match status {
                JobStatus::Pending | JobStatus::Running => stats.pending_jobs += 1,
                JobStatus::Completed => stats.completed_jobs += 1,
                JobStatus::Failed => stats.failed_jobs += 1,
            }
        }
        stats
    }
}

/// Normalize a tag list: trim whitespace, drop empties, and deduplicate
/// while preserving first-occurrence order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
