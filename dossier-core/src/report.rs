//! Report entity and its access state machine.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::enums::ReportTemplate;
use crate::identity::{new_entity_id, EntityId, Timestamp};
use crate::tool::ToolKind;

/// Earliest and latest job creation among included jobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DateRange {
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub start: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub end: Timestamp,
}

/// Generation metadata captured when a report is compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReportMetadata {
    /// Distinct tools whose jobs appear in the report.
    pub tools_used: Vec<ToolKind>,
    pub date_range: Option<DateRange>,
    pub item_count: i64,
}

/// One section of a compiled report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReportSection {
    pub heading: String,
    pub body: String,
    /// Jobs whose results back this section.
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Uuid>))]
    pub job_ids: Vec<EntityId>,
}

/// Access state derived from the `is_public`/`expires_at` pair at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAccess {
    /// Only the owning user may read, via the authenticated path.
    Private,
    /// Anyone may read through the public path.
    PublicUnexpired,
    /// The public flag is still set but the expiry has passed: the public
    /// path is closed for everyone, including the owner.
    PublicExpired,
}

/// A structured export of an investigation. Rendering to PDF/CSV/HTML is
/// an external responsibility; this is the read model it consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Report {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub user_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub investigation_id: EntityId,
    pub title: String,
    pub template: ReportTemplate,
    pub metadata: ReportMetadata,
    pub sections: Vec<ReportSection>,
    pub is_public: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<DateTime<Utc>>))]
    pub expires_at: Option<Timestamp>,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub updated_at: Timestamp,
}

impl Report {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: EntityId,
        investigation_id: EntityId,
        title: impl Into<String>,
        template: ReportTemplate,
        metadata: ReportMetadata,
        sections: Vec<ReportSection>,
        is_public: bool,
        expires_at: Option<Timestamp>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_entity_id(),
            user_id,
            investigation_id,
            title: title.into(),
            template,
            metadata,
            sections,
            is_public,
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// The access state at `now`. `expires_at` is honored strictly: a
    /// public report at or past its expiry is inaccessible through the
    /// public path regardless of who asks.
    pub fn access_state(&self, now: Timestamp) -> ReportAccess {
        if !self.is_public {
            return ReportAccess::Private;
        }
        match self.expires_at {
            Some(expires_at) if now >= expires_at => ReportAccess::PublicExpired,
            _ => ReportAccess::PublicUnexpired,
        }
    }
}
