//! Report request/response types.

use crate::validation::HasUpdates;
use dossier_core::{EntityId, Report, ReportTemplate, Timestamp};
use serde::{Deserialize, Serialize};

/// Request to compile a report from an investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateReportRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub investigation_id: EntityId,
    pub title: String,
    #[serde(default)]
    pub template: ReportTemplate,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<DateTime<Utc>>))]
    pub expires_at: Option<Timestamp>,
}

/// Partial update for a report's sharing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateReportRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<DateTime<Utc>>))]
    pub expires_at: Option<Timestamp>,
}

impl HasUpdates for UpdateReportRequest {
    fn has_any_updates(&self) -> bool {
        self.title.is_some() || self.is_public.is_some() || self.expires_at.is_some()
    }
}

/// Response containing a single report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReportResponse {
    pub report: Report,
}

/// Response containing a list of reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListReportsResponse {
    pub reports: Vec<Report>,
    pub total: i64,
}
