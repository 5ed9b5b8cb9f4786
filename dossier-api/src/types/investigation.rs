//! Investigation and investigation-item request/response types.

use crate::validation::HasUpdates;
use dossier_core::{
    EntityId, Investigation, InvestigationItem, InvestigationStats, InvestigationStatus,
};
use serde::{Deserialize, Serialize};

/// Request to create a new investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateInvestigationRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for an investigation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateInvestigationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<InvestigationStatus>,
}

impl HasUpdates for UpdateInvestigationRequest {
    fn has_any_updates(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.tags.is_some()
            || self.status.is_some()
    }
}

/// Response containing a single investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InvestigationResponse {
    pub investigation: Investigation,
}

/// Detailed investigation view: the entity plus read-time statistics
/// computed from live job state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InvestigationDetailResponse {
    pub investigation: Investigation,
    pub stats: InvestigationStats,
}

/// Response containing a list of investigations with their stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListInvestigationsResponse {
    pub investigations: Vec<InvestigationDetailResponse>,
    pub total: i64,
}

/// Request to link a job into an investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateItemRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub job_id: EntityId,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Response containing a single investigation item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ItemResponse {
    pub item: InvestigationItem,
}

/// Response containing the items of an investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListItemsResponse {
    pub items: Vec<InvestigationItem>,
    pub total: i64,
}
