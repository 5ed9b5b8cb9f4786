//! Admin oversight request/response types.

use crate::validation::HasUpdates;
use dossier_core::{AuditLog, Profile, UserRole};
use serde::{Deserialize, Serialize};

/// Admin update to a user profile (role change, suspend/unsuspend).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub is_suspended: Option<bool>,
}

impl HasUpdates for UpdateUserRequest {
    fn has_any_updates(&self) -> bool {
        self.role.is_some() || self.is_suspended.is_some()
    }
}

/// Response containing a single user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    pub user: Profile,
}

/// Response containing a list of user profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListUsersResponse {
    pub users: Vec<Profile>,
    pub total: i64,
}

/// Response containing an actor's audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListAuditResponse {
    pub entries: Vec<AuditLog>,
    pub total: i64,
}
