//! User profiles and audit records.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{ResourceKind, UserRole};
use crate::identity::{new_entity_id, EntityId, Timestamp};

/// A user profile. Authentication happens outside this codebase; the
/// profile row carries the authorization-relevant state (role, suspension).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Profile {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub user_id: EntityId,
    pub email: String,
    pub display_name: Option<String>,
    pub role: UserRole,
    pub is_suspended: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub updated_at: Timestamp,
}

impl Profile {
    pub fn new(user_id: EntityId, email: impl Into<String>, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email: email.into(),
            display_name: None,
            role,
            is_suspended: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this profile currently holds the admin capability.
    /// Evaluated fresh per request; never cached in a token.
    pub fn is_active_admin(&self) -> bool {
        self.role == UserRole::Admin && !self.is_suspended
    }
}

/// Append-only audit record for privileged mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuditLog {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub actor_id: EntityId,
    pub action: String,
    pub resource_type: ResourceKind,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Uuid>))]
    pub resource_id: Option<EntityId>,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub metadata: Value,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub created_at: Timestamp,
}

impl AuditLog {
    pub fn new(
        actor_id: EntityId,
        action: impl Into<String>,
        resource_type: ResourceKind,
        resource_id: Option<EntityId>,
        metadata: Value,
    ) -> Self {
        Self {
            id: new_entity_id(),
            actor_id,
            action: action.into(),
            resource_type,
            resource_id,
            metadata,
            created_at: Utc::now(),
        }
    }
}
