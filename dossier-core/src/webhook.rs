//! Webhook registration entity.
//!
//! Dossier stores delivery endpoints and per-user event subscriptions.
//! Actual delivery and payload signing happen outside this codebase; the
//! counters exist so an external dispatcher can record outcomes.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::enums::WebhookEvent;
use crate::identity::{new_entity_id, EntityId, Timestamp};

/// A registered delivery endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Webhook {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub user_id: EntityId,
    pub url: String,
    /// Non-empty set of subscribed events.
    pub events: Vec<WebhookEvent>,
    /// Shared secret for payload signing. Generated server-side when the
    /// caller does not supply one; exposed only in the creation response.
    pub secret: String,
    /// Custom headers sent with every delivery.
    pub headers: BTreeMap<String, String>,
    pub is_active: bool,
    pub total_deliveries: i64,
    pub success_count: i64,
    pub failure_count: i64,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<DateTime<Utc>>))]
    pub last_delivery_at: Option<Timestamp>,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = DateTime<Utc>))]
    pub updated_at: Timestamp,
}

impl Webhook {
    pub fn new(
        user_id: EntityId,
        url: impl Into<String>,
        events: Vec<WebhookEvent>,
        secret: impl Into<String>,
        headers: BTreeMap<String, String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_entity_id(),
            user_id,
            url: url.into(),
            events,
            secret: secret.into(),
            headers,
            is_active: true,
            total_deliveries: 0,
            success_count: 0,
            failure_count: 0,
            last_delivery_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this webhook subscribes to `event` (wildcard included).
    pub fn subscribes_to(&self, event: WebhookEvent) -> bool {
        self.events
            .iter()
            .any(|e| *e == WebhookEvent::All || *e == event)
    }
}
