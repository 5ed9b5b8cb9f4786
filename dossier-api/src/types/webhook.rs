//! Webhook request/response types.
//!
//! The signing secret appears only in the creation response. Reads and
//! lists use `WebhookSummary`, which never carries the secret.

use crate::validation::HasUpdates;
use dossier_core::{EntityId, Timestamp, Webhook, WebhookEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request to register a new webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateWebhookRequest {
    /// Target URL for webhook delivery
    pub url: String,
    /// Event types to subscribe to (use ["*"] for all events)
    pub events: Vec<WebhookEvent>,
    /// Signing secret; generated server-side when omitted
    #[serde(default)]
    pub secret: Option<String>,
    /// Custom headers sent with every delivery
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Partial update for a webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateWebhookRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub events: Option<Vec<WebhookEvent>>,
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl HasUpdates for UpdateWebhookRequest {
    fn has_any_updates(&self) -> bool {
        self.url.is_some()
            || self.events.is_some()
            || self.headers.is_some()
            || self.is_active.is_some()
    }
}

/// Webhook view without the signing secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WebhookSummary {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub id: EntityId,
    pub url: String,
    pub events: Vec<WebhookEvent>,
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

impl From<Webhook> for WebhookSummary {
    fn from(webhook: Webhook) -> Self {
        Self {
            id: webhook.id,
            url: webhook.url,
            events: webhook.events,
            headers: webhook.headers,
            is_active: webhook.is_active,
            total_deliveries: webhook.total_deliveries,
            success_count: webhook.success_count,
            failure_count: webhook.failure_count,
            last_delivery_at: webhook.last_delivery_at,
            created_at: webhook.created_at,
            updated_at: webhook.updated_at,
        }
    }
}

/// Creation response: the summary plus the secret, shown exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateWebhookResponse {
    pub webhook: WebhookSummary,
    /// Signing secret; store it now, it is not retrievable later
    pub secret: String,
}

/// Response containing a single webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WebhookResponse {
    pub webhook: WebhookSummary,
}

/// Response containing a list of webhooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListWebhooksResponse {
    pub webhooks: Vec<WebhookSummary>,
    pub total: i64,
}
