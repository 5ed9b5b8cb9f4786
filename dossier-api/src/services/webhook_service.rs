//! Webhook Service
//!
//! Registration and management of delivery endpoints. Secrets are
//! generated server-side when not supplied and returned exactly once,
//! in the creation response; every later read omits them.

use crate::error::{ApiError, ApiResult};
use crate::types::{CreateWebhookRequest, UpdateWebhookRequest};
use crate::validation::HasUpdates;
use dossier_core::Webhook;
use dossier_storage::{StorageTrait, WebhookUpdate};
use rand::RngCore;
use uuid::Uuid;

/// Minimum length for a caller-supplied signing secret.
const MIN_SECRET_LEN: usize = 16;

/// Register a new webhook. Returns the stored webhook; the caller is
/// responsible for surfacing the secret once and never again.
pub fn create_webhook(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    request: CreateWebhookRequest,
) -> ApiResult<Webhook> {
    validate_url(&request.url)?;
    if request.events.is_empty() {
        return Err(ApiError::validation_failed(
            "At least one event subscription is required",
        ));
    }

    let secret = match request.secret {
        Some(secret) => {
            if secret.len() < MIN_SECRET_LEN {
                return Err(ApiError::invalid_input(format!(
                    "Secret must be at least {} characters",
                    MIN_SECRET_LEN
                )));
            }
            secret
        }
        None => generate_secret(),
    };

    let webhook = Webhook::new(user_id, request.url, request.events, secret, request.headers);
    storage.webhook_insert(&webhook)?;
    tracing::info!(webhook_id = %webhook.id, url = %webhook.url, "Webhook registered");
    Ok(webhook)
}

/// Get a webhook, scoped to its owner.
pub fn get_owned_webhook(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    webhook_id: Uuid,
) -> ApiResult<Webhook> {
    storage
        .webhook_get(webhook_id)?
        .filter(|hook| hook.user_id == user_id)
        .ok_or_else(|| ApiError::entity_not_found("webhook", webhook_id))
}

/// List a user's webhooks, newest first.
pub fn list_webhooks(storage: &dyn StorageTrait, user_id: Uuid) -> ApiResult<Vec<Webhook>> {
    Ok(storage.webhook_list_by_user(user_id)?)
}

/// Apply a partial update to an owned webhook. The secret is immutable;
/// rotating it means deleting and re-creating the registration.
pub fn update_webhook(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    webhook_id: Uuid,
    request: UpdateWebhookRequest,
) -> ApiResult<Webhook> {
    request.require_updates()?;
    if let Some(url) = &request.url {
        validate_url(url)?;
    }
    if let Some(events) = &request.events {
        if events.is_empty() {
            return Err(ApiError::validation_failed(
                "At least one event subscription is required",
            ));
        }
    }
    get_owned_webhook(storage, user_id, webhook_id)?;

    let update = WebhookUpdate {
        url: request.url,
        events: request.events,
        headers: request.headers,
        is_active: request.is_active,
    };
    Ok(storage.webhook_update(webhook_id, update)?)
}

/// Delete an owned webhook.
pub fn delete_webhook(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    webhook_id: Uuid,
) -> ApiResult<()> {
    get_owned_webhook(storage, user_id, webhook_id)?;
    storage.webhook_delete(webhook_id)?;
    tracing::info!(webhook_id = %webhook_id, "Webhook deleted");
    Ok(())
}

fn validate_url(raw: &str) -> ApiResult<()> {
    let parsed = url::Url::parse(raw)
        .map_err(|_| ApiError::invalid_format("url", "valid http or https URL"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ApiError::invalid_format("url", "valid http or https URL"));
    }
    Ok(())
}

/// 32 random bytes, hex-encoded: a 64-character signing secret.
fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
