//! Investigation Service
//!
//! Investigation CRUD, item linking, and read-time statistics. Stats are
//! computed from live job state on every read and never persisted.

use crate::error::{ApiError, ApiResult};
use crate::types::{CreateInvestigationRequest, CreateItemRequest, UpdateInvestigationRequest};
use crate::validation::{HasUpdates, ValidateNonEmpty};
use dossier_core::{Investigation, InvestigationItem, InvestigationStats, JobStatus};
use dossier_storage::{InvestigationUpdate, StorageTrait};
use uuid::Uuid;

/// Create a new investigation.
pub fn create_investigation(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    request: CreateInvestigationRequest,
) -> ApiResult<Investigation> {
    request.name.validate_non_empty("name")?;
    let investigation =
        Investigation::new(user_id, request.name, request.description, request.tags);
    storage.investigation_insert(&investigation)?;
    tracing::info!(investigation_id = %investigation.id, "Investigation created");
    Ok(investigation)
}

/// Get an investigation, scoped to its owner.
pub fn get_owned_investigation(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    investigation_id: Uuid,
) -> ApiResult<Investigation> {
    storage
        .investigation_get(investigation_id)?
        .filter(|inv| inv.user_id == user_id)
        .ok_or_else(|| ApiError::entity_not_found("investigation", investigation_id))
}

/// Compute the read-time statistics for an investigation.
///
/// One status entry per linked item; items whose job has vanished are
/// skipped rather than failing the whole read.
pub fn compute_stats(
    storage: &dyn StorageTrait,
    investigation_id: Uuid,
) -> ApiResult<InvestigationStats> {
    let items = storage.item_list_by_investigation(investigation_id)?;
    let mut statuses: Vec<JobStatus> = Vec::with_capacity(items.len());
    for item in &items {
        if let Some(job) = storage.job_get(item.job_id)? {
            statuses.push(job.status);
        }
    }
    Ok(InvestigationStats::compute(&statuses))
}

/// List a user's investigations, most recently updated first.
pub fn list_investigations(
    storage: &dyn StorageTrait,
    user_id: Uuid,
) -> ApiResult<Vec<Investigation>> {
    Ok(storage.investigation_list_by_user(user_id)?)
}

/// Apply a partial update to an owned investigation.
pub fn update_investigation(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    investigation_id: Uuid,
    request: UpdateInvestigationRequest,
) -> ApiResult<Investigation> {
    request.require_updates()?;
    if let Some(name) = &request.name {
        name.validate_non_empty("name")?;
    }
    get_owned_investigation(storage, user_id, investigation_id)?;

    let update = InvestigationUpdate {
        name: request.name,
        description: request.description,
        tags: request.tags,
        status: request.status,
    };
    Ok(storage.investigation_update(investigation_id, update)?)
}

/// Delete an owned investigation. Items cascade; linked jobs survive with
/// their link cleared.
pub fn delete_investigation(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    investigation_id: Uuid,
) -> ApiResult<()> {
    get_owned_investigation(storage, user_id, investigation_id)?;
    storage.investigation_delete(investigation_id)?;
    tracing::info!(investigation_id = %investigation_id, "Investigation deleted");
    Ok(())
}

/// Link a job into an investigation as a new item.
///
/// Both the investigation and the job must belong to the caller. The
/// store enforces the (investigation_id, job_id) uniqueness atomically
/// and points the job at its first investigation.
pub fn add_item(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    investigation_id: Uuid,
    request: CreateItemRequest,
) -> ApiResult<InvestigationItem> {
    get_owned_investigation(storage, user_id, investigation_id)?;
    let job = storage
        .job_get(request.job_id)?
        .filter(|job| job.user_id == user_id)
        .ok_or_else(|| ApiError::entity_not_found("job", request.job_id))?;

    let item = InvestigationItem::new(
        investigation_id,
        job.id,
        user_id,
        request.notes,
        request.tags,
        request.is_favorite,
    );
    storage.item_insert(&item)?;
    tracing::info!(
        investigation_id = %investigation_id,
        job_id = %job.id,
        "Job linked into investigation"
    );
    Ok(item)
}

/// List the items of an owned investigation, newest first.
pub fn list_items(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    investigation_id: Uuid,
) -> ApiResult<Vec<InvestigationItem>> {
    get_owned_investigation(storage, user_id, investigation_id)?;
    Ok(storage.item_list_by_investigation(investigation_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::job_service;
    use dossier_core::{new_entity_id, JobTransition, ToolInput};
    use dossier_storage::MemoryStorage;

    fn create_request(name: &str) -> CreateInvestigationRequest {
        CreateInvestigationRequest {
            name: name.to_string(),
            description: None,
            tags: vec![],
        }
    }

    fn item_request(job_id: Uuid) -> CreateItemRequest {
        CreateItemRequest {
            job_id,
            notes: None,
            tags: vec![],
            is_favorite: false,
        }
    }

    fn make_job(storage: &MemoryStorage, user_id: Uuid) -> dossier_core::Job {
        job_service::create_job(
            storage,
            user_id,
            ToolInput::UsernameSearch {
                username: "jdoe".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_blank_name_rejected() {
        let storage = MemoryStorage::new();
        let result = create_investigation(&storage, new_entity_id(), create_request("  "));
        assert!(result.is_err());
    }

    #[test]
    fn test_stats_track_live_job_state() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let inv = create_investigation(&storage, user_id, create_request("acme")).unwrap();
        let job = make_job(&storage, user_id);
        add_item(&storage, user_id, inv.id, item_request(job.id)).unwrap();

        let stats = compute_stats(&storage, inv.id).unwrap();
        assert_eq!(stats.pending_jobs, 1);
        assert_eq!(stats.failed_jobs, 0);

        // Failing the job moves it between buckets on the next read.
        job_service::transition_job(&storage, user_id, job.id, &JobTransition::failed("x"))
            .unwrap();
        let stats = compute_stats(&storage, inv.id).unwrap();
        assert_eq!(stats.pending_jobs, 0);
        assert_eq!(stats.failed_jobs, 1);
        assert_eq!(stats.total_items, 1);
    }

    #[test]
    fn test_duplicate_link_is_conflict() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let inv = create_investigation(&storage, user_id, create_request("acme")).unwrap();
        let job = make_job(&storage, user_id);

        add_item(&storage, user_id, inv.id, item_request(job.id)).unwrap();
        let err = add_item(&storage, user_id, inv.id, item_request(job.id)).unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);
    }

    #[test]
    fn test_cannot_link_someone_elses_job() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let inv = create_investigation(&storage, user_id, create_request("acme")).unwrap();
        let foreign_job = make_job(&storage, new_entity_id());

        let err = add_item(&storage, user_id, inv.id, item_request(foreign_job.id)).unwrap_err();
        assert_eq!(err.code, ErrorCode::EntityNotFound);
    }

    #[test]
    fn test_empty_update_rejected() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let inv = create_investigation(&storage, user_id, create_request("acme")).unwrap();

        let err = update_investigation(
            &storage,
            user_id,
            inv.id,
            UpdateInvestigationRequest::default(),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_delete_clears_job_links() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let inv = create_investigation(&storage, user_id, create_request("acme")).unwrap();
        let job = make_job(&storage, user_id);
        add_item(&storage, user_id, inv.id, item_request(job.id)).unwrap();

        delete_investigation(&storage, user_id, inv.id).unwrap();

        let surviving = job_service::get_owned_job(&storage, user_id, job.id).unwrap();
        assert!(surviving.investigation_id.is_none());
    }
}
