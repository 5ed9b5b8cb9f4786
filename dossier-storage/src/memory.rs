//! In-memory storage backed by `RwLock<HashMap>` tables.
//!
//! The default backend for tests and single-process deployments. Each
//! method that the trait requires to be atomic takes the relevant write
//! locks for its whole duration, so callers get the same guarantees a
//! transactional backend would provide.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use dossier_core::{
    apply_transition, normalize_tags, AuditLog, BatchJob, BatchOperation, DossierError,
    DossierResult, Investigation, InvestigationItem, Job, JobTransition, Profile, Report,
    ResourceKind, StorageError, Webhook,
};

use crate::{
    InvestigationUpdate, ProfileUpdate, ReportUpdate, StorageTrait, WebhookUpdate,
};

fn read_table<T>(lock: &RwLock<T>) -> DossierResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| DossierError::Storage(StorageError::LockPoisoned))
}

fn write_table<T>(lock: &RwLock<T>) -> DossierResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| DossierError::Storage(StorageError::LockPoisoned))
}

fn not_found(kind: ResourceKind, id: Uuid) -> DossierError {
    DossierError::Storage(StorageError::NotFound { kind, id })
}

fn already_exists(kind: ResourceKind) -> DossierError {
    DossierError::Storage(StorageError::InsertFailed {
        kind,
        reason: "already exists".to_string(),
    })
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    jobs: Arc<RwLock<HashMap<Uuid, Job>>>,
    investigations: Arc<RwLock<HashMap<Uuid, Investigation>>>,
    items: Arc<RwLock<HashMap<Uuid, InvestigationItem>>>,
    reports: Arc<RwLock<HashMap<Uuid, Report>>>,
    batches: Arc<RwLock<HashMap<Uuid, BatchJob>>>,
    operations: Arc<RwLock<HashMap<Uuid, BatchOperation>>>,
    webhooks: Arc<RwLock<HashMap<Uuid, Webhook>>>,
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
    audit: Arc<RwLock<Vec<AuditLog>>>,
}

impl MemoryStorage {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        if let Ok(mut t) = self.jobs.write() {
            t.clear();
        }
        if let Ok(mut t) = self.investigations.write() {
            t.clear();
        }
        if let Ok(mut t) = self.items.write() {
            t.clear();
        }
        if let Ok(mut t) = self.reports.write() {
            t.clear();
        }
        if let Ok(mut t) = self.batches.write() {
            t.clear();
        }
        if let Ok(mut t) = self.operations.write() {
            t.clear();
        }
        if let Ok(mut t) = self.webhooks.write() {
            t.clear();
        }
        if let Ok(mut t) = self.profiles.write() {
            t.clear();
        }
        if let Ok(mut t) = self.audit.write() {
            t.clear();
        }
    }

    /// Get count of stored jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.read().map(|t| t.len()).unwrap_or(0)
    }

    /// Get count of stored investigation items.
    pub fn item_count(&self) -> usize {
        self.items.read().map(|t| t.len()).unwrap_or(0)
    }

    /// Get count of audit records.
    pub fn audit_count(&self) -> usize {
        self.audit.read().map(|t| t.len()).unwrap_or(0)
    }
}

impl StorageTrait for MemoryStorage {
    // === Job Operations ===

    fn job_insert(&self, job: &Job) -> DossierResult<()> {
        let mut jobs = write_table(&self.jobs)?;
        if jobs.contains_key(&job.id) {
            return Err(already_exists(ResourceKind::Job));
        }
        jobs.insert(job.id, job.clone());
        Ok(())
    }

    fn job_get(&self, id: Uuid) -> DossierResult<Option<Job>> {
        let jobs = read_table(&self.jobs)?;
        Ok(jobs.get(&id).cloned())
    }

    fn job_list_by_user(&self, user_id: Uuid) -> DossierResult<Vec<Job>> {
        let jobs = read_table(&self.jobs)?;
        let mut result: Vec<Job> = jobs
            .values()
            .filter(|j| j.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    fn job_apply_transition(&self, id: Uuid, transition: &JobTransition) -> DossierResult<Job> {
        // Validation and write happen under the same write lock, so a
        // concurrent transition cannot slip in between.
        let mut jobs = write_table(&self.jobs)?;
        let current = jobs
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(ResourceKind::Job, id))?;
        let updated = apply_transition(current, transition)?;
        jobs.insert(id, updated.clone());
        Ok(updated)
    }

    // === Investigation Operations ===

    fn investigation_insert(&self, investigation: &Investigation) -> DossierResult<()> {
        let mut investigations = write_table(&self.investigations)?;
        if investigations.contains_key(&investigation.id) {
            return Err(already_exists(ResourceKind::Investigation));
        }
        investigations.insert(investigation.id, investigation.clone());
        Ok(())
    }

    fn investigation_get(&self, id: Uuid) -> DossierResult<Option<Investigation>> {
        let investigations = read_table(&self.investigations)?;
        Ok(investigations.get(&id).cloned())
    }

    fn investigation_list_by_user(&self, user_id: Uuid) -> DossierResult<Vec<Investigation>> {
        let investigations = read_table(&self.investigations)?;
        let mut result: Vec<Investigation> = investigations
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(result)
    }

    fn investigation_update(
        &self,
        id: Uuid,
        update: InvestigationUpdate,
    ) -> DossierResult<Investigation> {
        let mut investigations = write_table(&self.investigations)?;
        let investigation = investigations
            .get_mut(&id)
            .ok_or_else(|| not_found(ResourceKind::Investigation, id))?;

        if let Some(name) = update.name {
            investigation.name = name;
        }
        if let Some(description) = update.description {
            investigation.description = Some(description);
        }
        if let Some(tags) = update.tags {
            investigation.tags = normalize_tags(tags);
        }
        if let Some(status) = update.status {
            investigation.status = status;
        }
        investigation.updated_at = Utc::now();

        Ok(investigation.clone())
    }

    fn investigation_delete(&self, id: Uuid) -> DossierResult<()> {
        let mut investigations = write_table(&self.investigations)?;
        let mut items = write_table(&self.items)?;
        let mut jobs = write_table(&self.jobs)?;

        if investigations.remove(&id).is_none() {
            return Err(not_found(ResourceKind::Investigation, id));
        }
        items.retain(|_, item| item.investigation_id != id);
        // Linked jobs survive the delete; only the link is cleared.
        for job in jobs.values_mut() {
            if job.investigation_id == Some(id) {
                job.investigation_id = None;
                job.updated_at = Utc::now();
            }
        }
        Ok(())
    }

    // === Investigation Item Operations ===

    fn item_insert(&self, item: &InvestigationItem) -> DossierResult<()> {
        // Uniqueness check, item insert, and job link all under the same
        // pair of write locks.
        let mut items = write_table(&self.items)?;
        let mut jobs = write_table(&self.jobs)?;

        let duplicate = items.values().any(|existing| {
            existing.investigation_id == item.investigation_id && existing.job_id == item.job_id
        });
        if duplicate {
            return Err(DossierError::Storage(StorageError::Duplicate {
                kind: ResourceKind::InvestigationItem,
                reason: "job is already linked to this investigation".to_string(),
            }));
        }

        let job = jobs
            .get_mut(&item.job_id)
            .ok_or_else(|| not_found(ResourceKind::Job, item.job_id))?;
        // First writer wins; a job linked elsewhere keeps its pointer.
        if job.investigation_id.is_none() {
            job.investigation_id = Some(item.investigation_id);
            job.updated_at = Utc::now();
        }

        items.insert(item.id, item.clone());
        Ok(())
    }

    fn item_list_by_investigation(
        &self,
        investigation_id: Uuid,
    ) -> DossierResult<Vec<InvestigationItem>> {
        let items = read_table(&self.items)?;
        let mut result: Vec<InvestigationItem> = items
            .values()
            .filter(|i| i.investigation_id == investigation_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    // === Report Operations ===

    fn report_insert(&self, report: &Report) -> DossierResult<()> {
        let mut reports = write_table(&self.reports)?;
        if reports.contains_key(&report.id) {
            return Err(already_exists(ResourceKind::Report));
        }
        reports.insert(report.id, report.clone());
        Ok(())
    }

    fn report_get(&self, id: Uuid) -> DossierResult<Option<Report>> {
        let reports = read_table(&self.reports)?;
        Ok(reports.get(&id).cloned())
    }

    fn report_list_by_user(&self, user_id: Uuid) -> DossierResult<Vec<Report>> {
        let reports = read_table(&self.reports)?;
        let mut result: Vec<Report> = reports
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(result)
    }

    fn report_update(&self, id: Uuid, update: ReportUpdate) -> DossierResult<Report> {
        let mut reports = write_table(&self.reports)?;
        let report = reports
            .get_mut(&id)
            .ok_or_else(|| not_found(ResourceKind::Report, id))?;

        if let Some(title) = update.title {
            report.title = title;
        }
        if let Some(is_public) = update.is_public {
            report.is_public = is_public;
        }
        if let Some(expires_at) = update.expires_at {
            report.expires_at = Some(expires_at);
        }
        report.updated_at = Utc::now();

        Ok(report.clone())
    }

    fn report_delete(&self, id: Uuid) -> DossierResult<()> {
        let mut reports = write_table(&self.reports)?;
        if reports.remove(&id).is_none() {
            return Err(not_found(ResourceKind::Report, id));
        }
        Ok(())
    }

    // === Batch Operations ===

    fn batch_insert(&self, batch: &BatchJob) -> DossierResult<()> {
        let mut batches = write_table(&self.batches)?;
        if batches.contains_key(&batch.id) {
            return Err(already_exists(ResourceKind::BatchJob));
        }
        batches.insert(batch.id, batch.clone());
        Ok(())
    }

    fn batch_get(&self, id: Uuid) -> DossierResult<Option<BatchJob>> {
        let batches = read_table(&self.batches)?;
        Ok(batches.get(&id).cloned())
    }

    fn batch_list_by_user(&self, user_id: Uuid) -> DossierResult<Vec<BatchJob>> {
        let batches = read_table(&self.batches)?;
        let mut result: Vec<BatchJob> = batches
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    fn batch_delete(&self, id: Uuid) -> DossierResult<()> {
        let mut batches = write_table(&self.batches)?;
        let mut operations = write_table(&self.operations)?;
        if batches.remove(&id).is_none() {
            return Err(not_found(ResourceKind::BatchJob, id));
        }
        operations.retain(|_, op| op.batch_job_id != id);
        Ok(())
    }

    fn operation_insert(&self, operation: &BatchOperation) -> DossierResult<()> {
        let mut operations = write_table(&self.operations)?;
        if operations.contains_key(&operation.id) {
            return Err(already_exists(ResourceKind::BatchJob));
        }
        operations.insert(operation.id, operation.clone());
        Ok(())
    }

    fn operation_list_by_batch(&self, batch_job_id: Uuid) -> DossierResult<Vec<BatchOperation>> {
        let operations = read_table(&self.operations)?;
        let mut result: Vec<BatchOperation> = operations
            .values()
            .filter(|op| op.batch_job_id == batch_job_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(result)
    }

    // === Webhook Operations ===

    fn webhook_insert(&self, webhook: &Webhook) -> DossierResult<()> {
        let mut webhooks = write_table(&self.webhooks)?;
        if webhooks.contains_key(&webhook.id) {
            return Err(already_exists(ResourceKind::Webhook));
        }
        webhooks.insert(webhook.id, webhook.clone());
        Ok(())
    }

    fn webhook_get(&self, id: Uuid) -> DossierResult<Option<Webhook>> {
        let webhooks = read_table(&self.webhooks)?;
        Ok(webhooks.get(&id).cloned())
    }

    fn webhook_list_by_user(&self, user_id: Uuid) -> DossierResult<Vec<Webhook>> {
        let webhooks = read_table(&self.webhooks)?;
        let mut result: Vec<Webhook> = webhooks
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    fn webhook_update(&self, id: Uuid, update: WebhookUpdate) -> DossierResult<Webhook> {
        let mut webhooks = write_table(&self.webhooks)?;
        let webhook = webhooks
            .get_mut(&id)
            .ok_or_else(|| not_found(ResourceKind::Webhook, id))?;

        if let Some(url) = update.url {
            webhook.url = url;
        }
        if let Some(events) = update.events {
            webhook.events = events;
        }
        if let Some(headers) = update.headers {
            webhook.headers = headers;
        }
        if let Some(is_active) = update.is_active {
            webhook.is_active = is_active;
        }
        webhook.updated_at = Utc::now();

        Ok(webhook.clone())
    }

    fn webhook_delete(&self, id: Uuid) -> DossierResult<()> {
        let mut webhooks = write_table(&self.webhooks)?;
        if webhooks.remove(&id).is_none() {
            return Err(not_found(ResourceKind::Webhook, id));
        }
        Ok(())
    }

    // === Profile Operations ===

    fn profile_insert(&self, profile: &Profile) -> DossierResult<()> {
        let mut profiles = write_table(&self.profiles)?;
        if profiles.contains_key(&profile.user_id) {
            return Err(already_exists(ResourceKind::Profile));
        }
        profiles.insert(profile.user_id, profile.clone());
        Ok(())
    }

    fn profile_get(&self, user_id: Uuid) -> DossierResult<Option<Profile>> {
        let profiles = read_table(&self.profiles)?;
        Ok(profiles.get(&user_id).cloned())
    }

    fn profile_list(&self) -> DossierResult<Vec<Profile>> {
        let profiles = read_table(&self.profiles)?;
        let mut result: Vec<Profile> = profiles.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    fn profile_update(&self, user_id: Uuid, update: ProfileUpdate) -> DossierResult<Profile> {
        let mut profiles = write_table(&self.profiles)?;
        let profile = profiles
            .get_mut(&user_id)
            .ok_or_else(|| not_found(ResourceKind::Profile, user_id))?;

        if let Some(display_name) = update.display_name {
            profile.display_name = Some(display_name);
        }
        if let Some(role) = update.role {
            profile.role = role;
        }
        if let Some(is_suspended) = update.is_suspended {
            profile.is_suspended = is_suspended;
        }
        profile.updated_at = Utc::now();

        Ok(profile.clone())
    }

    fn profile_delete(&self, user_id: Uuid) -> DossierResult<()> {
        let mut profiles = write_table(&self.profiles)?;
        if profiles.remove(&user_id).is_none() {
            return Err(not_found(ResourceKind::Profile, user_id));
        }
        Ok(())
    }

    // === Audit Operations ===

    fn audit_append(&self, entry: &AuditLog) -> DossierResult<()> {
        let mut audit = write_table(&self.audit)?;
        audit.push(entry.clone());
        Ok(())
    }

    fn audit_list_by_actor(&self, actor_id: Uuid) -> DossierResult<Vec<AuditLog>> {
        let audit = read_table(&self.audit)?;
        let mut result: Vec<AuditLog> = audit
            .iter()
            .filter(|e| e.actor_id == actor_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_core::tool::{FoundAccount, ToolInput, ToolOutput};
    use dossier_core::{new_entity_id, JobStatus, UserRole};

    fn make_job(user_id: Uuid) -> Job {
        Job::new(
            user_id,
            ToolInput::UsernameSearch {
                username: "jdoe".to_string(),
            },
        )
        .unwrap()
    }

    fn sample_output() -> ToolOutput {
        ToolOutput::UsernameSearch {
            accounts: vec![FoundAccount {
                site: "github".to_string(),
                url: "https://github.com/jdoe".to_string(),
                username: None,
            }],
            raw: None,
        }
    }

    #[test]
    fn test_job_insert_get() {
        let storage = MemoryStorage::new();
        let job = make_job(new_entity_id());
        storage.job_insert(&job).unwrap();

        let fetched = storage.job_get(job.id).unwrap().unwrap();
        assert_eq!(fetched.id, job.id);
        assert_eq!(fetched.status, JobStatus::Pending);
    }

    #[test]
    fn test_job_insert_duplicate_fails() {
        let storage = MemoryStorage::new();
        let job = make_job(new_entity_id());
        storage.job_insert(&job).unwrap();
        assert!(storage.job_insert(&job).is_err());
    }

    #[test]
    fn test_job_transition_through_store() {
        let storage = MemoryStorage::new();
        let job = make_job(new_entity_id());
        storage.job_insert(&job).unwrap();

        let updated = storage
            .job_apply_transition(job.id, &JobTransition::running(30))
            .unwrap();
        assert_eq!(updated.status, JobStatus::Running);
        assert_eq!(updated.progress, 30);

        let updated = storage
            .job_apply_transition(job.id, &JobTransition::completed(sample_output()))
            .unwrap();
        assert_eq!(updated.status, JobStatus::Completed);
        assert_eq!(updated.progress, 100);
    }

    #[test]
    fn test_concurrent_terminal_transitions_one_wins() {
        let storage = Arc::new(MemoryStorage::new());
        let job = make_job(new_entity_id());
        storage.job_insert(&job).unwrap();

        let complete = {
            let storage = Arc::clone(&storage);
            let id = job.id;
            std::thread::spawn(move || {
                storage.job_apply_transition(id, &JobTransition::completed(sample_output()))
            })
        };
        let fail = {
            let storage = Arc::clone(&storage);
            let id = job.id;
            std::thread::spawn(move || {
                storage.job_apply_transition(id, &JobTransition::failed("tool exited 1"))
            })
        };

        let results = [complete.join().unwrap(), fail.join().unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        let losing = results.iter().find(|r| r.is_err()).unwrap();
        assert!(matches!(
            losing,
            Err(DossierError::TerminalState { .. })
        ));

        let stored = storage.job_get(job.id).unwrap().unwrap();
        assert!(stored.status.is_terminal());
    }

    #[test]
    fn test_job_list_newest_first() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let first = make_job(user_id);
        let second = make_job(user_id);
        storage.job_insert(&first).unwrap();
        storage.job_insert(&second).unwrap();
        storage.job_insert(&make_job(new_entity_id())).unwrap();

        let listed = storage.job_list_by_user(user_id).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].created_at >= listed[1].created_at);
    }

    #[test]
    fn test_item_insert_links_job_first_writer_wins() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let job = make_job(user_id);
        storage.job_insert(&job).unwrap();

        let inv_a = Investigation::new(user_id, "a", None, vec![]);
        let inv_b = Investigation::new(user_id, "b", None, vec![]);
        storage.investigation_insert(&inv_a).unwrap();
        storage.investigation_insert(&inv_b).unwrap();

        let item_a = InvestigationItem::new(inv_a.id, job.id, user_id, None, vec![], false);
        storage.item_insert(&item_a).unwrap();
        assert_eq!(
            storage.job_get(job.id).unwrap().unwrap().investigation_id,
            Some(inv_a.id)
        );

        // Linking into a second investigation keeps the original pointer.
        let item_b = InvestigationItem::new(inv_b.id, job.id, user_id, None, vec![], false);
        storage.item_insert(&item_b).unwrap();
        assert_eq!(
            storage.job_get(job.id).unwrap().unwrap().investigation_id,
            Some(inv_a.id)
        );
    }

    #[test]
    fn test_item_insert_rejects_duplicate_pair() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let job = make_job(user_id);
        storage.job_insert(&job).unwrap();
        let inv = Investigation::new(user_id, "a", None, vec![]);
        storage.investigation_insert(&inv).unwrap();

        let item = InvestigationItem::new(inv.id, job.id, user_id, None, vec![], false);
        storage.item_insert(&item).unwrap();

        let again = InvestigationItem::new(inv.id, job.id, user_id, None, vec![], true);
        let result = storage.item_insert(&again);
        assert!(matches!(
            result,
            Err(DossierError::Storage(StorageError::Duplicate { .. }))
        ));
        assert_eq!(storage.item_count(), 1);
    }

    #[test]
    fn test_investigation_delete_cascades() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let job = make_job(user_id);
        storage.job_insert(&job).unwrap();
        let inv = Investigation::new(user_id, "a", None, vec![]);
        storage.investigation_insert(&inv).unwrap();
        let item = InvestigationItem::new(inv.id, job.id, user_id, None, vec![], false);
        storage.item_insert(&item).unwrap();

        storage.investigation_delete(inv.id).unwrap();

        assert!(storage.investigation_get(inv.id).unwrap().is_none());
        assert_eq!(storage.item_count(), 0);
        // The job survives with its link cleared.
        let surviving = storage.job_get(job.id).unwrap().unwrap();
        assert!(surviving.investigation_id.is_none());
    }

    #[test]
    fn test_investigation_update_normalizes_tags() {
        let storage = MemoryStorage::new();
        let inv = Investigation::new(new_entity_id(), "a", None, vec![]);
        storage.investigation_insert(&inv).unwrap();

        let updated = storage
            .investigation_update(
                inv.id,
                InvestigationUpdate {
                    tags: Some(vec![" x ".to_string(), "x".to_string(), "y".to_string()]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.tags, vec!["x".to_string(), "y".to_string()]);
        assert!(updated.updated_at >= inv.updated_at);
    }

    #[test]
    fn test_investigation_list_most_recently_updated_first() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let older = Investigation::new(user_id, "older", None, vec![]);
        let newer = Investigation::new(user_id, "newer", None, vec![]);
        storage.investigation_insert(&older).unwrap();
        storage.investigation_insert(&newer).unwrap();

        // Touching the older one moves it to the front.
        storage
            .investigation_update(
                older.id,
                InvestigationUpdate {
                    name: Some("older-renamed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let listed = storage.investigation_list_by_user(user_id).unwrap();
        assert_eq!(listed[0].id, older.id);
        assert_eq!(listed[1].id, newer.id);
    }

    #[test]
    fn test_batch_delete_removes_operations() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let batch = BatchJob::new(user_id, "sweep", 2, Default::default());
        storage.batch_insert(&batch).unwrap();
        for i in 0..2 {
            let op = BatchOperation::new(
                batch.id,
                user_id,
                ToolInput::DomainRecon {
                    domain: format!("example{i}.com"),
                },
                i,
            );
            storage.operation_insert(&op).unwrap();
        }
        assert_eq!(storage.operation_list_by_batch(batch.id).unwrap().len(), 2);

        storage.batch_delete(batch.id).unwrap();
        assert!(storage.batch_get(batch.id).unwrap().is_none());
        assert!(storage.operation_list_by_batch(batch.id).unwrap().is_empty());
    }

    #[test]
    fn test_operations_listed_by_priority() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let batch = BatchJob::new(user_id, "sweep", 3, Default::default());
        storage.batch_insert(&batch).unwrap();
        for priority in [1, 5, 3] {
            let op = BatchOperation::new(
                batch.id,
                user_id,
                ToolInput::UsernameSearch {
                    username: "jdoe".to_string(),
                },
                priority,
            );
            storage.operation_insert(&op).unwrap();
        }

        let listed = storage.operation_list_by_batch(batch.id).unwrap();
        let priorities: Vec<i32> = listed.iter().map(|op| op.priority).collect();
        assert_eq!(priorities, vec![5, 3, 1]);
    }

    #[test]
    fn test_profile_update_and_audit() {
        let storage = MemoryStorage::new();
        let admin = Profile::new(new_entity_id(), "admin@example.com", UserRole::Admin);
        let target = Profile::new(new_entity_id(), "user@example.com", UserRole::User);
        storage.profile_insert(&admin).unwrap();
        storage.profile_insert(&target).unwrap();

        let updated = storage
            .profile_update(
                target.user_id,
                ProfileUpdate {
                    is_suspended: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated.is_suspended);

        let entry = AuditLog::new(
            admin.user_id,
            "user.suspend",
            ResourceKind::Profile,
            Some(target.user_id),
            serde_json::json!({"is_suspended": true}),
        );
        storage.audit_append(&entry).unwrap();

        let trail = storage.audit_list_by_actor(admin.user_id).unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].resource_id, Some(target.user_id));
    }

    #[test]
    fn test_webhook_update_toggles_active() {
        let storage = MemoryStorage::new();
        let hook = Webhook::new(
            new_entity_id(),
            "https://example.com/hook",
            vec![dossier_core::WebhookEvent::JobCompleted],
            "a".repeat(64),
            Default::default(),
        );
        storage.webhook_insert(&hook).unwrap();

        let updated = storage
            .webhook_update(
                hook.id,
                WebhookUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated.is_active);
        // Secret is untouched by updates.
        assert_eq!(updated.secret, hook.secret);
    }

    #[test]
    fn test_report_update_missing_is_not_found() {
        let storage = MemoryStorage::new();
        let result = storage.report_update(new_entity_id(), ReportUpdate::default());
        assert!(matches!(
            result,
            Err(DossierError::Storage(StorageError::NotFound { .. }))
        ));
    }
}
