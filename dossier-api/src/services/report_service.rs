//! Report Service
//!
//! Compiles structured reports from investigation contents and enforces
//! the public-sharing access rules. Rendering to PDF/CSV/HTML happens
//! outside this codebase.

use crate::error::{ApiError, ApiResult};
use crate::services::investigation_service;
use crate::types::{CreateReportRequest, UpdateReportRequest};
use crate::validation::{HasUpdates, ValidateNonEmpty};
use chrono::Utc;
use dossier_core::{
    DateRange, Job, JobStatus, Report, ReportAccess, ReportMetadata, ReportSection, ToolKind,
};
use dossier_storage::{ReportUpdate, StorageTrait};
use uuid::Uuid;

/// Compile a report from an owned investigation's current contents.
///
/// The snapshot includes one section per completed job; pending and
/// failed jobs contribute to the metadata only.
pub fn compile_report(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    request: CreateReportRequest,
) -> ApiResult<Report> {
    request.title.validate_non_empty("title")?;
    investigation_service::get_owned_investigation(storage, user_id, request.investigation_id)?;

    let items = storage.item_list_by_investigation(request.investigation_id)?;
    let mut jobs: Vec<Job> = Vec::with_capacity(items.len());
    for item in &items {
        if let Some(job) = storage.job_get(item.job_id)? {
            jobs.push(job);
        }
    }

    let report = Report::new(
        user_id,
        request.investigation_id,
        request.title,
        request.template,
        build_metadata(&jobs, items.len() as i64),
        build_sections(&jobs),
        request.is_public,
        request.expires_at,
    );
    storage.report_insert(&report)?;
    tracing::info!(report_id = %report.id, sections = report.sections.len(), "Report compiled");
    Ok(report)
}

fn build_metadata(jobs: &[Job], item_count: i64) -> ReportMetadata {
    let mut tools_used: Vec<ToolKind> = Vec::new();
    for job in jobs {
        if !tools_used.contains(&job.tool) {
            tools_used.push(job.tool);
        }
    }

    let date_range = match (
        jobs.iter().map(|j| j.created_at).min(),
        jobs.iter().map(|j| j.created_at).max(),
    ) {
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        _ => None,
    };

    ReportMetadata {
        tools_used,
        date_range,
        item_count,
    }
}

fn build_sections(jobs: &[Job]) -> Vec<ReportSection> {
    jobs.iter()
        .filter(|job| job.status == JobStatus::Completed)
        .map(|job| ReportSection {
            heading: format!("{} \u{2014} {}", job.tool, job.input.target()),
            body: summarize_output(job),
            job_ids: vec![job.id],
        })
        .collect()
}

fn summarize_output(job: &Job) -> String {
    use dossier_core::ToolOutput;

    match &job.output {
        Some(ToolOutput::UsernameSearch { accounts, .. }) => {
            format!("Found {} account(s) across sites.", accounts.len())
        }
        Some(ToolOutput::DomainRecon {
            records,
            subdomains,
            ..
        }) => format!(
            "Resolved {} DNS record(s) and {} subdomain(s).",
            records.len(),
            subdomains.len()
        ),
        Some(ToolOutput::EmailLookup { breaches, .. }) => {
            format!("Address appears in {} known breach(es).", breaches.len())
        }
        Some(ToolOutput::PhoneLookup {
            carrier, country, ..
        }) => format!(
            "Carrier: {}; country: {}.",
            carrier.as_deref().unwrap_or("unknown"),
            country.as_deref().unwrap_or("unknown")
        ),
        Some(ToolOutput::ImageMetadata { .. }) => "Extracted image metadata fields.".to_string(),
        None => "No output recorded.".to_string(),
    }
}

/// Get a report under the sharing rules.
///
/// - The owner reads through the authenticated path regardless of the
///   public flag, except when the public link has expired: an expired
///   public report is forbidden for everyone until re-shared.
/// - Anyone may read a public, unexpired report.
/// - Everything else reads as not-found.
pub fn get_report_checked(
    storage: &dyn StorageTrait,
    requester: Option<Uuid>,
    report_id: Uuid,
) -> ApiResult<Report> {
    let report = storage
        .report_get(report_id)?
        .ok_or_else(|| ApiError::entity_not_found("report", report_id))?;

    match report.access_state(Utc::now()) {
        ReportAccess::PublicUnexpired => Ok(report),
        ReportAccess::PublicExpired => Err(ApiError::forbidden("Report link has expired")),
        ReportAccess::Private => {
            if requester == Some(report.user_id) {
                Ok(report)
            } else {
                Err(ApiError::entity_not_found("report", report_id))
            }
        }
    }
}

fn get_owned_report(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    report_id: Uuid,
) -> ApiResult<Report> {
    storage
        .report_get(report_id)?
        .filter(|report| report.user_id == user_id)
        .ok_or_else(|| ApiError::entity_not_found("report", report_id))
}

/// List a user's reports, most recently updated first.
pub fn list_reports(storage: &dyn StorageTrait, user_id: Uuid) -> ApiResult<Vec<Report>> {
    Ok(storage.report_list_by_user(user_id)?)
}

/// Update an owned report's title or sharing settings.
pub fn update_report(
    storage: &dyn StorageTrait,
    user_id: Uuid,
    report_id: Uuid,
    request: UpdateReportRequest,
) -> ApiResult<Report> {
    request.require_updates()?;
    if let Some(title) = &request.title {
        title.validate_non_empty("title")?;
    }
    get_owned_report(storage, user_id, report_id)?;

    let update = ReportUpdate {
        title: request.title,
        is_public: request.is_public,
        expires_at: request.expires_at,
    };
    Ok(storage.report_update(report_id, update)?)
}

/// Delete an owned report.
pub fn delete_report(storage: &dyn StorageTrait, user_id: Uuid, report_id: Uuid) -> ApiResult<()> {
    get_owned_report(storage, user_id, report_id)?;
    storage.report_delete(report_id)?;
    tracing::info!(report_id = %report_id, "Report deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::{investigation_service, job_service};
    use crate::types::{CreateInvestigationRequest, CreateItemRequest};
    use chrono::Duration;
    use dossier_core::{new_entity_id, JobTransition, ReportTemplate, ToolInput, ToolOutput};
    use dossier_storage::MemoryStorage;

    fn setup_investigation_with_completed_job(
        storage: &MemoryStorage,
        user_id: Uuid,
    ) -> (Uuid, Uuid) {
        let inv = investigation_service::create_investigation(
            storage,
            user_id,
            CreateInvestigationRequest {
                name: "acme".to_string(),
                description: None,
                tags: vec![],
            },
        )
        .unwrap();
        let job = job_service::create_job(
            storage,
            user_id,
            ToolInput::EmailLookup {
                email: "target@example.com".to_string(),
            },
        )
        .unwrap();
        job_service::transition_job(
            storage,
            user_id,
            job.id,
            &JobTransition::completed(ToolOutput::EmailLookup {
                breaches: vec!["megacorp-2021".to_string()],
                raw: None,
            }),
        )
        .unwrap();
        investigation_service::add_item(
            storage,
            user_id,
            inv.id,
            CreateItemRequest {
                job_id: job.id,
                notes: None,
                tags: vec![],
                is_favorite: false,
            },
        )
        .unwrap();
        (inv.id, job.id)
    }

    fn compile(storage: &MemoryStorage, user_id: Uuid, investigation_id: Uuid) -> Report {
        compile_report(
            storage,
            user_id,
            CreateReportRequest {
                investigation_id,
                title: "Acme breach summary".to_string(),
                template: ReportTemplate::Standard,
                is_public: false,
                expires_at: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_compile_builds_sections_from_completed_jobs() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let (inv_id, job_id) = setup_investigation_with_completed_job(&storage, user_id);

        let report = compile(&storage, user_id, inv_id);
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].job_ids, vec![job_id]);
        assert!(report.sections[0].body.contains("1 known breach"));
        assert_eq!(report.metadata.item_count, 1);
        assert_eq!(
            report.metadata.tools_used,
            vec![dossier_core::ToolKind::EmailLookup]
        );
        assert!(report.metadata.date_range.is_some());
    }

    #[test]
    fn test_pending_jobs_excluded_from_sections() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let (inv_id, _) = setup_investigation_with_completed_job(&storage, user_id);

        let pending = job_service::create_job(
            &storage,
            user_id,
            ToolInput::UsernameSearch {
                username: "jdoe".to_string(),
            },
        )
        .unwrap();
        investigation_service::add_item(
            &storage,
            user_id,
            inv_id,
            CreateItemRequest {
                job_id: pending.id,
                notes: None,
                tags: vec![],
                is_favorite: false,
            },
        )
        .unwrap();

        let report = compile(&storage, user_id, inv_id);
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.metadata.item_count, 2);
    }

    #[test]
    fn test_private_report_hidden_from_strangers() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let (inv_id, _) = setup_investigation_with_completed_job(&storage, user_id);
        let report = compile(&storage, user_id, inv_id);

        // Owner reads fine
        assert!(get_report_checked(&storage, Some(user_id), report.id).is_ok());
        // Stranger and anonymous get not-found, not forbidden
        let err = get_report_checked(&storage, Some(new_entity_id()), report.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::EntityNotFound);
        let err = get_report_checked(&storage, None, report.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::EntityNotFound);
    }

    #[test]
    fn test_public_report_readable_anonymously() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let (inv_id, _) = setup_investigation_with_completed_job(&storage, user_id);
        let report = compile(&storage, user_id, inv_id);

        update_report(
            &storage,
            user_id,
            report.id,
            UpdateReportRequest {
                is_public: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(get_report_checked(&storage, None, report.id).is_ok());
    }

    #[test]
    fn test_expired_public_report_forbidden_for_everyone() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let (inv_id, _) = setup_investigation_with_completed_job(&storage, user_id);
        let report = compile(&storage, user_id, inv_id);

        update_report(
            &storage,
            user_id,
            report.id,
            UpdateReportRequest {
                is_public: Some(true),
                expires_at: Some(Utc::now() - Duration::hours(1)),
                ..Default::default()
            },
        )
        .unwrap();

        let err = get_report_checked(&storage, None, report.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        // The owner is locked out of the expired link too
        let err = get_report_checked(&storage, Some(user_id), report.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_report_is_a_snapshot() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let (inv_id, _) = setup_investigation_with_completed_job(&storage, user_id);
        let report = compile(&storage, user_id, inv_id);

        // Deleting the investigation afterwards leaves the report intact.
        investigation_service::delete_investigation(&storage, user_id, inv_id).unwrap();
        let fetched = get_report_checked(&storage, Some(user_id), report.id).unwrap();
        assert_eq!(fetched.sections.len(), 1);
    }
}
