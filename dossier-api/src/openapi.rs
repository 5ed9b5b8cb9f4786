//! OpenAPI Specification for the Dossier API
//!
//! Generated with utoipa from the route annotations and type schemas.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::{ApiError, ErrorCode};
use crate::routes::{admin, batch, health, investigation, job, report, webhook};
use crate::types::*;

use dossier_core::{
    AuditLog, BatchJob, BatchOperation, BatchOptions, BatchStatus, DateRange, DnsRecord,
    FoundAccount, Investigation, InvestigationItem, InvestigationStats, InvestigationStatus, Job,
    JobStatus, JobTransition, OperationStatus, Profile, Report, ReportMetadata, ReportSection,
    ReportTemplate, ToolInput, ToolKind, ToolOutput, UserRole, WebhookEvent,
};

/// OpenAPI document for the Dossier API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dossier API",
        version = "0.1.0",
        description = "OSINT investigation backend: jobs, investigations, reports, batches, and webhooks",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local Development")
    ),
    tags(
        (name = "Jobs", description = "OSINT tool invocations and their lifecycle"),
        (name = "Investigations", description = "Case files grouping job results"),
        (name = "Reports", description = "Compiled, shareable investigation snapshots"),
        (name = "Batches", description = "Bulk tool operation submission"),
        (name = "Webhooks", description = "Delivery endpoint registration"),
        (name = "Admin", description = "User oversight and audit"),
        (name = "Health", description = "Service probes")
    ),
    paths(
        job::create_job,
        job::list_jobs,
        job::get_job,
        job::transition_job,

        investigation::create_investigation,
        investigation::list_investigations,
        investigation::get_investigation,
        investigation::update_investigation,
        investigation::delete_investigation,
        investigation::add_item,
        investigation::list_items,

        report::create_report,
        report::list_reports,
        report::get_report,
        report::update_report,
        report::delete_report,

        batch::create_batch,
        batch::list_batches,
        batch::get_batch,

        webhook::create_webhook,
        webhook::list_webhooks,
        webhook::get_webhook,
        webhook::update_webhook,
        webhook::delete_webhook,

        admin::list_users,
        admin::get_user,
        admin::update_user,
        admin::delete_user,
        admin::list_audit,

        health::health_check,
    ),
    components(
        schemas(
            // === Error Types ===
            ApiError, ErrorCode,

            // === Job Types ===
            CreateJobRequest, JobResponse, ListJobsResponse,

            // === Investigation Types ===
            CreateInvestigationRequest, UpdateInvestigationRequest,
            InvestigationResponse, InvestigationDetailResponse, ListInvestigationsResponse,
            CreateItemRequest, ItemResponse, ListItemsResponse,

            // === Report Types ===
            CreateReportRequest, UpdateReportRequest, ReportResponse, ListReportsResponse,

            // === Batch Types ===
            BatchOperationRequest, CreateBatchRequest, BatchResponse,
            BatchDetailResponse, ListBatchesResponse,

            // === Webhook Types ===
            CreateWebhookRequest, UpdateWebhookRequest, WebhookSummary,
            CreateWebhookResponse, WebhookResponse, ListWebhooksResponse,

            // === Admin Types ===
            UpdateUserRequest, UserResponse, ListUsersResponse, ListAuditResponse,

            // === Health ===
            health::HealthResponse,

            // === Core Domain Types ===
            Job, JobStatus, JobTransition,
            ToolKind, ToolInput, ToolOutput, FoundAccount, DnsRecord,
            Investigation, InvestigationItem, InvestigationStats, InvestigationStatus,
            Report, ReportTemplate, ReportMetadata, ReportSection, DateRange,
            BatchJob, BatchOperation, BatchOptions, BatchStatus, OperationStatus,
            WebhookEvent, Profile, UserRole, AuditLog,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the bearer token scheme referenced by the route annotations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

impl ApiDoc {
    /// Generate the spec as pretty-printed JSON.
    pub fn to_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }
}
