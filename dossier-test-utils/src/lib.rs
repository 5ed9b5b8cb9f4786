//! Dossier Test Utilities
//!
//! Centralized test infrastructure for the Dossier workspace:
//! - Proptest generators for entity and payload types
//! - Fixtures for common scenarios

// Re-export the in-memory store from its source crate
pub use dossier_storage::{MemoryStorage, StorageTrait};

// Re-export core types for convenience
pub use dossier_core::{
    new_entity_id, normalize_tags, AuditLog, BatchJob, BatchOperation, BatchOptions, BatchStatus,
    DossierError, DossierResult, EntityId, Investigation, InvestigationItem, InvestigationStats,
    InvestigationStatus, Job, JobStatus, JobTransition, Profile, Report, ReportAccess,
    ReportMetadata, ReportSection, ReportTemplate, Timestamp, ToolInput, ToolKind, ToolOutput,
    UserRole, Webhook, WebhookEvent,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for Dossier entity and payload types.

    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Generate a random UUID.
    pub fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    /// Generate a timestamp within 2020-2030.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64)
            .prop_map(|secs| chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now))
    }

    /// Generate a JobStatus variant.
    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Pending),
            Just(JobStatus::Running),
            Just(JobStatus::Completed),
            Just(JobStatus::Failed),
        ]
    }

    /// Generate a ToolKind variant.
    pub fn arb_tool_kind() -> impl Strategy<Value = ToolKind> {
        prop_oneof![
            Just(ToolKind::UsernameSearch),
            Just(ToolKind::DomainRecon),
            Just(ToolKind::EmailLookup),
            Just(ToolKind::PhoneLookup),
            Just(ToolKind::ImageMetadata),
        ]
    }

    /// Generate a valid ToolInput that passes input validation.
    pub fn arb_tool_input() -> impl Strategy<Value = ToolInput> {
        prop_oneof![
            "[a-z][a-z0-9_]{2,15}".prop_map(|username| ToolInput::UsernameSearch { username }),
            "[a-z]{3,12}\\.(com|org|net)".prop_map(|domain| ToolInput::DomainRecon { domain }),
            "[a-z]{2,10}@[a-z]{3,10}\\.com".prop_map(|email| ToolInput::EmailLookup { email }),
            "\\+[0-9]{8,12}".prop_map(|phone| ToolInput::PhoneLookup { phone }),
            "[a-z]{3,10}\\.jpg".prop_map(|name| ToolInput::ImageMetadata {
                image_url: format!("https://img.example.com/{}", name),
            }),
        ]
    }

    /// Generate a ToolOutput matching an arbitrary tool.
    pub fn arb_tool_output() -> impl Strategy<Value = ToolOutput> {
        prop_oneof![
            Just(ToolOutput::UsernameSearch {
                accounts: vec![],
                raw: None,
            }),
            Just(ToolOutput::DomainRecon {
                records: vec![],
                subdomains: vec![],
                raw: None,
            }),
            proptest::collection::vec("[a-z]{4,12}-20[0-9]{2}", 0..4).prop_map(|breaches| {
                ToolOutput::EmailLookup {
                    breaches,
                    raw: None,
                }
            }),
        ]
    }

    /// Generate a terminal JobTransition (Completed with output, or Failed
    /// with a non-blank message).
    pub fn arb_terminal_transition() -> impl Strategy<Value = JobTransition> {
        prop_oneof![
            arb_tool_output().prop_map(JobTransition::completed),
            "[a-z ]{1,40}[a-z]".prop_map(JobTransition::failed),
        ]
    }

    /// Generate any structurally valid JobTransition request.
    pub fn arb_transition() -> impl Strategy<Value = JobTransition> {
        prop_oneof![
            (0i32..=100).prop_map(JobTransition::running),
            arb_terminal_transition(),
        ]
    }

    /// Generate a tag list, possibly with duplicates and mixed case.
    pub fn arb_tags() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[A-Za-z]{2,10}", 0..6)
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Ready-made entities for common test scenarios.

    use super::*;
    use dossier_core::apply_transition;
    use dossier_storage::StorageTrait;
    use uuid::Uuid;

    /// A pending username-search job.
    pub fn pending_job(user_id: Uuid) -> Job {
        Job::new(
            user_id,
            ToolInput::UsernameSearch {
                username: "jdoe".to_string(),
            },
        )
        .expect("fixture input is valid")
    }

    /// A completed email-lookup job with one breach hit.
    pub fn completed_job(user_id: Uuid) -> Job {
        let job = Job::new(
            user_id,
            ToolInput::EmailLookup {
                email: "target@example.com".to_string(),
            },
        )
        .expect("fixture input is valid");
        apply_transition(
            job,
            &JobTransition::completed(ToolOutput::EmailLookup {
                breaches: vec!["megacorp-2021".to_string()],
                raw: None,
            }),
        )
        .expect("fixture transition is valid")
    }

    /// A failed domain-recon job.
    pub fn failed_job(user_id: Uuid) -> Job {
        let job = Job::new(
            user_id,
            ToolInput::DomainRecon {
                domain: "example.com".to_string(),
            },
        )
        .expect("fixture input is valid");
        apply_transition(job, &JobTransition::failed("tool exited 1"))
            .expect("fixture transition is valid")
    }

    /// An investigation with no items.
    pub fn empty_investigation(user_id: Uuid) -> Investigation {
        Investigation::new(user_id, "acme", Some("Acme Corp case".to_string()), vec![])
    }

    /// A plain user profile.
    pub fn user_profile(user_id: Uuid) -> Profile {
        Profile::new(user_id, "user@example.com", UserRole::User)
    }

    /// An active admin profile.
    pub fn admin_profile(user_id: Uuid) -> Profile {
        Profile::new(user_id, "admin@example.com", UserRole::Admin)
    }

    /// A store pre-seeded with one admin and one plain user, returning
    /// (storage, admin_id, user_id).
    pub fn storage_with_profiles() -> (MemoryStorage, Uuid, Uuid) {
        let storage = MemoryStorage::new();
        let admin_id = new_entity_id();
        let user_id = new_entity_id();
        storage
            .profile_insert(&admin_profile(admin_id))
            .expect("fresh store accepts inserts");
        storage
            .profile_insert(&user_profile(user_id))
            .expect("fresh store accepts inserts");
        (storage, admin_id, user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_generated_inputs_validate(input in arb_tool_input()) {
            prop_assert!(input.validate().is_ok());
        }

        #[test]
        fn prop_terminal_transitions_apply_to_fresh_jobs(
            transition in arb_terminal_transition(),
        ) {
            let job = fixtures::pending_job(new_entity_id());
            let job = dossier_core::apply_transition(job, &transition).unwrap();
            prop_assert!(job.status.is_terminal());
        }
    }

    #[test]
    fn test_fixture_jobs_have_expected_statuses() {
        let user_id = new_entity_id();
        assert_eq!(fixtures::pending_job(user_id).status, JobStatus::Pending);
        assert_eq!(
            fixtures::completed_job(user_id).status,
            JobStatus::Completed
        );
        assert_eq!(fixtures::failed_job(user_id).status, JobStatus::Failed);
    }
}
