//! Client-side job polling helper.
//!
//! The external executor drives job status; callers that want to block
//! until a job settles poll it at a fixed interval. The timeout gives up
//! locally only: the underlying job keeps running and is not cancelled.

use std::time::Duration;

use dossier_core::Job;
use dossier_storage::StorageTrait;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Outcome of waiting on a job.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The job reached Completed or Failed.
    Terminal(Job),
    /// The wait budget ran out; carries the last observed state.
    TimedOut(Job),
}

/// Cooperative polling loop over the job store.
#[derive(Debug, Clone, Copy)]
pub struct JobPoller {
    /// Delay between reads.
    pub interval: Duration,
    /// Total wait budget before giving up locally.
    pub max_wait: Duration,
}

impl Default for JobPoller {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_wait: Duration::from_secs(300),
        }
    }
}

impl JobPoller {
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }

    /// Poll `job_id` until it reaches a terminal status or the wait budget
    /// runs out. Ownership is enforced on every read.
    pub async fn wait_for_terminal(
        &self,
        storage: &dyn StorageTrait,
        user_id: Uuid,
        job_id: Uuid,
    ) -> ApiResult<PollOutcome> {
        let deadline = tokio::time::Instant::now() + self.max_wait;
        loop {
            let job = storage
                .job_get(job_id)?
                .filter(|job| job.user_id == user_id)
                .ok_or_else(|| ApiError::entity_not_found("job", job_id))?;

            if job.status.is_terminal() {
                return Ok(PollOutcome::Terminal(job));
            }
            if tokio::time::Instant::now() + self.interval > deadline {
                return Ok(PollOutcome::TimedOut(job));
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::job_service;
    use dossier_core::{new_entity_id, JobStatus, JobTransition, ToolInput};
    use dossier_storage::MemoryStorage;
    use std::sync::Arc;

    fn pending_job(storage: &MemoryStorage, user_id: Uuid) -> Job {
        job_service::create_job(
            storage,
            user_id,
            ToolInput::UsernameSearch {
                username: "jdoe".to_string(),
            },
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_terminal_returns_immediately() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let job = pending_job(&storage, user_id);
        job_service::transition_job(&storage, user_id, job.id, &JobTransition::failed("x"))
            .unwrap();

        let outcome = JobPoller::default()
            .wait_for_terminal(&storage, user_id, job.id)
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            PollOutcome::Terminal(job) if job.status == JobStatus::Failed
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_without_cancelling() {
        let storage = MemoryStorage::new();
        let user_id = new_entity_id();
        let job = pending_job(&storage, user_id);

        let outcome = JobPoller::default()
            .wait_for_terminal(&storage, user_id, job.id)
            .await
            .unwrap();
        assert!(matches!(&outcome, PollOutcome::TimedOut(observed) if observed.id == job.id));

        // The job itself was not touched by the timeout.
        let untouched = job_service::get_owned_job(&storage, user_id, job.id).unwrap();
        assert_eq!(untouched.status, JobStatus::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_observes_late_completion() {
        let storage = Arc::new(MemoryStorage::new());
        let user_id = new_entity_id();
        let job = pending_job(&storage, user_id);

        let writer = storage.clone();
        let job_id = job.id;
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(7)).await;
            job_service::transition_job(
                writer.as_ref(),
                user_id,
                job_id,
                &JobTransition::failed("tool exited 1"),
            )
            .unwrap();
        });

        let outcome = JobPoller::default()
            .wait_for_terminal(storage.as_ref(), user_id, job.id)
            .await
            .unwrap();
        assert!(matches!(outcome, PollOutcome::Terminal(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_job_is_not_found() {
        let storage = MemoryStorage::new();
        let result = JobPoller::default()
            .wait_for_terminal(&storage, new_entity_id(), new_entity_id())
            .await;
        assert!(result.is_err());
    }
}
