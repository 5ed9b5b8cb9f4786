//! Business logic, extracted from route handlers.
//!
//! Services own the ownership checks and cross-entity rules; route
//! handlers stay thin. Ownership failures surface as not-found so callers
//! cannot probe for the existence of other users' resources.

pub mod admin_service;
pub mod batch_service;
pub mod investigation_service;
pub mod job_service;
pub mod report_service;
pub mod webhook_service;
