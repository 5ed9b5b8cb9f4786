//! Shared application state.

use crate::auth::AuthConfig;
use crate::config::ApiConfig;
use dossier_storage::{MemoryStorage, StorageTrait};
use std::sync::Arc;

/// State shared by every route handler.
///
/// The storage backend is held behind the trait object so tests and
/// deployments can swap implementations without touching handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageTrait>,
    pub auth: Arc<AuthConfig>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(storage: Arc<dyn StorageTrait>, auth: AuthConfig, config: ApiConfig) -> Self {
        Self {
            storage,
            auth: Arc::new(auth),
            config: Arc::new(config),
        }
    }

    /// In-memory state for tests and single-process deployments.
    pub fn in_memory(auth: AuthConfig) -> Self {
        Self::new(
            Arc::new(MemoryStorage::new()),
            auth,
            ApiConfig::default(),
        )
    }
}
