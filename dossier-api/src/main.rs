//! Dossier API Server Entry Point
//!
//! Bootstraps configuration and starts the Axum HTTP server over the
//! in-memory store.

use std::sync::Arc;

use dossier_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState, AuthConfig};
use dossier_storage::MemoryStorage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api_config = ApiConfig::from_env();
    let auth_config = AuthConfig::from_env()?;
    let addr = api_config.bind_addr();

    let state = AppState::new(Arc::new(MemoryStorage::new()), auth_config, api_config);
    let app = create_api_router(state);

    tracing::info!(%addr, "Starting Dossier API server");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
