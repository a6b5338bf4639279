//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! All services are initialized here and made available through AppState.

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::services::MediaService;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub media_service: MediaService,
}

impl AppState {
    pub fn new(config: ServiceConfig, media_service: MediaService) -> Self {
        Self {
            config,
            media_service,
        }
    }
}

/// Application setup - called once on startup
pub async fn setup(config: ServiceConfig) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("Storage directory: {:?}", config.storage_dir);

    let media_service = MediaService::open(config.storage_dir.clone()).await?;

    tracing::info!(
        "Application initialized successfully ({} media records in {:?})",
        media_service.media_count().await,
        media_service.base_path()
    );

    Ok(AppState::new(config, media_service))
}

/// Application teardown - flushes the registry
pub async fn shutdown(state: &AppState) -> Result<()> {
    tracing::info!("Shutting down application");
    state.media_service.close().await
}
