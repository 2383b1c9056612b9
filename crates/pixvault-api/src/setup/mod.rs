//! Application setup and initialization
//!
//! All startup wiring lives here so `main.rs` stays a thin shell and tests
//! can assemble the same router around in-memory collaborators.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::JwtAuth;
use crate::state::AppState;
use anyhow::{Context, Result};
use pixvault_core::Config;
use pixvault_db::FileRepository;
use pixvault_processing::{Thumbnailer, UploadCoordinator};
use std::sync::Arc;
use std::time::Duration;

/// Initialize the entire application
pub async fn initialize_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;
    tracing::info!("Configuration loaded and validated");

    let pool = database::setup_database(config).await?;
    let store = storage::setup_storage(config)?;

    let state = Arc::new(AppState {
        thumbnailer: Thumbnailer::new(config.thumbnail_width(), config.thumbnail_height()),
        coordinator: UploadCoordinator::new(
            store,
            Duration::from_secs(config.upload_timeout_seconds()),
        ),
        files: Arc::new(FileRepository::new(pool)),
        auth: config
            .auth_enabled()
            .then(|| JwtAuth::new(config.jwt_secret())),
        max_file_size_bytes: config.max_file_size_bytes(),
        allowed_extensions: config.allowed_extensions().to_vec(),
    });

    let router = routes::build_router(Arc::clone(&state));

    Ok((state, router))
}
