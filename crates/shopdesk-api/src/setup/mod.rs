//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use shopdesk_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())?;

    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        record_backend = %config.record_backend(),
        "Configuration loaded and validated successfully"
    );

    let state = services::initialize_services(&config).await?;
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
