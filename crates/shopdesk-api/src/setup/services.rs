//! Backend clients and business services

use crate::state::AppState;
use anyhow::{Context, Result};
use shopdesk_core::Config;
use shopdesk_db::create_record_store;
use shopdesk_processing::JpegImageProcessor;
use shopdesk_services::ProductService;
use shopdesk_storage::create_storage;
use std::sync::Arc;

pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize object storage")?;
    let records = create_record_store(config)
        .await
        .context("Failed to initialize record store")?;

    let products = ProductService::new(
        storage,
        records,
        Arc::new(JpegImageProcessor::new()),
        config.storage_bucket(),
    );

    tracing::info!(bucket = %products.bucket(), "Product service ready");

    Ok(Arc::new(AppState::new(config.clone(), products)))
}
