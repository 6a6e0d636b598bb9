#[cfg(feature = "hosted")]
use crate::HostedRecordStore;
#[cfg(feature = "postgres")]
use crate::PgRecordStore;
use crate::{RecordError, RecordResult, RecordStore};
use shopdesk_core::{Config, RecordBackend};
use std::sync::Arc;

/// Create a record store based on configuration
///
/// The postgres backend applies pending migrations before it is returned.
pub async fn create_record_store(config: &Config) -> RecordResult<Arc<dyn RecordStore>> {
    let backend = config.record_backend();
    tracing::info!(backend = %backend, "Creating record store");

    match backend {
        #[cfg(feature = "postgres")]
        RecordBackend::Postgres => {
            let url = config.database_url().ok_or_else(|| {
                RecordError::ConfigError("DATABASE_URL not configured".to_string())
            })?;
            let store = PgRecordStore::connect(url, config.db_max_connections()).await?;
            store.run_migrations().await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "postgres"))]
        RecordBackend::Postgres => Err(RecordError::ConfigError(
            "Postgres record backend not available (postgres feature not enabled)".to_string(),
        )),

        #[cfg(feature = "hosted")]
        RecordBackend::Hosted => {
            let url = config
                .hosted_url()
                .ok_or_else(|| RecordError::ConfigError("HOSTED_URL not configured".to_string()))?;
            let api_key = config.hosted_api_key().ok_or_else(|| {
                RecordError::ConfigError("HOSTED_API_KEY not configured".to_string())
            })?;
            Ok(Arc::new(HostedRecordStore::new(url, api_key)?))
        }

        #[cfg(not(feature = "hosted"))]
        RecordBackend::Hosted => Err(RecordError::ConfigError(
            "Hosted record backend not available (hosted feature not enabled)".to_string(),
        )),
    }
}
