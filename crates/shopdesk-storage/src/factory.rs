#[cfg(feature = "storage-hosted")]
use crate::HostedStorage;
#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{ObjectStorage, StorageBackend, StorageError, StorageResult};
use shopdesk_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn ObjectStorage>> {
    let backend = config.storage_backend();
    tracing::info!(backend = %backend, bucket = %config.storage_bucket(), "Creating object storage");

    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);

            Ok(Arc::new(S3Storage::new(region, endpoint)))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;
            let base_url = config
                .local_storage_base_url()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
                })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-hosted")]
        StorageBackend::Hosted => {
            let url = config
                .hosted_url()
                .ok_or_else(|| StorageError::ConfigError("HOSTED_URL not configured".to_string()))?;
            let api_key = config.hosted_api_key().ok_or_else(|| {
                StorageError::ConfigError("HOSTED_API_KEY not configured".to_string())
            })?;

            Ok(Arc::new(HostedStorage::new(url, api_key)?))
        }

        #[cfg(not(feature = "storage-hosted"))]
        StorageBackend::Hosted => Err(StorageError::ConfigError(
            "Hosted storage backend not available (storage-hosted feature not enabled)"
                .to_string(),
        )),
    }
}
