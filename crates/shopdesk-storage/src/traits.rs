//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Per-upload options forwarded to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: String,
    /// Cache lifetime in seconds, as sent in the `Cache-Control` max-age
    pub cache_control: String,
    /// Overwrite an existing object under the same key
    pub upsert: bool,
}

impl UploadOptions {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            cache_control: "3600".to_string(),
            upsert: false,
        }
    }
}

/// Object storage capability
///
/// All storage backends (hosted API, S3, local filesystem) implement this trait,
/// so the product workflow never couples to a vendor client and can be faked in tests.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key` in `bucket`
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<()>;

    /// Publicly resolvable URL for a stored object
    fn public_url(&self, bucket: &str, key: &str) -> String;

    /// Delete every key in `keys`. Keys that do not exist are ignored.
    async fn remove(&self, bucket: &str, keys: &[String]) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Reject keys that could escape the bucket
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.contains("..") || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
