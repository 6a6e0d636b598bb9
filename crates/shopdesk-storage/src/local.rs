use crate::traits::{validate_key, ObjectStorage, StorageError, StorageResult, UploadOptions};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Buckets map to directories under `base_path`; objects are served from
/// `{base_url}/{bucket}/{key}`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/shopdesk/media")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:4000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert bucket and key to a filesystem path inside the base directory
    fn key_to_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        validate_key(bucket)?;
        validate_key(key)?;
        if bucket.contains('/') {
            return Err(StorageError::InvalidKey(format!(
                "Bucket name must not contain '/': {}",
                bucket
            )));
        }
        Ok(self.base_path.join(bucket).join(key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        let path = self.key_to_path(bucket, key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut open = fs::OpenOptions::new();
        open.write(true);
        if options.upsert {
            open.create(true).truncate(true);
        } else {
            open.create_new(true);
        }

        let mut file = open.open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                StorageError::AlreadyExists(format!("{}/{}", bucket, key))
            } else {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            }
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            content_type = %options.content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), bucket, key)
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> StorageResult<()> {
        let start = std::time::Instant::now();

        for key in keys {
            let path = self.key_to_path(bucket, key)?;

            if !fs::try_exists(&path).await.unwrap_or(false) {
                continue;
            }

            fs::remove_file(&path).await.map_err(|e| {
                StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }

        tracing::info!(
            bucket = %bucket,
            key_count = keys.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage remove successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn storage(dir: &Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:4000/media/".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_upload_writes_file() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        storage
            .upload(
                "products",
                "user/1_abc.jpg",
                Bytes::from_static(b"jpeg bytes"),
                &UploadOptions::new("image/jpeg"),
            )
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("products/user/1_abc.jpg")).unwrap();
        assert_eq!(written, b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_public_url() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        assert_eq!(
            storage.public_url("products", "user/1_abc.jpg"),
            "http://localhost:4000/media/products/user/1_abc.jpg"
        );
    }

    #[tokio::test]
    async fn test_upload_without_upsert_rejects_existing_key() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let options = UploadOptions::new("image/jpeg");

        storage
            .upload("products", "u/a.jpg", Bytes::from_static(b"one"), &options)
            .await
            .unwrap();
        let result = storage
            .upload("products", "u/a.jpg", Bytes::from_static(b"two"), &options)
            .await;
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));

        let upsert = UploadOptions {
            upsert: true,
            ..options
        };
        storage
            .upload("products", "u/a.jpg", Bytes::from_static(b"two"), &upsert)
            .await
            .unwrap();
        let written = std::fs::read(dir.path().join("products/u/a.jpg")).unwrap();
        assert_eq!(written, b"two");
    }

    #[tokio::test]
    async fn test_remove_deletes_and_ignores_missing() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let options = UploadOptions::new("image/jpeg");

        storage
            .upload("products", "u/a.jpg", Bytes::from_static(b"a"), &options)
            .await
            .unwrap();

        storage
            .remove(
                "products",
                &["u/a.jpg".to_string(), "u/missing.jpg".to_string()],
            )
            .await
            .unwrap();

        assert!(!dir.path().join("products/u/a.jpg").exists());
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let options = UploadOptions::new("image/jpeg");

        let result = storage
            .upload("products", "../../etc/passwd", Bytes::new(), &options)
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.remove("../products", &["a.jpg".to_string()]).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.remove("products", &["/etc/passwd".to_string()]).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
