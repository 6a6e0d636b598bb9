use crate::traits::{validate_key, ObjectStorage, StorageError, StorageResult, UploadOptions};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStoreExt, PutMode, PutOptions, PutPayload,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// S3 storage implementation
///
/// One `AmazonS3` client is built lazily per bucket and reused afterwards.
#[derive(Clone)]
pub struct S3Storage {
    stores: Arc<RwLock<HashMap<String, Arc<AmazonS3>>>>,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(region: String, endpoint_url: Option<String>) -> Self {
        S3Storage {
            stores: Arc::new(RwLock::new(HashMap::new())),
            region,
            endpoint_url,
        }
    }

    fn store_for(&self, bucket: &str) -> StorageResult<Arc<AmazonS3>> {
        if let Some(store) = self
            .stores
            .read()
            .map_err(|_| StorageError::BackendError("S3 client cache poisoned".to_string()))?
            .get(bucket)
        {
            return Ok(store.clone());
        }

        let mut builder = AmazonS3Builder::from_env()
            .with_region(self.region.clone())
            .with_bucket_name(bucket.to_string());

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = Arc::new(
            builder
                .build()
                .map_err(|e| StorageError::ConfigError(e.to_string()))?,
        );

        self.stores
            .write()
            .map_err(|_| StorageError::BackendError("S3 client cache poisoned".to_string()))?
            .insert(bucket.to_string(), store.clone());

        Ok(store)
    }

    fn put_options(options: &UploadOptions) -> PutOptions {
        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(options.content_type.clone()),
        );
        attributes.insert(
            Attribute::CacheControl,
            AttributeValue::from(format!("max-age={}", options.cache_control)),
        );

        let mut put_options = PutOptions::default();
        put_options.attributes = attributes;
        if !options.upsert {
            put_options.mode = PutMode::Create;
        }
        put_options
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        validate_key(key)?;
        let store = self.store_for(bucket)?;
        let size = data.len() as u64;
        let location = Path::from(key.to_string());

        let start = std::time::Instant::now();

        let result = object_store::ObjectStore::put_opts(
            store.as_ref(),
            &location,
            PutPayload::from(data),
            Self::put_options(options),
        )
        .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            match e {
                ObjectStoreError::AlreadyExists { .. } => {
                    StorageError::AlreadyExists(format!("{}/{}", bucket, key))
                }
                other => StorageError::UploadFailed(other.to_string()),
            }
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    /// For AWS S3: `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
    /// For S3-compatible providers: path-style `{endpoint}/{bucket}/{key}`.
    fn public_url(&self, bucket: &str, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
        } else {
            format!("https://{}.s3.{}.amazonaws.com/{}", bucket, self.region, key)
        }
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> StorageResult<()> {
        for key in keys {
            validate_key(key)?;
        }
        let store = self.store_for(bucket)?;
        let start = std::time::Instant::now();

        let deletes = keys.iter().map(|key| {
            let store = store.clone();
            let location = Path::from(key.clone());
            async move {
                match store.delete(&location).await {
                    Ok(()) | Err(ObjectStoreError::NotFound { .. }) => Ok(()),
                    Err(e) => Err(format!("{}: {}", location, e)),
                }
            }
        });

        let failures: Vec<String> = futures::future::join_all(deletes)
            .await
            .into_iter()
            .filter_map(Result::err)
            .collect();

        if !failures.is_empty() {
            tracing::error!(
                bucket = %bucket,
                failures = ?failures,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 remove failed"
            );
            return Err(StorageError::DeleteFailed(failures.join("; ")));
        }

        tracing::info!(
            bucket = %bucket,
            key_count = keys.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 remove successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
