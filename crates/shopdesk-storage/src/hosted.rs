//! Client for the hosted backend-as-a-service storage API.
//!
//! Endpoints:
//! - upload: `POST {url}/storage/v1/object/{bucket}/{key}`
//! - public URL: `{url}/storage/v1/object/public/{bucket}/{key}`
//! - remove: `DELETE {url}/storage/v1/object/{bucket}` with `{"prefixes": [...]}`

use crate::traits::{validate_key, ObjectStorage, StorageError, StorageResult, UploadOptions};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Hosted storage implementation
#[derive(Clone)]
pub struct HostedStorage {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Debug for HostedStorage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("HostedStorage")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HostedStorage {
    /// # Arguments
    /// * `base_url` - Project URL of the hosted service (e.g., "https://abc.example.co")
    /// * `api_key` - Service or anon key sent as both `apikey` and bearer token
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> StorageResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HostedStorage {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn encode_key(key: &str) -> String {
        key.split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            Self::encode_key(key)
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }
}

#[async_trait]
impl ObjectStorage for HostedStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        options: &UploadOptions,
    ) -> StorageResult<()> {
        validate_key(key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let response = self
            .authorized(self.http_client.post(self.object_url(bucket, key)))
            .header("Content-Type", &options.content_type)
            .header("cache-control", format!("max-age={}", options.cache_control))
            .header("x-upsert", options.upsert.to_string())
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                bucket = %bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Hosted storage upload failed"
            );
            if status == reqwest::StatusCode::CONFLICT {
                return Err(StorageError::AlreadyExists(format!("{}/{}", bucket, key)));
            }
            return Err(StorageError::UploadFailed(format!("{}: {}", status, body)));
        }

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Hosted storage upload successful"
        );

        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            Self::encode_key(key)
        )
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> StorageResult<()> {
        for key in keys {
            validate_key(key)?;
        }
        let start = std::time::Instant::now();
        let url = format!(
            "{}/storage/v1/object/{}",
            self.base_url,
            urlencoding::encode(bucket)
        );

        let response = self
            .authorized(self.http_client.delete(url))
            .json(&json!({ "prefixes": keys }))
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::DeleteFailed(format!("{}: {}", status, body)));
        }

        tracing::info!(
            bucket = %bucket,
            key_count = keys.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Hosted storage remove successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Hosted
    }
}
