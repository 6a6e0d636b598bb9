//! Record store backed by the hosted service's REST row API
//! (`POST {url}/rest/v1/{table}`).

use crate::traits::{row_columns, validate_identifier, RecordError, RecordResult, RecordStore};
use async_trait::async_trait;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct HostedRecordStore {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Debug for HostedRecordStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("HostedRecordStore")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HostedRecordStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> RecordResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| RecordError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

/// Error bodies carry a `message` field; fall back to the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl RecordStore for HostedRecordStore {
    #[tracing::instrument(skip(self, row), fields(db.table = %table, db.operation = "insert"))]
    async fn insert(&self, table: &str, row: serde_json::Value) -> RecordResult<()> {
        validate_identifier(table)?;
        row_columns(&row)?;

        let response = self
            .http_client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| RecordError::InsertFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecordError::InsertFailed(error_message(&body)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        let store = HostedRecordStore::new("https://abc.example.co/", "key").unwrap();
        assert_eq!(
            store.table_url("products"),
            "https://abc.example.co/rest/v1/products"
        );
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        assert_eq!(
            error_message(r#"{"code":"23505","message":"duplicate key value"}"#),
            "duplicate key value"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_rejects_invalid_table_before_request() {
        let store = HostedRecordStore::new("http://127.0.0.1:9", "key").unwrap();
        let result = store
            .insert("products;--", serde_json::json!({ "name": "x" }))
            .await;
        assert!(matches!(result, Err(RecordError::InvalidIdentifier(_))));
    }
}
