use async_trait::async_trait;
use thiserror::Error;

/// Record store operation errors
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Insert failed: {0}")]
    InsertFailed(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid row: {0}")]
    InvalidRow(String),

    #[error("Record backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for record store operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Structured row persistence
///
/// `row` must be a JSON object whose keys are column names of `table`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, table: &str, row: serde_json::Value) -> RecordResult<()>;
}

/// Accept plain SQL identifiers only (`[A-Za-z_][A-Za-z0-9_]*`)
pub fn validate_identifier(identifier: &str) -> RecordResult<()> {
    let mut chars = identifier.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid && identifier.len() <= 63 {
        Ok(())
    } else {
        Err(RecordError::InvalidIdentifier(identifier.to_string()))
    }
}

/// Column names of a row object, validated as identifiers
pub fn row_columns(row: &serde_json::Value) -> RecordResult<Vec<&str>> {
    let object = row
        .as_object()
        .ok_or_else(|| RecordError::InvalidRow("Row must be a JSON object".to_string()))?;
    if object.is_empty() {
        return Err(RecordError::InvalidRow("Row has no columns".to_string()));
    }
    object
        .keys()
        .map(|key| validate_identifier(key).map(|_| key.as_str()))
        .collect()
}
