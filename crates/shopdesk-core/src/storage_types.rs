use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Object storage backend types
///
/// Defined in core because both configuration and the storage factory use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
    /// Storage API of the hosted backend-as-a-service
    Hosted,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            "hosted" => Ok(StorageBackend::Hosted),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Hosted => write!(f, "hosted"),
        }
    }
}

/// Record store backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordBackend {
    Postgres,
    /// REST row API of the hosted backend-as-a-service
    Hosted,
}

impl FromStr for RecordBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(RecordBackend::Postgres),
            "hosted" => Ok(RecordBackend::Hosted),
            _ => Err(anyhow::anyhow!("Invalid record backend: {}", s)),
        }
    }
}

impl Display for RecordBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RecordBackend::Postgres => write!(f, "postgres"),
            RecordBackend::Hosted => write!(f, "hosted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!("S3".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert_eq!(
            "hosted".parse::<StorageBackend>().unwrap(),
            StorageBackend::Hosted
        );
        assert!("nfs".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_record_backend_parse() {
        assert_eq!(
            "postgresql".parse::<RecordBackend>().unwrap(),
            RecordBackend::Postgres
        );
        assert_eq!(RecordBackend::Hosted.to_string(), "hosted");
    }
}
