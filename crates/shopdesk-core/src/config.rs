//! Configuration module
//!
//! This module provides configuration for the dashboard server, the object
//! storage backend, and the record store backend. Values come from the
//! environment (with `.env` support through `dotenvy`).

use std::env;

use crate::storage_types::{RecordBackend, StorageBackend};

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 10;
const MAX_FILE_SIZE_MB: usize = 10;
const STORAGE_BUCKET: &str = "products";

/// Base configuration for the HTTP server
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// `json` for structured log lines, anything else for human-readable output
    pub log_format: String,
}

/// Dashboard configuration
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub base: BaseConfig,
    // Object storage configuration
    pub storage_backend: StorageBackend,
    pub storage_bucket: String,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Record store configuration
    pub record_backend: RecordBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    // Hosted backend-as-a-service (storage and/or rows)
    pub hosted_url: Option<String>,
    pub hosted_api_key: Option<String>,
    // Upload limits
    pub max_file_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<DashboardConfig>);

impl Config {
    fn as_dashboard(&self) -> &DashboardConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_dashboard().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = DashboardConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_dashboard().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_dashboard().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_dashboard().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_dashboard().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.as_dashboard().base.log_format
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_dashboard().storage_backend
    }

    pub fn storage_bucket(&self) -> &str {
        &self.as_dashboard().storage_bucket
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_dashboard().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_dashboard().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_dashboard().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_dashboard().local_storage_base_url.as_deref()
    }

    pub fn record_backend(&self) -> RecordBackend {
        self.as_dashboard().record_backend
    }

    pub fn database_url(&self) -> Option<&str> {
        self.as_dashboard().database_url.as_deref()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_dashboard().db_max_connections
    }

    pub fn hosted_url(&self) -> Option<&str> {
        self.as_dashboard().hosted_url.as_deref()
    }

    pub fn hosted_api_key(&self) -> Option<&str> {
        self.as_dashboard().hosted_api_key.as_deref()
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_dashboard().max_file_size_bytes
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

/// Upload limit in bytes for a limit given in megabytes
fn megabytes_to_bytes(megabytes: usize) -> Result<usize, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large: {}", megabytes))
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
        };

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Hosted,
        };

        let record_backend = match env::var("RECORD_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => RecordBackend::Hosted,
        };

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let config = DashboardConfig {
            base,
            storage_backend,
            storage_bucket: env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| STORAGE_BUCKET.to_string()),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            record_backend,
            database_url: env::var("DATABASE_URL").ok(),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            hosted_url: env::var("HOSTED_URL").ok(),
            hosted_api_key: env::var("HOSTED_API_KEY").ok(),
            max_file_size_bytes: megabytes_to_bytes(max_file_size_mb)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("STORAGE_BUCKET must not be empty"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
            StorageBackend::Hosted => self.validate_hosted("storage")?,
        }

        match self.record_backend {
            RecordBackend::Postgres => match self.database_url.as_deref() {
                Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {}
                Some(_) => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ))
                }
                None => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be set when using postgres record backend"
                    ))
                }
            },
            RecordBackend::Hosted => self.validate_hosted("record")?,
        }

        Ok(())
    }

    fn validate_hosted(&self, what: &str) -> Result<(), anyhow::Error> {
        match self.hosted_url.as_deref() {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
            Some(_) => return Err(anyhow::anyhow!("HOSTED_URL must be an http(s) URL")),
            None => {
                return Err(anyhow::anyhow!(
                    "HOSTED_URL must be set when using hosted {} backend",
                    what
                ))
            }
        }
        if self.hosted_api_key.is_none() {
            return Err(anyhow::anyhow!(
                "HOSTED_API_KEY must be set when using hosted {} backend",
                what
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_postgres_config() -> DashboardConfig {
        DashboardConfig {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                log_format: "text".to_string(),
            },
            storage_backend: StorageBackend::Local,
            storage_bucket: "products".to_string(),
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: Some("/tmp/shopdesk".to_string()),
            local_storage_base_url: Some("http://localhost:4000/media".to_string()),
            record_backend: RecordBackend::Postgres,
            database_url: Some("postgresql://localhost/shopdesk".to_string()),
            db_max_connections: 5,
            hosted_url: None,
            hosted_api_key: None,
            max_file_size_bytes: 1024,
        }
    }

    #[test]
    fn test_valid_local_postgres_config() {
        assert!(local_postgres_config().validate().is_ok());
    }

    #[test]
    fn test_local_backend_requires_base_url() {
        let mut config = local_postgres_config();
        config.local_storage_base_url = None;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LOCAL_STORAGE_BASE_URL"));
    }

    #[test]
    fn test_postgres_backend_rejects_other_urls() {
        let mut config = local_postgres_config();
        config.database_url = Some("mysql://localhost/shopdesk".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hosted_backend_requires_key() {
        let mut config = local_postgres_config();
        config.record_backend = RecordBackend::Hosted;
        config.hosted_url = Some("https://project.example.co".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("HOSTED_API_KEY"));

        config.hosted_api_key = Some("anon-key".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_detection() {
        let mut dashboard = local_postgres_config();
        dashboard.base.environment = "PROD".to_string();
        assert!(Config(Box::new(dashboard)).is_production());
    }

    #[test]
    fn test_file_size_limit_overflow_is_rejected() {
        assert_eq!(megabytes_to_bytes(10).unwrap(), 10 * 1024 * 1024);
        let err = megabytes_to_bytes(usize::MAX).unwrap_err();
        assert!(err.to_string().contains("MAX_FILE_SIZE_MB"));
    }
}
