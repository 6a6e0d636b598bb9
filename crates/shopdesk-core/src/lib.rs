//! Shopdesk Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! shared across all Shopdesk components.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, DashboardConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ImageUpload, NewProduct, ProductFormData, PRODUCTS_TABLE};
pub use storage_types::{RecordBackend, StorageBackend};
