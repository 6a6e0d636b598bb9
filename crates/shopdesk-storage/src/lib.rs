//! Shopdesk Storage Library
//!
//! This crate provides the object storage abstraction used for product images
//! and its implementations for the hosted storage API, S3, and the local
//! filesystem.
//!
//! # Storage key format
//!
//! Keys are user-scoped and unique per upload:
//!
//! - **Image**: `{user_id}/{timestamp}_{token}.{ext}`
//! - **Thumbnail**: `{user_id}/{timestamp}_{token}_thumb.{ext}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized in the
//! `keys` module so all callers stay consistent.

pub mod factory;
#[cfg(feature = "storage-hosted")]
pub mod hosted;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-hosted")]
pub use hosted::HostedStorage;
pub use keys::{generate_product_keys, ProductKeys};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use shopdesk_core::StorageBackend;
pub use traits::{ObjectStorage, StorageError, StorageResult, UploadOptions};
