//! Shopdesk Services Layer
//!
//! Business orchestration lives here: the product-creation workflow ties image
//! processing, object storage and the record store together. HTTP handling
//! stays thin in shopdesk-api.

pub mod product;

pub use product::{ProductError, ProductService, UploadAsset, WorkflowStage};
pub use shopdesk_db::{RecordError, RecordStore};
pub use shopdesk_processing::{ImageProcessor, JpegImageProcessor};
pub use shopdesk_storage::{ObjectStorage, StorageError, UploadOptions};
