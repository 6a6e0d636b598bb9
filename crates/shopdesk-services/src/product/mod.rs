//! Product creation workflow

mod error;
mod service;

pub use error::{ProductError, UploadAsset};
pub use service::{ProductService, WorkflowStage};
