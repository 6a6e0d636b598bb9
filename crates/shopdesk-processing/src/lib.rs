//! Shopdesk image processing
//!
//! Product images are re-encoded before upload and a bounded thumbnail is
//! derived from the optimized output.

pub mod compression;
pub mod error;
pub mod image;

pub use compression::{EncodedImage, JPEG_CONTENT_TYPE};
pub use error::ProcessingError;
pub use crate::image::{thumbnail_dimensions, ImageProcessor, JpegImageProcessor};
