//! Image processing for product uploads
//!
//! - `optimize`: decode and re-encode at the original size
//! - `thumbnail`: scale so the longer side fits a fixed bound

pub mod optimizer;

pub use optimizer::JpegImageProcessor;

use crate::compression::EncodedImage;
use crate::error::ProcessingError;
use async_trait::async_trait;
use bytes::Bytes;

/// Longest side of a generated thumbnail, in pixels
pub const THUMBNAIL_MAX_DIMENSION: u32 = 200;

#[async_trait]
pub trait ImageProcessor: Send + Sync {
    /// Re-encode `data` at its original dimensions
    async fn optimize(&self, data: Bytes) -> Result<EncodedImage, ProcessingError>;

    /// Produce a bounded thumbnail from `data`
    async fn thumbnail(&self, data: Bytes) -> Result<EncodedImage, ProcessingError>;
}

/// Target size for a thumbnail whose longer side is `max`.
///
/// Aspect ratio is preserved, the shorter side is rounded and never below 1.
/// Images smaller than `max` are scaled up.
pub fn thumbnail_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (max.max(1), max.max(1));
    }

    let scale_short = |short: u32, long: u32| -> u32 {
        let scaled = (short as f64 * max as f64 / long as f64).round() as u32;
        scaled.max(1)
    };

    if width >= height {
        (max, scale_short(height, width))
    } else {
        (scale_short(width, height), max)
    }
}
