use crate::error::ProcessingError;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Quality for the re-encoded product image (0-100)
pub const OPTIMIZED_QUALITY: u8 = 80;

/// Quality for the thumbnail (0-100)
pub const THUMBNAIL_QUALITY: u8 = 70;

/// Encoded image ready for upload
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    pub content_type: &'static str,
}

/// JPEG compressor
pub struct ImageCompressor;

impl ImageCompressor {
    /// Encode `img` as JPEG at `quality`. Alpha is dropped.
    pub fn compress_jpeg(img: &DynamicImage, quality: u8) -> Result<EncodedImage, ProcessingError> {
        let (width, height) = img.dimensions();
        let rgb_img = img.to_rgb8();

        let estimated_size = (width as usize * height as usize) / 4;
        let mut buffer = Vec::with_capacity(estimated_size);
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        encoder
            .encode_image(&rgb_img)
            .map_err(|e| ProcessingError::Canvas(format!("JPEG encoding failed: {}", e)))?;

        tracing::debug!(
            width,
            height,
            quality,
            size_bytes = buffer.len(),
            "Encoded JPEG"
        );

        Ok(EncodedImage {
            data: Bytes::from(buffer),
            width,
            height,
            content_type: JPEG_CONTENT_TYPE,
        })
    }
}
