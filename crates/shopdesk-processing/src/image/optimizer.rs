use super::{thumbnail_dimensions, ImageProcessor, THUMBNAIL_MAX_DIMENSION};
use crate::compression::{EncodedImage, ImageCompressor, OPTIMIZED_QUALITY, THUMBNAIL_QUALITY};
use crate::error::ProcessingError;
use async_trait::async_trait;
use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;
use std::time::Instant;

/// Largest raster side we are willing to allocate
const MAX_CANVAS_DIMENSION: u32 = 16_384;

/// Re-encodes product images as JPEG
#[derive(Debug, Clone)]
pub struct JpegImageProcessor {
    optimize_quality: u8,
    thumbnail_quality: u8,
    thumbnail_max: u32,
}

impl Default for JpegImageProcessor {
    fn default() -> Self {
        Self {
            optimize_quality: OPTIMIZED_QUALITY,
            thumbnail_quality: THUMBNAIL_QUALITY,
            thumbnail_max: THUMBNAIL_MAX_DIMENSION,
        }
    }
}

impl JpegImageProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    fn reader(data: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, ProcessingError> {
        ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ProcessingError::Decode(e.to_string()))
    }

    /// Header dimensions are checked before any pixel buffer is allocated
    fn decode(data: &[u8]) -> Result<DynamicImage, ProcessingError> {
        let (width, height) = Self::reader(data)?
            .into_dimensions()
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;
        if width == 0 || height == 0 {
            return Err(ProcessingError::Decode("image has no pixels".to_string()));
        }
        if width > MAX_CANVAS_DIMENSION || height > MAX_CANVAS_DIMENSION {
            return Err(ProcessingError::Canvas(format!(
                "{}x{} exceeds the {}px canvas limit",
                width, height, MAX_CANVAS_DIMENSION
            )));
        }

        Self::reader(data)?
            .decode()
            .map_err(|e| ProcessingError::Decode(e.to_string()))
    }

    fn optimize_blocking(data: &[u8], quality: u8) -> Result<EncodedImage, ProcessingError> {
        let img = Self::decode(data)?;
        ImageCompressor::compress_jpeg(&img, quality)
    }

    fn thumbnail_blocking(
        data: &[u8],
        max: u32,
        quality: u8,
    ) -> Result<EncodedImage, ProcessingError> {
        let img = Self::decode(data)?;
        let (width, height) = img.dimensions();
        let (target_w, target_h) = thumbnail_dimensions(width, height, max);
        let resized = img.resize_exact(target_w, target_h, FilterType::Triangle);
        ImageCompressor::compress_jpeg(&resized, quality)
    }
}

/// Run CPU-bound image work off the async executor
async fn run_blocking<F>(op: &'static str, f: F) -> Result<EncodedImage, ProcessingError>
where
    F: FnOnce() -> Result<EncodedImage, ProcessingError> + Send + 'static,
{
    let start = Instant::now();
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ProcessingError::Aborted(e.to_string()))?;

    match &result {
        Ok(encoded) => tracing::info!(
            op,
            width = encoded.width,
            height = encoded.height,
            size_bytes = encoded.data.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Image processed"
        ),
        Err(e) => tracing::debug!(op, error = %e, "Image processing failed"),
    }

    result
}

#[async_trait]
impl ImageProcessor for JpegImageProcessor {
    async fn optimize(&self, data: Bytes) -> Result<EncodedImage, ProcessingError> {
        let quality = self.optimize_quality;
        run_blocking("optimize", move || Self::optimize_blocking(&data, quality)).await
    }

    async fn thumbnail(&self, data: Bytes) -> Result<EncodedImage, ProcessingError> {
        let max = self.thumbnail_max;
        let quality = self.thumbnail_quality;
        run_blocking("thumbnail", move || {
            Self::thumbnail_blocking(&data, max, quality)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 40, 90])));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buffer)
    }

    #[tokio::test]
    async fn test_optimize_keeps_dimensions() {
        let processor = JpegImageProcessor::new();
        let encoded = processor.optimize(png_bytes(320, 240)).await.unwrap();

        assert_eq!((encoded.width, encoded.height), (320, 240));
        assert_eq!(encoded.content_type, "image/jpeg");
        assert_eq!(
            image::guess_format(&encoded.data).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[tokio::test]
    async fn test_thumbnail_from_optimized_output() {
        let processor = JpegImageProcessor::new();
        let optimized = processor.optimize(png_bytes(400, 200)).await.unwrap();
        let thumb = processor.thumbnail(optimized.data).await.unwrap();

        assert_eq!((thumb.width, thumb.height), (200, 100));
        let decoded = image::load_from_memory(&thumb.data).unwrap();
        assert_eq!(decoded.dimensions(), (200, 100));
    }

    #[tokio::test]
    async fn test_portrait_thumbnail() {
        let processor = JpegImageProcessor::new();
        let thumb = processor.thumbnail(png_bytes(200, 400)).await.unwrap();
        assert_eq!((thumb.width, thumb.height), (100, 200));
    }

    #[tokio::test]
    async fn test_garbage_input_is_decode_error() {
        let processor = JpegImageProcessor::new();
        let result = processor
            .optimize(Bytes::from_static(b"definitely not an image"))
            .await;
        assert!(matches!(result, Err(ProcessingError::Decode(_))));

        let result = processor.thumbnail(Bytes::new()).await;
        assert!(matches!(result, Err(ProcessingError::Decode(_))));
    }

    #[tokio::test]
    async fn test_oversized_canvas_rejected_before_decode() {
        let processor = JpegImageProcessor::new();
        let wide = png_bytes(MAX_CANVAS_DIMENSION + 1, 1);

        let result = processor.optimize(wide.clone()).await;
        assert!(matches!(result, Err(ProcessingError::Canvas(_))));

        let result = processor.thumbnail(wide).await;
        assert!(matches!(result, Err(ProcessingError::Canvas(_))));
    }
}
