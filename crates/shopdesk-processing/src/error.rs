use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Input bytes are not a decodable image
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Raster surface could not be allocated or encoded
    #[error("Failed to render image: {0}")]
    Canvas(String),

    /// Blocking worker panicked or was cancelled
    #[error("Image processing task aborted: {0}")]
    Aborted(String),
}
