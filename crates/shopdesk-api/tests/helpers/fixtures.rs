//! Test fixtures: encoded images.

use std::io::Cursor;

/// Solid-colour PNG of the given size
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([240, 180, 20]),
    ));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer
}
