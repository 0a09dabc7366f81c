//! PNG encoding for crop output, quadrants and composite tiles.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_rgb, EncodeError};

/// Encode RGB pixel data to PNG bytes.
///
/// PNG is lossless, so decoding the result yields the input pixels exactly.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    if bytes.is_empty() {
        return Err(EncodeError::EncodingFailed("PNG encoder produced no data".into()));
    }
    Ok(bytes)
}
