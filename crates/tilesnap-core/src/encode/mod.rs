//! Image encoding for TileSnap.
//!
//! This module provides functionality for:
//! - Encoding crop output, quadrants and composite tiles as PNG
//! - Encoding composite tiles as JPEG with configurable quality
//!
//! # Architecture
//!
//! All operations are synchronous and single-threaded within WASM. A failed
//! encode never yields a partial buffer: callers get an `EncodeError` and
//! drop the whole batch.

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec produced no data
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output container format for exported images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OutputFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// JPEG at the given quality (1-100).
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// File extension used in export file names.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg { .. } => "jpg",
        }
    }

    /// MIME type handed to the download sink.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// Encode a decoded image in the given format.
pub fn encode(image: &DecodedImage, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height),
        OutputFormat::Jpeg { quality } => {
            encode_jpeg(&image.pixels, image.width, image.height, quality)
        }
    }
}

/// Shared validation for RGB8 input buffers.
fn validate_rgb(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_and_mime() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Jpeg { quality: 90 }.extension(), "jpg");
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
        assert_eq!(OutputFormat::Jpeg { quality: 90 }.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_encode_dispatch() {
        let img = DecodedImage::filled(8, 8, [1, 2, 3]);

        let png = encode(&img, OutputFormat::Png).unwrap();
        assert_eq!(&png[0..4], &[0x89, b'P', b'N', b'G']);

        let jpeg = encode(&img, OutputFormat::Jpeg { quality: 80 }).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_validate_rgb() {
        assert!(validate_rgb(&[0; 12], 2, 2).is_ok());
        assert!(matches!(
            validate_rgb(&[0; 11], 2, 2),
            Err(EncodeError::InvalidPixelData {
                expected: 12,
                actual: 11
            })
        ));
        assert!(matches!(
            validate_rgb(&[], 0, 2),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_output_format_serde_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Png);
    }
}
