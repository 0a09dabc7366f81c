//! Image cropping operations.
//!
//! Cropping copies whole rows out of the source buffer, so the cost is
//! proportional to the output size, not the source size.

use thiserror::Error;

use crate::config::TileConfig;
use crate::decode::{resize, DecodeError, DecodedImage};
use crate::encode::{encode_png, EncodeError};
use crate::geometry::PixelRect;

/// Errors from confirming a crop.
#[derive(Debug, Error)]
pub enum CropError {
    /// The region is empty once clamped to the image.
    #[error("Crop region {width}x{height} at ({x}, {y}) is empty inside the image")]
    EmptyRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// The result of confirming a crop: the target-sized pixels and their PNG.
#[derive(Debug, Clone)]
pub struct ConfirmedCrop {
    pub image: DecodedImage,
    pub png: Vec<u8>,
}

/// Copy a region out of an image. The caller guarantees it lies inside.
pub(crate) fn copy_region(image: &DecodedImage, x: u32, y: u32, width: u32, height: u32) -> DecodedImage {
    let src_stride = image.width as usize * 3;
    let dst_stride = width as usize * 3;
    let mut output = Vec::with_capacity(dst_stride * height as usize);

    for row in y..y + height {
        let start = row as usize * src_stride + x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + dst_stride]);
    }

    DecodedImage::new(width, height, output)
}

/// Extract `rect` from `image`, clamping it to the image bounds.
///
/// A full-image rect returns a copy of the original.
///
/// # Errors
///
/// Returns `CropError::EmptyRegion` when nothing of the rect overlaps
/// the image, and `CropError::Decode` when the pixel buffer does not match
/// the image dimensions.
pub fn crop_region(image: &DecodedImage, rect: PixelRect) -> Result<DecodedImage, CropError> {
    image.validate()?;

    let x = rect.x.min(image.width);
    let y = rect.y.min(image.height);
    let width = rect.width.min(image.width - x);
    let height = rect.height.min(image.height - y);

    if width == 0 || height == 0 {
        return Err(CropError::EmptyRegion {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        });
    }

    // Fast path: full crop returns a clone
    if x == 0 && y == 0 && width == image.width && height == image.height {
        return Ok(image.clone());
    }

    Ok(copy_region(image, x, y, width, height))
}

/// Crop `rect` and stretch the result to the configured target size.
///
/// When the natural crop already has the target size no resampling happens.
pub fn crop_to_target(
    image: &DecodedImage,
    rect: PixelRect,
    config: &TileConfig,
) -> Result<DecodedImage, CropError> {
    let cropped = crop_region(image, rect)?;
    let target = resize(
        &cropped,
        config.target_width,
        config.target_height,
        config.resize_filter,
    )?;
    Ok(target)
}

/// Crop to target size and PNG-encode the result.
pub fn confirm_crop(
    image: &DecodedImage,
    rect: PixelRect,
    config: &TileConfig,
) -> Result<ConfirmedCrop, CropError> {
    let target = crop_to_target(image, rect, config)?;
    let png = encode_png(&target.pixels, target.width, target.height)?;

    log::debug!(
        "confirmed crop {}x{} at ({}, {}) -> {}x{}",
        rect.width,
        rect.height,
        rect.x,
        rect.y,
        target.width,
        target.height
    );
    Ok(ConfirmedCrop { image: target, png })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
