//! Exact-size resizing.
//!
//! Used wherever a canvas would stretch an image into a fixed box: the crop
//! output and every band of a composite tile.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// Aspect ratio is not preserved; the image is stretched to fill
/// `width` x `height`.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero
/// and `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// image dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}
