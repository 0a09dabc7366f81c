//! Upload decoding with EXIF orientation handling.
//!
//! Browsers display uploaded photos with their EXIF orientation applied, so
//! the crop geometry has to work against the oriented size too.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode a PNG or JPEG image from bytes, applying EXIF orientation correction.
///
/// The format is sniffed from the content, not from a file name.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails part way and
/// `DecodeError::InvalidDimensions` for a zero-sized image.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    let decoded = DecodedImage::from_rgb_image(rgb_img);
    if decoded.is_empty() {
        return Err(DecodeError::InvalidDimensions {
            width: decoded.width,
            height: decoded.height,
        });
    }

    log::debug!(
        "decoded {}x{} image ({:?})",
        decoded.width,
        decoded.height,
        orientation
    );
    Ok(decoded)
}

/// Read the oriented dimensions of an encoded image without decoding pixels.
///
/// This backs the "W×H" label shown next to an upload.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if extract_orientation(bytes).swaps_dimensions() {
        Ok((height, width))
    } else {
        Ok((width, height))
    }
}

/// Extract EXIF orientation, defaulting to `Orientation::Normal`.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
