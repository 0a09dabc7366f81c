//! Quadrant splitter.
//!
//! Cuts the target-sized crop into a 2x2 grid. Odd dimensions round the
//! quadrant size down, so the last column or row of the source is dropped.

use thiserror::Error;

use crate::config::TileConfig;
use crate::decode::{DecodeError, DecodedImage};
use crate::encode::{encode_png, EncodeError};
use crate::transform::copy_region;
use crate::QuadrantRole;

/// Errors from splitting.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The input has not been cropped to the target size.
    #[error("Expected a {expected_width}x{expected_height} image, got {width}x{height}")]
    UnexpectedDimensions {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    /// The pixel buffer does not match the image dimensions.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// One quarter of the cropped image.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadrant {
    pub role: QuadrantRole,
    /// Pixels, kept for compositing.
    pub image: DecodedImage,
    /// PNG encoding of `image`, exported as-is in quadrant-only mode.
    pub encoded: Vec<u8>,
}

impl Quadrant {
    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }
}

/// Split a target-sized image into four quadrants.
///
/// Quadrants come back in `TopLeft, TopRight, BottomLeft, BottomRight`
/// order, each `target_width / 2` x `target_height / 2`.
///
/// # Errors
///
/// Fails with `SplitError::UnexpectedDimensions` when the input is not
/// exactly the configured target size, with `SplitError::Decode` when its
/// pixel buffer is the wrong length, and with `SplitError::Encode` if any
/// quadrant fails to encode. No partial result is returned.
pub fn split_into_quadrants(
    image: &DecodedImage,
    config: &TileConfig,
) -> Result<Vec<Quadrant>, SplitError> {
    if image.width != config.target_width || image.height != config.target_height {
        return Err(SplitError::UnexpectedDimensions {
            expected_width: config.target_width,
            expected_height: config.target_height,
            width: image.width,
            height: image.height,
        });
    }
    image.validate()?;

    let (qw, qh) = config.quadrant_size();
    let quadrants = QuadrantRole::ALL
        .into_iter()
        .map(|role| -> Result<Quadrant, SplitError> {
            let (x, y) = role.origin(image.width, image.height);
            let pixels = copy_region(image, x, y, qw, qh);
            let encoded = encode_png(&pixels.pixels, qw, qh)?;
            Ok(Quadrant {
                role,
                image: pixels,
                encoded,
            })
        })
        .collect::<Result<Vec<_>, SplitError>>()?;

    log::debug!("split {}x{} into four {}x{} quadrants", image.width, image.height, qw, qh);
    Ok(quadrants)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
