//! Pixel-space transforms applied when a crop is confirmed.
//!
//! # Coordinate System
//!
//! - Crop regions are in natural image pixels (see `geometry::PixelRect`)
//! - Origin is top-left corner
//! - Regions reaching past the image are clamped, never padded

mod crop;

pub use crop::{confirm_crop, crop_region, crop_to_target, ConfirmedCrop, CropError};
pub(crate) use crop::copy_region;
