//! Image decoding for TileSnap.
//!
//! This module provides functionality for:
//! - Decoding the main upload and surrounding images (PNG/JPEG)
//! - Reading oriented dimensions for upload labels
//! - Resizing decoded images to exact sizes
//!
//! # Architecture
//!
//! All operations are synchronous and single-threaded within WASM. Every
//! function returns a new `DecodedImage`; inputs are never modified.

mod resize;
mod types;
mod upload;

pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
pub use upload::{decode_image, image_dimensions};
