//! Crop geometry: display fitting, the aspect-locked crop rect and its
//! move/resize/clamp operations.
//!
//! # Coordinate System
//!
//! - Natural space: pixels of the decoded source image.
//! - Container space: pointer coordinates relative to the crop container.
//! - Display space: container space shifted by the display offset, so
//!   (0, 0) is the top-left corner of the displayed (scaled) image.
//!
//! The crop rect lives in display space and always stays inside
//! `[0, display.width] x [0, display.height]` with a 16:9 ratio.
//!
//! Every function here is O(1) and total: empty inputs produce an inert
//! all-zero result rather than an error.

mod handle;
mod rect;
mod types;

pub use handle::{hit_test, Handle, HitTarget};
pub use rect::{clamp_rect, initial_crop_rect, move_rect, resize_rect};
pub use types::{CropRect, DisplayTransform, PixelRect, Point, Size};
