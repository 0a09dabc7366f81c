//! TileSnap Core - image tiling library
//!
//! This crate turns one 16:9 image into four tall tiles for sequential
//! photo-reply posts: an aspect-locked interactive crop, a 2x2 quadrant
//! split, compositing of each quadrant with optional surrounding images,
//! and ZIP or one-by-one export.
//!
//! # Pipeline
//!
//! 1. `decode` - decode the upload
//! 2. `interaction` / `geometry` - drive the crop rect from pointer events
//! 3. `transform` - cut the confirmed crop out at the target size
//! 4. `split` - four quadrants
//! 5. `composite` - stack surrounding images around each quadrant
//! 6. `export` - archive or staggered downloads
//!
//! `session` ties steps 4-6 together for one editing session.

pub mod composite;
pub mod config;
pub mod decode;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod interaction;
pub mod session;
pub mod split;
pub mod transform;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use composite::{create_final_images, create_quadrant_only_images, FinalComposite};
pub use config::TileConfig;
pub use export::{build_archive, DownloadSink, ExportKind};
pub use interaction::CropController;
pub use session::TileSession;
pub use split::{split_into_quadrants, Quadrant};

/// One of the four quarter-regions of the cropped image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuadrantRole {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl QuadrantRole {
    /// All roles in posting order.
    pub const ALL: [QuadrantRole; 4] = [
        QuadrantRole::TopLeft,
        QuadrantRole::TopRight,
        QuadrantRole::BottomLeft,
        QuadrantRole::BottomRight,
    ];

    /// Posting order, 1 (TopLeft) through 4 (BottomRight).
    pub fn order(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Zero-based position in [`QuadrantRole::ALL`].
    pub fn index(self) -> usize {
        match self {
            QuadrantRole::TopLeft => 0,
            QuadrantRole::TopRight => 1,
            QuadrantRole::BottomLeft => 2,
            QuadrantRole::BottomRight => 3,
        }
    }

    pub fn from_order(order: u8) -> Option<QuadrantRole> {
        match order {
            1..=4 => Some(QuadrantRole::ALL[order as usize - 1]),
            _ => None,
        }
    }

    /// Name used in file names and labels.
    pub fn name(self) -> &'static str {
        match self {
            QuadrantRole::TopLeft => "TopLeft",
            QuadrantRole::TopRight => "TopRight",
            QuadrantRole::BottomLeft => "BottomLeft",
            QuadrantRole::BottomRight => "BottomRight",
        }
    }

    /// Top-left corner of this quadrant inside a `width` x `height` source.
    pub fn origin(self, width: u32, height: u32) -> (u32, u32) {
        let (half_w, half_h) = (width / 2, height / 2);
        match self {
            QuadrantRole::TopLeft => (0, 0),
            QuadrantRole::TopRight => (half_w, 0),
            QuadrantRole::BottomLeft => (0, half_h),
            QuadrantRole::BottomRight => (half_w, half_h),
        }
    }
}

impl fmt::Display for QuadrantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a surrounding image sits relative to its quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotPosition {
    Top,
    Bottom,
}

impl SlotPosition {
    pub const ALL: [SlotPosition; 2] = [SlotPosition::Top, SlotPosition::Bottom];

    pub fn index(self) -> usize {
        match self {
            SlotPosition::Top => 0,
            SlotPosition::Bottom => 1,
        }
    }
}
