//! Compositor: stacks surrounding images around each quadrant.
//!
//! Every full tile has three equal bands, top to bottom:
//!
//! 1. the top surrounding image, or the quadrant when that slot is empty
//! 2. the quadrant
//! 3. the bottom surrounding image, or the quadrant when that slot is empty
//!
//! Each band is stretched to `band_width` x quadrant height, so a tile is
//! always `band_width` x `3 * quadrant height` however many surrounding
//! images were supplied.

use thiserror::Error;

use crate::config::TileConfig;
use crate::decode::{resize, DecodeError, DecodedImage};
use crate::encode::{encode, EncodeError, OutputFormat};
use crate::split::Quadrant;
use crate::{QuadrantRole, SlotPosition};

/// Errors from building composites.
#[derive(Debug, Error)]
pub enum CompositeError {
    /// A quadrant needed for the batch is missing.
    #[error("Missing quadrant for position {0}")]
    MissingQuadrant(QuadrantRole),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Optional surrounding images, one top and one bottom slot per quadrant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurroundingImages {
    slots: [[Option<DecodedImage>; 2]; 4],
}

impl SurroundingImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: QuadrantRole, position: SlotPosition) -> Option<&DecodedImage> {
        self.slots[role.index()][position.index()].as_ref()
    }

    /// Store an image in a slot, returning the one it replaced.
    pub fn set(
        &mut self,
        role: QuadrantRole,
        position: SlotPosition,
        image: DecodedImage,
    ) -> Option<DecodedImage> {
        self.slots[role.index()][position.index()].replace(image)
    }

    pub fn remove(&mut self, role: QuadrantRole, position: SlotPosition) -> Option<DecodedImage> {
        self.slots[role.index()][position.index()].take()
    }

    /// Number of filled slots.
    pub fn count(&self) -> usize {
        self.slots.iter().flatten().filter(|s| s.is_some()).count()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// An exportable image: a full tile or a re-labelled quadrant.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalComposite {
    pub role: QuadrantRole,
    /// Posting order, 1-4.
    pub order: u8,
    /// File name, e.g. `1_TopLeft_Full.png`.
    pub name: String,
    /// Human readable label, e.g. `TopLeft Full Tile`.
    pub label: String,
    pub width: u32,
    pub height: u32,
    /// Container format of `bytes`.
    pub format: OutputFormat,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl FinalComposite {
    /// MIME type for the download blob.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Stack the three bands for one quadrant.
pub fn compose_tile(
    quadrant: &Quadrant,
    top: Option<&DecodedImage>,
    bottom: Option<&DecodedImage>,
    config: &TileConfig,
) -> Result<DecodedImage, CompositeError> {
    let band_width = config.band_width.unwrap_or(quadrant.width());
    let band_height = quadrant.height();

    if top.is_none() || bottom.is_none() {
        log::debug!(
            "{}: repeating quadrant for empty {} slot(s)",
            quadrant.role,
            usize::from(top.is_none()) + usize::from(bottom.is_none())
        );
    }

    let bands = [
        top.unwrap_or(&quadrant.image),
        &quadrant.image,
        bottom.unwrap_or(&quadrant.image),
    ];

    // Bands span the full width, so the canvas is just their rows in order.
    let mut pixels = Vec::with_capacity(band_width as usize * band_height as usize * 9);
    for band in bands {
        band.validate()?;
        let fitted = resize(band, band_width, band_height, config.resize_filter)?;
        pixels.extend_from_slice(&fitted.pixels);
    }

    Ok(DecodedImage::new(band_width, band_height * 3, pixels))
}

/// Build and encode the full tile for one quadrant.
pub fn create_final_image(
    quadrant: &Quadrant,
    surroundings: &SurroundingImages,
    config: &TileConfig,
) -> Result<FinalComposite, CompositeError> {
    let role = quadrant.role;
    let tile = compose_tile(
        quadrant,
        surroundings.get(role, SlotPosition::Top),
        surroundings.get(role, SlotPosition::Bottom),
        config,
    )?;
    let bytes = encode(&tile, config.output_format)?;

    Ok(FinalComposite {
        role,
        order: role.order(),
        name: format!(
            "{}_{}_Full.{}",
            role.order(),
            role.name(),
            config.output_format.extension()
        ),
        label: format!("{} Full Tile", role.name()),
        width: tile.width,
        height: tile.height,
        format: config.output_format,
        bytes,
    })
}

/// Build all four full tiles, sorted by posting order.
///
/// `quadrants` may be in any order. A missing role fails the whole batch;
/// empty surrounding slots never do.
pub fn create_final_images(
    quadrants: &[Quadrant],
    surroundings: &SurroundingImages,
    config: &TileConfig,
) -> Result<Vec<FinalComposite>, CompositeError> {
    let ordered = require_all(quadrants)?;

    let mut finals = ordered
        .into_iter()
        .map(|q| create_final_image(q, surroundings, config))
        .collect::<Result<Vec<_>, _>>()?;
    finals.sort_by_key(|f| f.order);

    log::debug!(
        "composed {} tiles with {} surrounding image(s)",
        finals.len(),
        surroundings.count()
    );
    Ok(finals)
}

/// Re-wrap the four quadrants as exportable images without touching pixels.
pub fn create_quadrant_only_images(
    quadrants: &[Quadrant],
) -> Result<Vec<FinalComposite>, CompositeError> {
    let ordered = require_all(quadrants)?;

    let mut images: Vec<FinalComposite> = ordered
        .into_iter()
        .map(|q| FinalComposite {
            role: q.role,
            order: q.role.order(),
            name: format!("{}_{}_Only.png", q.role.order(), q.role.name()),
            label: format!("{} Only", q.role.name()),
            width: q.width(),
            height: q.height(),
            format: OutputFormat::Png,
            bytes: q.encoded.clone(),
        })
        .collect();
    images.sort_by_key(|f| f.order);
    Ok(images)
}

/// Look up every role, failing on the first one that is absent.
fn require_all(quadrants: &[Quadrant]) -> Result<Vec<&Quadrant>, CompositeError> {
    QuadrantRole::ALL
        .into_iter()
        .map(|role| {
            quadrants
                .iter()
                .find(|q| q.role == role)
                .ok_or(CompositeError::MissingQuadrant(role))
        })
        .collect()
}
