//! Session state for one tiling run.
//!
//! Holds the quadrants of the confirmed crop, the eight surrounding slots
//! and a per-role cache of full tiles. A tile is recomputed only when its
//! quadrant or one of its two slots changed.
//!
//! Work is synchronous, but the host may run it from deferred callbacks.
//! Every load or reset starts a new generation; a [`JobTicket`] taken before
//! that is stale, and its results should be dropped.

use thiserror::Error;

use crate::composite::{
    create_final_image, create_quadrant_only_images, CompositeError, FinalComposite,
    SurroundingImages,
};
use crate::config::TileConfig;
use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::export::{download_archive, download_individually, DownloadSink, ExportError, ExportKind};
use crate::split::{split_into_quadrants, Quadrant, SplitError};
use crate::{QuadrantRole, SlotPosition};

/// Errors from session-level operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Composite(#[from] CompositeError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Marks which generation a piece of work was started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobTicket {
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TileSession {
    config: TileConfig,
    generation: u64,
    quadrants: Vec<Quadrant>,
    surroundings: SurroundingImages,
    finals: [Option<FinalComposite>; 4],
}

impl TileSession {
    pub fn new(config: TileConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &TileConfig {
        &self.config
    }

    /// Ticket for work started now.
    pub fn ticket(&self) -> JobTicket {
        JobTicket {
            generation: self.generation,
        }
    }

    /// False once the session has been reloaded or reset since `ticket`.
    pub fn is_current(&self, ticket: JobTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Split a confirmed crop and make its quadrants current.
    ///
    /// Surrounding images are kept. On error the previous quadrants stay.
    pub fn load_cropped(&mut self, image: &DecodedImage) -> Result<(), SplitError> {
        let quadrants = split_into_quadrants(image, &self.config)?;
        self.quadrants = quadrants;
        self.finals = Default::default();
        self.generation += 1;
        Ok(())
    }

    pub fn quadrants(&self) -> &[Quadrant] {
        &self.quadrants
    }

    pub fn has_quadrants(&self) -> bool {
        !self.quadrants.is_empty()
    }

    /// Decode an upload into a surrounding slot.
    pub fn set_surrounding(
        &mut self,
        role: QuadrantRole,
        position: SlotPosition,
        bytes: &[u8],
    ) -> Result<(), DecodeError> {
        let image = decode_image(bytes)?;
        self.set_surrounding_image(role, position, image);
        Ok(())
    }

    pub fn set_surrounding_image(
        &mut self,
        role: QuadrantRole,
        position: SlotPosition,
        image: DecodedImage,
    ) {
        self.surroundings.set(role, position, image);
        self.finals[role.index()] = None;
    }

    pub fn remove_surrounding(&mut self, role: QuadrantRole, position: SlotPosition) {
        if self.surroundings.remove(role, position).is_some() {
            self.finals[role.index()] = None;
        }
    }

    pub fn surrounding(&self, role: QuadrantRole, position: SlotPosition) -> Option<&DecodedImage> {
        self.surroundings.get(role, position)
    }

    pub fn surroundings(&self) -> &SurroundingImages {
        &self.surroundings
    }

    /// The four full tiles, sorted by order, rebuilding only stale ones.
    pub fn final_images(&mut self) -> Result<Vec<FinalComposite>, CompositeError> {
        for role in QuadrantRole::ALL {
            if self.finals[role.index()].is_some() {
                continue;
            }
            let quadrant = self
                .quadrants
                .iter()
                .find(|q| q.role == role)
                .ok_or(CompositeError::MissingQuadrant(role))?;
            let tile = create_final_image(quadrant, &self.surroundings, &self.config)?;
            self.finals[role.index()] = Some(tile);
        }

        Ok(self.finals.iter().flatten().cloned().collect())
    }

    pub fn quadrant_only_images(&self) -> Result<Vec<FinalComposite>, CompositeError> {
        create_quadrant_only_images(&self.quadrants)
    }

    fn images_for(&mut self, kind: ExportKind) -> Result<Vec<FinalComposite>, CompositeError> {
        match kind {
            ExportKind::FullTiles => self.final_images(),
            ExportKind::QuadrantsOnly => self.quadrant_only_images(),
        }
    }

    /// Export one image set as a single archive.
    pub fn export_archive(
        &mut self,
        kind: ExportKind,
        sink: &mut dyn DownloadSink,
    ) -> Result<(), SessionError> {
        let images = self.images_for(kind)?;
        download_archive(&images, kind.archive_name(), sink)?;
        Ok(())
    }

    /// Export one image set as staggered individual downloads.
    pub fn export_individually(
        &mut self,
        kind: ExportKind,
        sink: &mut dyn DownloadSink,
    ) -> Result<(), SessionError> {
        let images = self.images_for(kind)?;
        download_individually(&images, self.config.download_stagger(), sink)?;
        Ok(())
    }

    /// Drop everything and start a new generation.
    pub fn reset(&mut self) {
        self.quadrants.clear();
        self.surroundings.clear();
        self.finals = Default::default();
        self.generation += 1;
        log::debug!("session reset, generation {}", self.generation);
    }
}
