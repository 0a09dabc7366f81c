//! Tunable constants for the tiling pipeline.
//!
//! Everything the geometry engine, splitter and compositor need to know about
//! sizes lives in [`TileConfig`]. The presentation flag `reduced_motion` is
//! carried here so UI code receives it explicitly instead of probing the
//! environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::encode::OutputFormat;

/// Locked crop aspect ratio (16:9).
pub const ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Default crop output width in pixels.
pub const TARGET_WIDTH: u32 = 1214;

/// Default crop output height in pixels.
pub const TARGET_HEIGHT: u32 = 683;

/// Errors reported by [`TileConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Target size must be at least 2x2, got {width}x{height}")]
    TargetTooSmall { width: u32, height: u32 },

    #[error("Band width must be non-zero")]
    ZeroBandWidth,

    #[error("Invalid zoom range: {min}..={max}")]
    InvalidZoomRange { min: f64, max: f64 },

    #[error("Initial fill must be in (0, 1], got {0}")]
    InvalidInitialFill(f64),
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TileConfig {
    /// Width of the confirmed crop output.
    pub target_width: u32,
    /// Height of the confirmed crop output.
    pub target_height: u32,
    /// Smallest crop width the resize handles allow, in display pixels.
    pub min_crop_width: f64,
    /// Fraction of the display area the initial crop rect fills.
    pub initial_fill: f64,
    /// Pointer distance that still counts as grabbing a handle.
    pub handle_tolerance: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Filter for crop output and composite band stretching.
    pub resize_filter: FilterType,
    /// Container format of full composite tiles.
    pub output_format: OutputFormat,
    /// Width of each composite band. `None` keeps the quadrant width.
    pub band_width: Option<u32>,
    /// Spacing between individual downloads.
    pub download_stagger_ms: u32,
    pub reduced_motion: bool,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            target_width: TARGET_WIDTH,
            target_height: TARGET_HEIGHT,
            min_crop_width: 50.0,
            initial_fill: 0.8,
            handle_tolerance: 10.0,
            min_zoom: 0.1,
            max_zoom: 4.0,
            resize_filter: FilterType::Bilinear,
            output_format: OutputFormat::Png,
            band_width: Some(TARGET_WIDTH),
            download_stagger_ms: 500,
            reduced_motion: false,
        }
    }
}

impl TileConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_width < 2 || self.target_height < 2 {
            return Err(ConfigError::TargetTooSmall {
                width: self.target_width,
                height: self.target_height,
            });
        }
        if self.band_width == Some(0) {
            return Err(ConfigError::ZeroBandWidth);
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(ConfigError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !(self.initial_fill > 0.0 && self.initial_fill <= 1.0) {
            return Err(ConfigError::InvalidInitialFill(self.initial_fill));
        }
        Ok(())
    }

    /// Size of each quadrant: half the target, rounded down.
    pub fn quadrant_size(&self) -> (u32, u32) {
        (self.target_width / 2, self.target_height / 2)
    }

    /// Size of each full composite tile.
    pub fn composite_size(&self) -> (u32, u32) {
        let (qw, qh) = self.quadrant_size();
        (self.band_width.unwrap_or(qw), qh * 3)
    }

    pub fn download_stagger(&self) -> Duration {
        Duration::from_millis(u64::from(self.download_stagger_ms))
    }
}
