//! Archive and download export.
//!
//! Full tiles and quadrant-only images go through the same two paths: one
//! ZIP archive, or one download per image spaced out by the sink.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::composite::FinalComposite;

/// Errors from exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Download failed: {0}")]
    Sink(String),

    #[error("Nothing to export")]
    Empty,

    #[error("Duplicate archive entry: {0}")]
    DuplicateEntry(String),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        ExportError::Archive(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Archive(err.to_string())
    }
}

/// Which image set is being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportKind {
    FullTiles,
    QuadrantsOnly,
}

impl ExportKind {
    pub fn archive_name(self) -> &'static str {
        match self {
            ExportKind::FullTiles => "full-tiles.zip",
            ExportKind::QuadrantsOnly => "quadrants-only.zip",
        }
    }
}

/// Receives finished files. In the browser this triggers a save.
pub trait DownloadSink {
    /// Deliver `bytes` under `name` after `delay`.
    ///
    /// The sink owns the scheduling; callers never block on the delay.
    fn deliver(&mut self, name: &str, bytes: &[u8], delay: Duration) -> Result<(), ExportError>;
}

/// Pack `(name, bytes)` pairs into a deflated ZIP, in the given order.
///
/// # Errors
///
/// `ExportError::Empty` for no entries, `ExportError::DuplicateEntry` when
/// two entries share a name.
pub fn build_archive<'a, I>(entries: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut seen = HashSet::new();

    for (name, bytes) in entries {
        if !seen.insert(name) {
            return Err(ExportError::DuplicateEntry(name.to_string()));
        }
        writer.start_file(name, options)?;
        writer.write_all(bytes)?;
    }

    if seen.is_empty() {
        return Err(ExportError::Empty);
    }

    let archive = writer.finish()?.into_inner();
    log::debug!("archived {} entries, {} bytes", seen.len(), archive.len());
    Ok(archive)
}

/// Archive `images` and hand the archive to `sink` immediately.
pub fn download_archive(
    images: &[FinalComposite],
    archive_name: &str,
    sink: &mut dyn DownloadSink,
) -> Result<(), ExportError> {
    let archive = build_archive(images.iter().map(|i| (i.name.as_str(), i.bytes.as_slice())))?;
    sink.deliver(archive_name, &archive, Duration::ZERO)
}

/// Hand each image to `sink` on its own, the n-th one delayed by
/// `n * stagger`.
pub fn download_individually(
    images: &[FinalComposite],
    stagger: Duration,
    sink: &mut dyn DownloadSink,
) -> Result<(), ExportError> {
    if images.is_empty() {
        return Err(ExportError::Empty);
    }

    for (index, image) in images.iter().enumerate() {
        let delay = stagger.saturating_mul(index as u32);
        sink.deliver(&image.name, &image.bytes, delay)?;
    }
    log::debug!("scheduled {} individual downloads", images.len());
    Ok(())
}
