//! TileSnap WASM - WebAssembly bindings for TileSnap
//!
//! This crate exposes tilesnap-core to the browser: decoding uploads, the
//! interactive cropper, the tiling session and archive export.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and exports
//! - `decode` - Upload decoding bindings
//! - `encode` - PNG/JPEG encoding bindings
//! - `cropper` - Pointer-driven crop controller
//! - `session` - Quadrants, surrounding images and export
//! - `export` - ZIP building and the download callback sink
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, Cropper, TileSession } from '@tilesnap/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const cropper = new Cropper();
//! cropper.load(image.width, image.height, box.width, box.height);
//! // ...pointer events...
//! const crop = cropper.confirm(image);
//!
//! const session = new TileSession();
//! session.load_cropped(crop.image());
//! session.export_archive("fullTiles", (name, bytes, delayMs) => save(name, bytes));
//! ```

use wasm_bindgen::prelude::*;

mod cropper;
mod decode;
mod encode;
mod export;
mod logger;
mod session;
mod types;

pub use cropper::{JsConfirmedCrop, JsCropper};
pub use decode::{decode_image, dimension_label, image_dimensions};
pub use encode::{encode_jpeg, encode_png};
pub use export::ZipBuilder;
pub use session::{JsJobTicket, JsTileSession};
pub use types::{JsDecodedImage, JsFinalImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init();
    log::debug!("tilesnap-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
