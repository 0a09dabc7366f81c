//! WASM-compatible wrapper types.
//!
//! JavaScript-friendly types that wrap the core TileSnap types, plus the
//! small parsers shared by the bindings for values JS passes as strings.

use tilesnap_core::composite::FinalComposite;
use tilesnap_core::decode::DecodedImage;
use tilesnap_core::encode::OutputFormat;
use tilesnap_core::{ExportKind, QuadrantRole, SlotPosition, TileConfig};
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// The pixel data is stored in WASM memory. `pixels()` copies it out as a
/// `Uint8Array` (RGB, 3 bytes per pixel, row-major).
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage. Clones the pixel data.
    ///
    /// JS may hand in a buffer of any length; the core stages reject a
    /// mismatch with an error, so no check happens here.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// One exportable image: a full tile or a quadrant.
#[wasm_bindgen]
pub struct JsFinalImage {
    inner: FinalComposite,
}

#[wasm_bindgen]
impl JsFinalImage {
    /// Posting order, 1-4
    #[wasm_bindgen(getter)]
    pub fn order(&self) -> u8 {
        self.inner.order
    }

    /// Role name, e.g. "TopLeft"
    #[wasm_bindgen(getter)]
    pub fn role(&self) -> String {
        self.inner.role.name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn label(&self) -> String {
        self.inner.label.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// MIME type for `new Blob([bytes], { type })`.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    /// Encoded file bytes as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }
}

impl From<FinalComposite> for JsFinalImage {
    fn from(inner: FinalComposite) -> Self {
        Self { inner }
    }
}

/// Map `undefined`/`null` to the defaults, anything else through serde.
pub(crate) fn config_from_js(value: JsValue) -> Result<TileConfig, JsValue> {
    let config = if value.is_undefined() || value.is_null() {
        TileConfig::default()
    } else {
        serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

pub(crate) fn role_from_order(order: u8) -> Result<QuadrantRole, String> {
    QuadrantRole::from_order(order).ok_or_else(|| format!("Invalid quadrant order: {}", order))
}

pub(crate) fn parse_position(value: &str) -> Result<SlotPosition, String> {
    match value {
        "top" => Ok(SlotPosition::Top),
        "bottom" => Ok(SlotPosition::Bottom),
        other => Err(format!("Invalid slot position: {}", other)),
    }
}

pub(crate) fn parse_export_kind(value: &str) -> Result<ExportKind, String> {
    match value {
        "fullTiles" => Ok(ExportKind::FullTiles),
        "quadrantsOnly" => Ok(ExportKind::QuadrantsOnly),
        other => Err(format!("Invalid export kind: {}", other)),
    }
}
