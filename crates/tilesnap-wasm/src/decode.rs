//! Upload decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const label = dimension_label(bytes); // "2000×1000"
//! const image = decode_image(bytes);
//! ```

use crate::types::JsDecodedImage;
use tilesnap_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a PNG or JPEG upload, applying EXIF orientation.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Oriented `[width, height]` without decoding pixels.
#[wasm_bindgen]
pub fn image_dimensions(bytes: &[u8]) -> Result<Vec<u32>, JsValue> {
    decode::image_dimensions(bytes)
        .map(|(w, h)| vec![w, h])
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// "W×H" label shown next to an upload.
#[wasm_bindgen]
pub fn dimension_label(bytes: &[u8]) -> Result<String, JsValue> {
    decode::image_dimensions(bytes)
        .map(|(w, h)| format!("{}×{}", w, h))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
