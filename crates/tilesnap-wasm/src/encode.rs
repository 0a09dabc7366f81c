//! Image encoding WASM bindings.

use crate::types::JsDecodedImage;
use tilesnap_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a JsDecodedImage to PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    let decoded = image.to_decoded();
    encode::encode_png(&decoded.pixels, decoded.width, decoded.height)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsDecodedImage to JPEG bytes.
///
/// `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let decoded = image.to_decoded();
    encode::encode_jpeg(&decoded.pixels, decoded.width, decoded.height, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
