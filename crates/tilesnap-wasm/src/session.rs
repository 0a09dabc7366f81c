//! Tiling session bindings.
//!
//! Quadrants are addressed by posting order (1-4) and surrounding slots by
//! "top"/"bottom". Export kinds are "fullTiles" and "quadrantsOnly".

use crate::export::CallbackSink;
use crate::types::{
    config_from_js, parse_export_kind, parse_position, role_from_order, JsDecodedImage,
    JsFinalImage,
};
use tilesnap_core::composite::FinalComposite;
use tilesnap_core::session::JobTicket;
use tilesnap_core::TileSession;
use wasm_bindgen::prelude::*;

/// Identifies the session generation a piece of async work started in.
#[wasm_bindgen(js_name = JobTicket)]
pub struct JsJobTicket {
    inner: JobTicket,
}

#[wasm_bindgen(js_name = TileSession)]
pub struct JsTileSession {
    inner: TileSession,
}

#[wasm_bindgen(js_class = TileSession)]
impl JsTileSession {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsTileSession, JsValue> {
        Ok(Self {
            inner: TileSession::new(config_from_js(config)?),
        })
    }

    /// Split a confirmed crop into quadrants.
    pub fn load_cropped(&mut self, image: &JsDecodedImage) -> Result<(), JsValue> {
        self.inner
            .load_cropped(&image.to_decoded())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Presentation flag passed through from the config.
    #[wasm_bindgen(getter)]
    pub fn reduced_motion(&self) -> bool {
        self.inner.config().reduced_motion
    }

    #[wasm_bindgen(getter)]
    pub fn has_quadrants(&self) -> bool {
        self.inner.has_quadrants()
    }

    /// Decode and store a surrounding image.
    pub fn set_surrounding(&mut self, order: u8, position: &str, bytes: &[u8]) -> Result<(), JsValue> {
        let role = role_from_order(order).map_err(|e| JsValue::from_str(&e))?;
        let position = parse_position(position).map_err(|e| JsValue::from_str(&e))?;
        self.inner
            .set_surrounding(role, position, bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn remove_surrounding(&mut self, order: u8, position: &str) -> Result<(), JsValue> {
        let role = role_from_order(order).map_err(|e| JsValue::from_str(&e))?;
        let position = parse_position(position).map_err(|e| JsValue::from_str(&e))?;
        self.inner.remove_surrounding(role, position);
        Ok(())
    }

    pub fn has_surrounding(&self, order: u8, position: &str) -> bool {
        match (role_from_order(order), parse_position(position)) {
            (Ok(role), Ok(position)) => self.inner.surrounding(role, position).is_some(),
            _ => false,
        }
    }

    /// The four full tiles, sorted by order.
    pub fn final_images(&mut self) -> Result<js_sys::Array, JsValue> {
        self.inner
            .final_images()
            .map(to_js_array)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The four quadrants as exportable images.
    pub fn quadrant_only_images(&self) -> Result<js_sys::Array, JsValue> {
        self.inner
            .quadrant_only_images()
            .map(to_js_array)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Export as one ZIP handed to `download(name, bytes, delayMs)`.
    pub fn export_archive(&mut self, kind: &str, download: &js_sys::Function) -> Result<(), JsValue> {
        let kind = parse_export_kind(kind).map_err(|e| JsValue::from_str(&e))?;
        self.inner
            .export_archive(kind, &mut CallbackSink::new(download))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Export one file per image, each with a growing delay.
    pub fn export_individually(
        &mut self,
        kind: &str,
        download: &js_sys::Function,
    ) -> Result<(), JsValue> {
        let kind = parse_export_kind(kind).map_err(|e| JsValue::from_str(&e))?;
        self.inner
            .export_individually(kind, &mut CallbackSink::new(download))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn ticket(&self) -> JsJobTicket {
        JsJobTicket {
            inner: self.inner.ticket(),
        }
    }

    /// False once the session was reloaded or reset after `ticket`.
    pub fn is_current(&self, ticket: &JsJobTicket) -> bool {
        self.inner.is_current(ticket.inner)
    }

    /// Start over.
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

fn to_js_array(images: Vec<FinalComposite>) -> js_sys::Array {
    images
        .into_iter()
        .map(|image| JsValue::from(JsFinalImage::from(image)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilesnap_core::TileConfig;

    fn session() -> JsTileSession {
        let config = TileConfig {
            target_width: 16,
            target_height: 10,
            band_width: None,
            ..TileConfig::default()
        };
        JsTileSession {
            inner: TileSession::new(config),
        }
    }

    #[test]
    fn test_load_and_tickets() {
        let mut session = session();
        let ticket = session.ticket();
        assert!(!session.has_quadrants());
        assert!(!session.reduced_motion());

        let image = JsDecodedImage::new(16, 10, vec![50u8; 16 * 10 * 3]);
        assert!(session.load_cropped(&image).is_ok());
        assert!(session.has_quadrants());
        assert!(!session.is_current(&ticket));

        let ticket = session.ticket();
        session.reset();
        assert!(!session.is_current(&ticket));
        assert!(!session.has_surrounding(1, "top"));
        assert!(!session.has_surrounding(9, "top"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use tilesnap_core::encode::encode_png;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn loaded() -> JsTileSession {
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"targetWidth".into(), &JsValue::from_f64(16.0)).unwrap();
        js_sys::Reflect::set(&config, &"targetHeight".into(), &JsValue::from_f64(10.0)).unwrap();
        js_sys::Reflect::set(&config, &"bandWidth".into(), &JsValue::NULL).unwrap();

        let mut session = JsTileSession::new(config.into()).unwrap();
        let image = JsDecodedImage::new(16, 10, vec![50u8; 16 * 10 * 3]);
        session.load_cropped(&image).unwrap();
        session
    }

    #[wasm_bindgen_test]
    fn test_short_buffer_is_error() {
        let mut session = JsTileSession::new(JsValue::UNDEFINED).unwrap();
        let image = JsDecodedImage::new(1214, 683, vec![0u8; 10]);
        assert!(session.load_cropped(&image).is_err());
        assert!(!session.has_quadrants());
    }

    #[wasm_bindgen_test]
    fn test_final_images_array() {
        let mut session = loaded();
        let png = encode_png(&[0u8; 2 * 2 * 3], 2, 2).unwrap();
        session.set_surrounding(2, "bottom", &png).unwrap();
        assert!(session.has_surrounding(2, "bottom"));
        assert!(session.set_surrounding(2, "left", &png).is_err());

        let finals = session.final_images().unwrap();
        assert_eq!(finals.length(), 4);
    }

    #[wasm_bindgen_test]
    fn test_export_calls_back() {
        let mut session = loaded();
        let calls = js_sys::Array::new();
        let record = js_sys::Function::new_with_args("name", "this.push(name)");
        let bound = record.bind(&calls);

        session.export_individually("quadrantsOnly", &bound).unwrap();
        assert_eq!(calls.length(), 4);
        assert_eq!(calls.get(0).as_string().unwrap(), "1_TopLeft_Only.png");

        assert!(session.export_archive("everything", &bound).is_err());
    }
}
