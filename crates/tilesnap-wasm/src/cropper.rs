//! Crop controller bindings.
//!
//! Event coordinates are container-relative (e.g. `offsetX`/`offsetY` on the
//! crop container). Rects come back as plain `{x, y, width, height}` objects.

use crate::types::{config_from_js, JsDecodedImage};
use tilesnap_core::geometry::{Handle, Point, Size};
use tilesnap_core::interaction::{CropController, GestureState};
use tilesnap_core::transform::ConfirmedCrop;
use wasm_bindgen::prelude::*;

/// Interactive, aspect-locked crop editor.
#[wasm_bindgen(js_name = Cropper)]
pub struct JsCropper {
    inner: CropController,
}

#[wasm_bindgen(js_class = Cropper)]
impl JsCropper {
    /// Create a cropper. `config` is an optional partial `TileConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsCropper, JsValue> {
        let config = config_from_js(config)?;
        Ok(Self {
            inner: CropController::new(&config),
        })
    }

    /// Start a crop session for a `natural_width` x `natural_height` image
    /// shown in a container of the given size.
    pub fn load(
        &mut self,
        natural_width: f64,
        natural_height: f64,
        container_width: f64,
        container_height: f64,
    ) {
        self.inner.load(
            Size::new(natural_width, natural_height),
            Size::new(container_width, container_height),
        );
    }

    #[wasm_bindgen(getter)]
    pub fn loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Returns the gesture state name after the event.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> String {
        state_name(self.inner.pointer_down(Point::new(x, y)))
    }

    /// Pointer down on a handle element; `handle` is "n", "ne", ... "nw".
    pub fn pointer_down_on_handle(&mut self, handle: &str, x: f64, y: f64) -> Result<String, JsValue> {
        let handle = Handle::from_str_name(handle)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown handle: {}", handle)))?;
        Ok(state_name(
            self.inner.pointer_down_on_handle(handle, Point::new(x, y)),
        ))
    }

    /// Returns true when the crop rect changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_move(Point::new(x, y))
    }

    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    /// Touch points as a flat `[x0, y0, x1, y1, ...]` array.
    pub fn touch_start(&mut self, points: &[f64]) -> String {
        state_name(self.inner.touch_start(&touch_points(points)))
    }

    pub fn touch_move(&mut self, points: &[f64]) -> bool {
        self.inner.touch_move(&touch_points(points))
    }

    pub fn touch_end(&mut self) {
        self.inner.touch_end();
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    #[wasm_bindgen(setter)]
    pub fn set_zoom(&mut self, zoom: f64) {
        self.inner.set_zoom(zoom);
    }

    /// Presentation flag passed through from the config; the UI skips
    /// transitions when set.
    #[wasm_bindgen(getter)]
    pub fn reduced_motion(&self) -> bool {
        self.inner.config().reduced_motion
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        state_name(self.inner.state())
    }

    /// Crop rect in display space.
    pub fn crop_rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.crop_rect())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `{scale, offsetX, offsetY}`
    pub fn display_transform(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.display_transform())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Crop rect in natural pixels, or `undefined` before `load`.
    pub fn natural_crop_rect(&self) -> Result<JsValue, JsValue> {
        match self.inner.natural_crop_rect() {
            Some(rect) => serde_wasm_bindgen::to_value(&rect)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Cut the current crop out of `image` at the target size.
    pub fn confirm(&self, image: &JsDecodedImage) -> Result<JsConfirmedCrop, JsValue> {
        self.inner
            .confirm(&image.to_decoded())
            .map(|inner| JsConfirmedCrop { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// The confirmed crop: target-sized pixels and their PNG encoding.
#[wasm_bindgen]
pub struct JsConfirmedCrop {
    inner: ConfirmedCrop,
}

#[wasm_bindgen]
impl JsConfirmedCrop {
    pub fn image(&self) -> JsDecodedImage {
        JsDecodedImage::from_decoded(self.inner.image.clone())
    }

    pub fn png(&self) -> Vec<u8> {
        self.inner.png.clone()
    }
}

fn state_name(state: GestureState) -> String {
    match state {
        GestureState::Idle => "idle".to_string(),
        GestureState::Dragging => "dragging".to_string(),
        GestureState::Resizing(handle) => format!("resizing-{}", handle.as_str()),
    }
}

fn touch_points(flat: &[f64]) -> Vec<Point> {
    flat.chunks_exact(2)
        .map(|xy| Point::new(xy[0], xy[1]))
        .collect()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use tilesnap_core::geometry::CropRect;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_partial_config() {
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"minCropWidth".into(), &JsValue::from_f64(80.0)).unwrap();

        assert!(JsCropper::new(config.into()).is_ok());
        assert!(JsCropper::new(JsValue::UNDEFINED).is_ok());
    }

    #[wasm_bindgen_test]
    fn test_invalid_config_rejected() {
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"initialFill".into(), &JsValue::from_f64(2.0)).unwrap();
        assert!(JsCropper::new(config.into()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_unknown_handle() {
        let mut cropper = JsCropper::new(JsValue::UNDEFINED).unwrap();
        cropper.load(1600.0, 900.0, 800.0, 600.0);
        assert!(cropper.pointer_down_on_handle("up", 0.0, 0.0).is_err());
        assert_eq!(cropper.pointer_down_on_handle("se", 720.0, 480.0).unwrap(), "resizing-se");
    }

    #[wasm_bindgen_test]
    fn test_rect_serializes() {
        let mut cropper = JsCropper::new(JsValue::UNDEFINED).unwrap();
        assert!(cropper.natural_crop_rect().unwrap().is_undefined());

        cropper.load(1600.0, 900.0, 800.0, 600.0);
        let rect: CropRect = serde_wasm_bindgen::from_value(cropper.crop_rect().unwrap()).unwrap();
        assert!((rect.width / rect.height - 16.0 / 9.0).abs() < 1e-3);
    }
}
