//! Archive and download bindings.

use std::time::Duration;

use tilesnap_core::build_archive;
use tilesnap_core::export::{DownloadSink, ExportError};
use wasm_bindgen::prelude::*;

/// Forwards finished files to a JS callback `(name, bytes, delayMs) => void`.
///
/// The callback owns the scheduling, typically `setTimeout` around an
/// anchor-click download.
pub(crate) struct CallbackSink<'a> {
    callback: &'a js_sys::Function,
}

impl<'a> CallbackSink<'a> {
    pub(crate) fn new(callback: &'a js_sys::Function) -> Self {
        Self { callback }
    }
}

impl DownloadSink for CallbackSink<'_> {
    fn deliver(&mut self, name: &str, bytes: &[u8], delay: Duration) -> Result<(), ExportError> {
        let data = js_sys::Uint8Array::from(bytes);
        self.callback
            .call3(
                &JsValue::NULL,
                &JsValue::from_str(name),
                &data.into(),
                &JsValue::from_f64(delay.as_millis() as f64),
            )
            .map(|_| ())
            .map_err(|e| ExportError::Sink(e.as_string().unwrap_or_else(|| format!("{:?}", e))))
    }
}

/// Collects named buffers and packs them into one ZIP.
///
/// ```typescript
/// const zip = new ZipBuilder();
/// zip.add("1_TopLeft_Full.png", bytes);
/// const archive = zip.finish();
/// ```
#[wasm_bindgen]
#[derive(Default)]
pub struct ZipBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

#[wasm_bindgen]
impl ZipBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ZipBuilder {
        Self::default()
    }

    pub fn add(&mut self, name: String, bytes: Vec<u8>) {
        self.entries.push((name, bytes));
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.entries.len()
    }

    /// Build the archive. Entries are kept, so `finish` may be called again.
    pub fn finish(&self) -> Result<Vec<u8>, JsValue> {
        build_archive(
            self.entries
                .iter()
                .map(|(name, bytes)| (name.as_str(), bytes.as_slice())),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_builder() {
        let mut zip = ZipBuilder::new();
        zip.add("a.png".to_string(), vec![1, 2, 3]);
        zip.add("b.png".to_string(), vec![4]);
        assert_eq!(zip.length(), 2);

        let archive = zip.finish().ok().unwrap();
        assert_eq!(&archive[0..4], b"PK\x03\x04");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_empty_zip_is_error() {
        assert!(ZipBuilder::new().finish().is_err());
    }

    #[wasm_bindgen_test]
    fn test_callback_sink_reports_throw() {
        let throwing = js_sys::Function::new_no_args("throw new Error('blocked')");
        let mut sink = CallbackSink::new(&throwing);
        let result = sink.deliver("a.png", &[1], Duration::ZERO);
        assert!(matches!(result, Err(ExportError::Sink(_))));
    }
}
