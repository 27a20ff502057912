//! WASM binding for the interactive crop session.
//!
//! # Example
//!
//! ```typescript
//! const session = JsCropSession.with_config({ min_zoom: 1, max_zoom: 3, zoom_step: 0.1 });
//! session.open(bytes);
//! slider.oninput = () => session.set_rotation(slider.valueAsNumber);
//! cropper.oncropcomplete = (rect) => session.report_crop_rectangle(rect);
//! const raster = session.confirm();
//! ```

use crate::types::{crop_from_js, JsOutputRaster};
use sigcrop_core::decode::SourceImage;
use sigcrop_core::session::{CropSession, SessionConfig, SessionState};
use sigcrop_core::transform::CropRectangle;
use wasm_bindgen::prelude::*;

/// Crop dialog state for JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a closed session with default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCropSession {
        Self {
            inner: CropSession::new(),
        }
    }

    /// Create a closed session from a `SessionConfig` object. Missing fields
    /// take their defaults.
    pub fn with_config(config: JsValue) -> Result<JsCropSession, JsValue> {
        let config: SessionConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid session config: {}", e)))?;
        Ok(Self {
            inner: CropSession::with_config(config),
        })
    }

    /// Open the session on encoded image bytes.
    pub fn open(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let source =
            SourceImage::from_bytes(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.open(source);
        Ok(())
    }

    /// Open the session on a `data:` URI.
    pub fn open_data_uri(&mut self, uri: &str) -> Result<(), JsValue> {
        let source =
            SourceImage::from_data_uri(uri).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.open(source);
        Ok(())
    }

    /// One of `closed`, `open`, `confirmed`, `cancelled`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        match self.inner.state() {
            SessionState::Closed => "closed",
            SessionState::Open => "open",
            SessionState::Confirmed => "confirmed",
            SessionState::Cancelled => "cancelled",
        }
        .to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Whether the confirm button should be enabled.
    #[wasm_bindgen(getter)]
    pub fn can_confirm(&self) -> bool {
        self.inner.can_confirm()
    }

    #[wasm_bindgen(getter)]
    pub fn rotation_degrees(&self) -> f64 {
        self.inner.rotation_degrees()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom_factor(&self) -> f64 {
        self.inner.zoom_factor()
    }

    /// Width of the source image, or 0 when closed.
    #[wasm_bindgen(getter)]
    pub fn source_width(&self) -> u32 {
        self.inner.source().map_or(0, SourceImage::width)
    }

    /// Height of the source image, or 0 when closed.
    #[wasm_bindgen(getter)]
    pub fn source_height(&self) -> u32 {
        self.inner.source().map_or(0, SourceImage::height)
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.inner.set_zoom(zoom);
    }

    pub fn adjust_zoom_step(&mut self, delta: f64) {
        self.inner.adjust_zoom_step(delta);
    }

    pub fn zoom_in(&mut self) {
        self.inner.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.inner.zoom_out();
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.inner.set_rotation(degrees);
    }

    pub fn rotate_quarter_turn(&mut self) {
        self.inner.rotate_quarter_turn();
    }

    /// Record the rectangle from the crop surface's completion callback.
    pub fn report_crop_rectangle(&mut self, rect: JsValue) -> Result<(), JsValue> {
        self.inner.report_crop_rectangle(crop_from_js(rect)?);
        Ok(())
    }

    /// [`report_crop_rectangle`](Self::report_crop_rectangle) with plain numbers.
    pub fn report_crop(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner
            .report_crop_rectangle(CropRectangle::new(x, y, width, height));
    }

    /// Last reported rectangle, or `undefined`.
    pub fn crop_rectangle(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.crop_rectangle())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render the signature raster and finish the session.
    ///
    /// On failure the session stays open so the user can retry or cancel.
    pub fn confirm(&mut self) -> Result<JsOutputRaster, JsValue> {
        self.inner
            .confirm()
            .map(JsOutputRaster::from_output)
            .map_err(|e| {
                crate::console_warn(&format!("crop confirm failed: {}", e));
                JsValue::from_str(&e.to_string())
            })
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }

    pub fn close(&mut self) {
        self.inner.close();
    }
}

impl Default for JsCropSession {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use sigcrop_core::encode::encode_png;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_with_config_object() {
        let config = serde_wasm_bindgen::to_value(&SessionConfig {
            min_zoom: 0.5,
            max_zoom: 2.0,
            ..SessionConfig::default()
        })
        .unwrap();
        let mut session = JsCropSession::with_config(config).unwrap();
        session.open(&encode_png(&[0u8; 16], 2, 2).unwrap()).unwrap();

        session.set_zoom(0.1);
        assert_eq!(session.zoom_factor(), 0.5);
    }

    #[wasm_bindgen_test]
    fn test_confirm_without_crop_fails() {
        let mut session = JsCropSession::new();
        session.open(&encode_png(&[0u8; 16], 2, 2).unwrap()).unwrap();

        assert!(session.confirm().is_err());
        assert!(session.is_open());
    }

    #[wasm_bindgen_test]
    fn test_report_crop_rectangle_object() {
        let mut session = JsCropSession::new();
        session.open(&encode_png(&[0u8; 16], 2, 2).unwrap()).unwrap();

        let rect = serde_wasm_bindgen::to_value(&CropRectangle::full(2, 2)).unwrap();
        session.report_crop_rectangle(rect).unwrap();
        assert!(session.can_confirm());
        assert!(!session.crop_rectangle().unwrap().is_null());
    }
}
