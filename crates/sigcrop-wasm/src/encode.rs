//! Export bindings that bypass the crop session.
//!
//! - [`export_drawing`] - Encode a drawing canvas as the signature PNG
//! - [`resize_png`] - Cap the dimensions of an encoded image
//!
//! # Example
//!
//! ```typescript
//! const { data, width, height } = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const raster = export_drawing(new Uint8Array(data.buffer), width, height);
//! const small = resize_png(raster.bytes(), 600, 200);
//! ```

use crate::types::JsOutputRaster;
use sigcrop_core::export;
use wasm_bindgen::prelude::*;

/// Encode the RGBA pixels of a drawing surface as PNG.
///
/// # Errors
///
/// Returns an error if either dimension is zero or the buffer length is not
/// `width * height * 4`.
#[wasm_bindgen]
pub fn export_drawing(rgba: &[u8], width: u32, height: u32) -> Result<JsOutputRaster, JsValue> {
    export::export_drawing(rgba, width, height)
        .map(JsOutputRaster::from_output)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Downscale an encoded image to fit within `max_width x max_height`.
///
/// Aspect ratio is preserved; images already within bounds keep their size.
#[wasm_bindgen]
pub fn resize_png(bytes: &[u8], max_width: u32, max_height: u32) -> Result<JsOutputRaster, JsValue> {
    export::resize_png(bytes, max_width, max_height)
        .map(JsOutputRaster::from_output)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
