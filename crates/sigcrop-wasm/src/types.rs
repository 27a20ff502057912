//! WASM-compatible wrapper types.
//!
//! This module provides JavaScript-friendly types that wrap the core sigcrop types,
//! handling the conversion between Rust and JavaScript data representations.

use sigcrop_core::transform::CropRectangle;
use sigcrop_core::OutputRaster;
use wasm_bindgen::prelude::*;

/// An encoded PNG raster for JavaScript.
///
/// Append it to a `FormData` with `form.append('signature', raster.to_file())`.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes()` copies them into a
/// JavaScript `Uint8Array`; call `free()` to release the WASM side early.
#[wasm_bindgen]
pub struct JsOutputRaster {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsOutputRaster {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the encoded PNG in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// File name for the multipart form field
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        OutputRaster::FILE_NAME.to_string()
    }

    /// MIME type of the encoded bytes
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        OutputRaster::MIME_TYPE.to_string()
    }

    /// Returns the PNG bytes as Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Wrap the PNG as a `File` named for the form field.
    pub fn to_file(&self) -> Result<web_sys::File, JsValue> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(self.bytes.as_slice()));
        let options = web_sys::FilePropertyBag::new();
        options.set_type(OutputRaster::MIME_TYPE);
        web_sys::File::new_with_u8_array_sequence_and_options(
            &parts,
            OutputRaster::FILE_NAME,
            &options,
        )
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsOutputRaster {
    pub(crate) fn from_output(output: OutputRaster) -> Self {
        Self {
            width: output.width,
            height: output.height,
            bytes: output.bytes,
        }
    }
}

/// Read a `{ x, y, width, height }` object.
pub(crate) fn crop_from_js(value: JsValue) -> Result<CropRectangle, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop rectangle: {}", e)))
}
