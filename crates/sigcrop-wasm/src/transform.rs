//! WASM bindings for the transform engine.
//!
//! These are the stateless entry points; the crop dialog normally goes
//! through [`JsCropSession`](crate::JsCropSession) instead.

use crate::types::{crop_from_js, JsOutputRaster};
use sigcrop_core::decode::SourceImage;
use sigcrop_core::transform::{self, CropRectangle};
use wasm_bindgen::prelude::*;

/// Rotate and crop an encoded image, returning the PNG raster.
///
/// # Arguments
///
/// * `bytes` - Encoded PNG or JPEG source
/// * `x`, `y`, `width`, `height` - Crop rectangle in rotated bounding-box pixels
/// * `rotation_degrees` - Clockwise rotation
///
/// # Example (TypeScript)
///
/// ```typescript
/// const raster = render_crop(bytes, 100, 100, 300, 100, 0);
/// form.append('signature', new File([raster.bytes()], raster.file_name));
/// ```
#[wasm_bindgen]
pub fn render_crop(
    bytes: &[u8],
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rotation_degrees: f64,
) -> Result<JsOutputRaster, JsValue> {
    render(bytes, CropRectangle::new(x, y, width, height), rotation_degrees)
}

/// [`render_crop`] taking the crop as a `{ x, y, width, height }` object.
#[wasm_bindgen]
pub fn render_crop_rect(
    bytes: &[u8],
    crop: JsValue,
    rotation_degrees: f64,
) -> Result<JsOutputRaster, JsValue> {
    render(bytes, crop_from_js(crop)?, rotation_degrees)
}

fn render(
    bytes: &[u8],
    crop: CropRectangle,
    rotation_degrees: f64,
) -> Result<JsOutputRaster, JsValue> {
    let source = SourceImage::from_bytes(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    transform::render(&source, &crop, rotation_degrees)
        .map(JsOutputRaster::from_output)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Size of the canvas a `width x height` image occupies when rotated.
///
/// Returns `[width, height]`. The crop surface uses this to lay out the
/// rotated preview so reported rectangles line up with the render.
#[wasm_bindgen]
pub fn bounding_box(width: u32, height: u32, rotation_degrees: f64) -> Vec<u32> {
    let (w, h) = transform::compute_rotated_bounds(width, height, rotation_degrees);
    vec![w, h]
}
