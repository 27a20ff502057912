//! Export paths that bypass the crop session.
//!
//! - [`export_drawing`] encodes a freehand drawing surface as-is
//! - [`resize_png`] caps the dimensions of an already exported raster

use crate::decode::{decode_image, resize_to_bounds, FilterType};
use crate::encode::{encode_png, EncodeError, OutputRaster};
use crate::transform::TransformResult;

/// Encode the raw RGBA buffer of a drawing surface as PNG.
///
/// No rotation or cropping is applied.
///
/// # Errors
///
/// * `EncodeError::InvalidDimensions` if either dimension is zero
/// * `EncodeError::InvalidPixelData` if `rgba.len() != width * height * 4`
pub fn export_drawing(rgba: &[u8], width: u32, height: u32) -> Result<OutputRaster, EncodeError> {
    let bytes = encode_png(rgba, width, height)?;
    tracing::debug!(width, height, bytes = bytes.len(), "exported drawing");
    Ok(OutputRaster {
        width,
        height,
        bytes,
    })
}

/// Downscale an encoded image to fit `max_width x max_height` and re-encode
/// it as PNG.
///
/// Aspect ratio is preserved and images are never upscaled; a source already
/// within bounds keeps its dimensions.
///
/// # Errors
///
/// * `TransformError::Decode` if the blob cannot be decoded or a bound is zero
/// * `TransformError::Encode` if re-encoding fails
pub fn resize_png(blob: &[u8], max_width: u32, max_height: u32) -> TransformResult<OutputRaster> {
    let image = decode_image(blob)?;
    let resized = resize_to_bounds(&image, max_width, max_height, FilterType::Lanczos3)?;
    Ok(OutputRaster::from_image(&resized)?)
}
