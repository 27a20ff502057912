//! The transform engine: decode, rotate onto the bounding-box canvas, crop,
//! and encode.
//!
//! Every call allocates its own canvases, so renders for different images
//! can run concurrently without interfering.

use super::crop::{extract_region, CropRectangle};
use super::rotation::{rotate_onto_canvas, InterpolationFilter};
use super::TransformResult;
use crate::decode::{decode_image, DecodedImage, SourceImage};
use crate::encode::OutputRaster;

/// Render `source` rotated by `rotation_degrees` (clockwise) and cropped to
/// `crop`, encoded as PNG.
///
/// The output is exactly `crop.width x crop.height` pixels after snapping.
///
/// # Errors
///
/// * `TransformError::Decode` if the source cannot be decoded
/// * `TransformError::InvalidCrop` if the rectangle is unusable
///
/// # Example
///
/// ```ignore
/// use sigcrop_core::transform::{render, CropRectangle};
///
/// let crop = CropRectangle::new(100.0, 100.0, 300.0, 100.0);
/// let png = render(&source, &crop, 0.0)?;
/// assert_eq!((png.width, png.height), (300, 100));
/// ```
pub fn render(
    source: &SourceImage,
    crop: &CropRectangle,
    rotation_degrees: f64,
) -> TransformResult<OutputRaster> {
    render_with_filter(source, crop, rotation_degrees, InterpolationFilter::default())
}

/// [`render`] with an explicit interpolation filter.
pub fn render_with_filter(
    source: &SourceImage,
    crop: &CropRectangle,
    rotation_degrees: f64,
    filter: InterpolationFilter,
) -> TransformResult<OutputRaster> {
    // Reject a bad rectangle before paying for the decode
    crop.to_pixel_rect()?;

    let image = decode_image(source.bytes()).inspect_err(|err| {
        tracing::warn!(error = %err, "source image failed to decode");
    })?;

    let cropped = render_image(&image, crop, rotation_degrees, filter)?;
    let output = OutputRaster::from_image(&cropped)?;

    tracing::debug!(
        source_width = image.width,
        source_height = image.height,
        rotation_degrees,
        width = output.width,
        height = output.height,
        bytes = output.bytes.len(),
        "rendered crop"
    );

    Ok(output)
}

/// Pixel-level rotate + crop on an already decoded image.
pub fn render_image(
    image: &DecodedImage,
    crop: &CropRectangle,
    rotation_degrees: f64,
    filter: InterpolationFilter,
) -> TransformResult<DecodedImage> {
    let rect = crop.to_pixel_rect()?;
    let canvas = rotate_onto_canvas(image, rotation_degrees, filter);
    if !crop.fits_within(canvas.width, canvas.height) {
        tracing::debug!(
            canvas_width = canvas.width,
            canvas_height = canvas.height,
            ?crop,
            "crop leaves the rotated canvas, filling with transparency"
        );
    }
    Ok(extract_region(&canvas, rect))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: output is always exactly the crop extent.
        #[test]
        fn prop_output_dimensions_equal_crop(
            (w, h) in (1u32..=30, 1u32..=30),
            angle in 0.0f64..360.0,
            x in 0.0f64..40.0,
            y in 0.0f64..40.0,
            cw in 1u32..=40,
            ch in 1u32..=40,
        ) {
            let img = DecodedImage::transparent(w, h);
            let crop = CropRectangle::new(x, y, cw as f64, ch as f64);
            let out = render_image(&img, &crop, angle, InterpolationFilter::Bilinear).unwrap();
            prop_assert_eq!((out.width, out.height), (cw, ch));
        }

        /// Property: rendering is a pure function of its inputs.
        #[test]
        fn prop_deterministic(
            (w, h) in (2u32..=20, 2u32..=20),
            angle in 0.0f64..360.0,
        ) {
            let pixels: Vec<u8> = (0..w * h * 4).map(|i| (i * 31 % 256) as u8).collect();
            let img = DecodedImage::new(w, h, pixels);
            let crop = CropRectangle::new(0.0, 0.0, w as f64, h as f64);

            let a = render_image(&img, &crop, angle, InterpolationFilter::Bilinear).unwrap();
            let b = render_image(&img, &crop, angle, InterpolationFilter::Bilinear).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
