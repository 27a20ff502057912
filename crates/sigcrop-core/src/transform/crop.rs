//! Crop rectangles and pixel-region extraction.
//!
//! # Coordinate System
//!
//! Crop rectangles are expressed in pixels of the *rotated bounding-box
//! canvas*, not of the original image. Origin is the top-left corner.
//! Sub-pixel values are accepted and snapped to the nearest pixel.
//!
//! Regions that stick out of the canvas are not an error: the missing
//! pixels come out fully transparent, like reading past the edge of a
//! browser canvas.

use serde::{Deserialize, Serialize};

use super::{TransformError, TransformResult};
use crate::decode::DecodedImage;

/// Largest output edge accepted, in pixels.
pub const MAX_OUTPUT_DIMENSION: u32 = 16_384;

/// Region to extract, in bounding-box pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width x height` canvas.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    /// Whether the rectangle lies entirely within a canvas of the given size.
    pub fn fits_within(&self, canvas_width: u32, canvas_height: u32) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.width > 0.0
            && self.height > 0.0
            && self.x + self.width <= canvas_width as f64
            && self.y + self.height <= canvas_height as f64
    }

    /// Snap to whole pixels.
    ///
    /// Origin and extent are each rounded to nearest (halves away from zero),
    /// so the output size is always `round(width) x round(height)`. The far
    /// edge is therefore `round(x) + round(width)`, not `round(x + width)`:
    /// `x = 0.5, width = 9.5` snaps to columns `[1, 11)`.
    ///
    /// # Errors
    ///
    /// `TransformError::InvalidCrop` if any value is not finite, if an extent
    /// rounds to zero, or if an extent exceeds [`MAX_OUTPUT_DIMENSION`].
    pub fn to_pixel_rect(&self) -> TransformResult<PixelRect> {
        let invalid = |reason| TransformError::InvalidCrop {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            reason,
        };

        if ![self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(invalid("values must be finite"));
        }

        let width = self.width.round();
        let height = self.height.round();
        if width < 1.0 || height < 1.0 {
            return Err(invalid("extent must be at least one pixel"));
        }
        if width > MAX_OUTPUT_DIMENSION as f64 || height > MAX_OUTPUT_DIMENSION as f64 {
            return Err(invalid("extent exceeds maximum output dimension"));
        }

        Ok(PixelRect {
            x: self.x.round() as i64,
            y: self.y.round() as i64,
            width: width as u32,
            height: height as u32,
        })
    }
}

/// Integer crop region. Offsets may be negative or past the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Copy `rect` out of `canvas` into a new `rect.width x rect.height` image.
///
/// Pixels of `rect` outside the canvas are transparent.
pub fn extract_region(canvas: &DecodedImage, rect: PixelRect) -> DecodedImage {
    let mut output = DecodedImage::transparent(rect.width, rect.height);

    // Overlap of rect with the canvas, in canvas coordinates
    let left = rect.x.max(0);
    let top = rect.y.max(0);
    // Offsets saturate at the i64 range when snapped
    let right = rect
        .x
        .saturating_add(rect.width as i64)
        .min(canvas.width as i64);
    let bottom = rect
        .y
        .saturating_add(rect.height as i64)
        .min(canvas.height as i64);

    if left >= right || top >= bottom {
        return output;
    }

    let row_bytes = (right - left) as usize * DecodedImage::CHANNELS;
    let dst_x = (left - rect.x) as u32;

    // Copy pixel data row by row
    for src_y in top..bottom {
        let dst_y = (src_y - rect.y) as u32;
        let src_start = canvas.offset(left as u32, src_y as u32);
        let dst_start = output.offset(dst_x, dst_y);

        output.pixels[dst_start..dst_start + row_bytes]
            .copy_from_slice(&canvas.pixels[src_start..src_start + row_bytes]);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Opaque image where each pixel encodes its position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 0, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn rect(x: i64, y: i64, width: u32, height: u32) -> PixelRect {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_snap_rounds_to_nearest() {
        let r = CropRectangle::new(10.4, 10.6, 99.5, 20.2).to_pixel_rect().unwrap();
        assert_eq!(r, rect(10, 11, 100, 20));
    }

    #[test]
    fn test_snap_half_pixel_rounds_origin_and_extent_separately() {
        let r = CropRectangle::new(0.5, 0.0, 9.5, 4.0).to_pixel_rect().unwrap();
        assert_eq!(r, rect(1, 0, 10, 4));
    }

    #[test]
    fn test_snap_rejects_empty_extent() {
        assert!(CropRectangle::new(0.0, 0.0, 0.4, 10.0).to_pixel_rect().is_err());
        assert!(CropRectangle::new(0.0, 0.0, 10.0, -5.0).to_pixel_rect().is_err());
    }

    #[test]
    fn test_snap_rejects_non_finite() {
        let result = CropRectangle::new(f64::NAN, 0.0, 10.0, 10.0).to_pixel_rect();
        assert!(matches!(result, Err(TransformError::InvalidCrop { .. })));
        assert!(CropRectangle::new(0.0, 0.0, f64::INFINITY, 10.0)
            .to_pixel_rect()
            .is_err());
    }

    #[test]
    fn test_snap_rejects_huge_extent() {
        let result = CropRectangle::new(0.0, 0.0, 1e9, 10.0).to_pixel_rect();
        assert!(result.is_err());
    }

    #[test]
    fn test_fits_within() {
        assert!(CropRectangle::new(100.0, 100.0, 300.0, 100.0).fits_within(800, 400));
        assert!(CropRectangle::full(800, 400).fits_within(800, 400));
        assert!(!CropRectangle::new(600.0, 0.0, 300.0, 100.0).fits_within(800, 400));
        assert!(!CropRectangle::new(-1.0, 0.0, 10.0, 10.0).fits_within(800, 400));
    }

    #[test]
    fn test_extract_inside() {
        let img = test_image(10, 10);
        let out = extract_region(&img, rect(3, 2, 4, 5));

        assert_eq!((out.width, out.height), (4, 5));
        assert_eq!(out.pixel(0, 0), img.pixel(3, 2));
        assert_eq!(out.pixel(3, 4), img.pixel(6, 6));
    }

    #[test]
    fn test_extract_full_is_identity() {
        let img = test_image(8, 5);
        assert_eq!(extract_region(&img, rect(0, 0, 8, 5)), img);
    }

    #[test]
    fn test_extract_past_right_edge_is_transparent() {
        let img = test_image(10, 10);
        let out = extract_region(&img, rect(8, 0, 4, 2));

        assert_eq!((out.width, out.height), (4, 2));
        assert_eq!(out.pixel(1, 1), img.pixel(9, 1));
        assert_eq!(out.pixel(2, 0), [0, 0, 0, 0]);
        assert_eq!(out.pixel(3, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_extract_negative_offset() {
        let img = test_image(10, 10);
        let out = extract_region(&img, rect(-2, -1, 4, 3));

        assert_eq!(out.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(out.pixel(1, 2), [0, 0, 0, 0]);
        assert_eq!(out.pixel(2, 1), img.pixel(0, 0));
        assert_eq!(out.pixel(3, 2), img.pixel(1, 1));
    }

    #[test]
    fn test_extract_entirely_outside() {
        let img = test_image(10, 10);
        let out = extract_region(&img, rect(50, 50, 3, 3));

        assert_eq!((out.width, out.height), (3, 3));
        assert!(out.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_extract_huge_offsets_blank_fill() {
        let img = test_image(10, 10);

        for (x, y) in [(1e19, 0.0), (0.0, 1e19), (-1e19, 0.0), (0.0, -1e19), (1e300, -1e300)] {
            let r = CropRectangle::new(x, y, 5.0, 5.0).to_pixel_rect().unwrap();
            let out = extract_region(&img, r);
            assert_eq!((out.width, out.height), (5, 5));
            assert!(out.pixels.iter().all(|&b| b == 0), "offset ({}, {})", x, y);
        }
    }

    #[test]
    fn test_extract_larger_than_canvas() {
        let img = test_image(4, 4);
        let out = extract_region(&img, rect(-1, -1, 6, 6));

        assert_eq!(out.pixel(1, 1), img.pixel(0, 0));
        assert_eq!(out.pixel(4, 4), img.pixel(3, 3));
        assert_eq!(out.pixel(5, 5), [0, 0, 0, 0]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: output dimensions always equal the requested extent.
        #[test]
        fn prop_output_matches_rect(
            (cw, ch) in (1u32..=40, 1u32..=40),
            x in -50i64..=50,
            y in -50i64..=50,
            width in 1u32..=60,
            height in 1u32..=60,
        ) {
            let canvas = DecodedImage::transparent(cw, ch);
            let out = extract_region(&canvas, PixelRect { x, y, width, height });
            prop_assert_eq!((out.width, out.height), (width, height));
            prop_assert_eq!(out.pixels.len(), (width * height * 4) as usize);
        }

        /// Property: every in-range output pixel comes from the matching canvas pixel.
        #[test]
        fn prop_pixels_come_from_canvas(
            x in -5i64..=15,
            y in -5i64..=15,
            width in 1u32..=20,
            height in 1u32..=20,
        ) {
            let mut canvas = DecodedImage::transparent(12, 12);
            for py in 0..12 {
                for px in 0..12 {
                    let i = canvas.offset(px, py);
                    canvas.pixels[i..i + 4].copy_from_slice(&[px as u8, py as u8, 1, 255]);
                }
            }

            let out = extract_region(&canvas, PixelRect { x, y, width, height });
            for oy in 0..height {
                for ox in 0..width {
                    let (cx, cy) = (x + ox as i64, y + oy as i64);
                    let expected = if (0..12).contains(&cx) && (0..12).contains(&cy) {
                        canvas.pixel(cx as u32, cy as u32)
                    } else {
                        [0, 0, 0, 0]
                    };
                    prop_assert_eq!(out.pixel(ox, oy), expected);
                }
            }
        }
    }
}
