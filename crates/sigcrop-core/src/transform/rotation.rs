//! Rotation of a raster onto its axis-aligned bounding-box canvas.
//!
//! The canvas is sized to the rotated bounding box and the image is drawn
//! rotated about its centre, fully contained. Pixels of the canvas not covered
//! by the image stay transparent.
//!
//! # Algorithm
//!
//! The forward transform maps a source point `p` to
//! `R(θ) · (p - src_half) + canvas_half`, where `R(θ)` rotates clockwise on
//! screen (y axis pointing down). Rendering uses inverse mapping: every canvas
//! pixel centre is pulled back into source space and sampled there.
//!
//! ```text
//! u = px - cw/2,  v = py - ch/2
//! src_x =  u * cos(θ) + v * sin(θ) + w/2
//! src_y = -u * sin(θ) + v * cos(θ) + h/2
//! ```
//!
//! Exact quarter turns skip resampling and permute pixels directly.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// Tolerance used to recognise exact quarter turns.
const QUARTER_TURN_EPSILON: f64 = 1e-9;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Nearest neighbour: hard edges, no blending.
    Nearest,
    /// Bilinear on premultiplied alpha, matching default canvas smoothing.
    #[default]
    Bilinear,
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle_degrees: f64) -> f64 {
    let normalized = angle_degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Number of clockwise quarter turns if the angle is a multiple of 90°.
pub fn quarter_turns(angle_degrees: f64) -> Option<u32> {
    let turns = normalize_degrees(angle_degrees) / 90.0;
    let rounded = turns.round();
    ((turns - rounded).abs() < QUARTER_TURN_EPSILON).then_some(rounded as u32 % 4)
}

/// Exact bounding box of a `width x height` rectangle rotated by the angle.
///
/// `bbox_w = |cos θ·w| + |sin θ·h|`, `bbox_h = |sin θ·w| + |cos θ·h|`.
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (f64, f64) {
    let theta = angle_degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let (w, h) = (width as f64, height as f64);

    ((cos * w).abs() + (sin * h).abs(), (sin * w).abs() + (cos * h).abs())
}

/// Pixel dimensions of the canvas holding the rotated image.
///
/// The exact bounding box is rounded to the nearest pixel. Quarter turns
/// return the source dimensions (swapped for 90° and 270°) exactly.
///
/// # Example
///
/// ```ignore
/// use sigcrop_core::transform::compute_rotated_bounds;
///
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
/// assert_eq!(compute_rotated_bounds(100, 50, 0.0), (100, 50));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => (width, height),
        Some(_) => (height, width),
        None => {
            let (w, h) = rotated_bounds(width, height, angle_degrees);
            ((w.round() as u32).max(1), (h.round() as u32).max(1))
        }
    }
}

/// Draw `image` rotated by `angle_degrees` (clockwise) onto its bounding-box canvas.
pub fn rotate_onto_canvas(
    image: &DecodedImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> DecodedImage {
    match quarter_turns(angle_degrees) {
        Some(turns) => rotate_quarter(image, turns),
        None => rotate_resample(image, angle_degrees, filter),
    }
}

/// Lossless rotation by a multiple of 90° clockwise.
fn rotate_quarter(image: &DecodedImage, turns: u32) -> DecodedImage {
    let (w, h) = (image.width, image.height);
    if turns % 4 == 0 {
        return image.clone();
    }

    let (out_w, out_h) = if turns % 2 == 1 { (h, w) } else { (w, h) };
    let mut out = DecodedImage::transparent(out_w, out_h);

    for y in 0..h {
        for x in 0..w {
            let (nx, ny) = match turns % 4 {
                1 => (h - 1 - y, x),
                2 => (w - 1 - x, h - 1 - y),
                _ => (y, w - 1 - x),
            };
            let src = image.offset(x, y);
            let dst = out.offset(nx, ny);
            out.pixels[dst..dst + 4].copy_from_slice(&image.pixels[src..src + 4]);
        }
    }

    out
}

/// Arbitrary-angle rotation by inverse mapping.
fn rotate_resample(
    image: &DecodedImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> DecodedImage {
    let (canvas_w, canvas_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);
    let mut canvas = DecodedImage::transparent(canvas_w, canvas_h);
    if image.is_empty() {
        return canvas;
    }

    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = canvas_w as f64 / 2.0;
    let dst_cy = canvas_h as f64 / 2.0;

    for dst_y in 0..canvas_h {
        let v = dst_y as f64 + 0.5 - dst_cy;
        for dst_x in 0..canvas_w {
            let u = dst_x as f64 + 0.5 - dst_cx;

            let src_x = u * cos + v * sin + src_cx;
            let src_y = -u * sin + v * cos + src_cy;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
            };

            if let Some(pixel) = pixel {
                let idx = canvas.offset(dst_x, dst_y);
                canvas.pixels[idx..idx + 4].copy_from_slice(&pixel);
            }
        }
    }

    canvas
}

/// Whether a continuous source coordinate lies on the image.
#[inline]
fn covers(image: &DecodedImage, x: f64, y: f64) -> bool {
    x >= 0.0 && y >= 0.0 && x < image.width as f64 && y < image.height as f64
}

fn sample_nearest(image: &DecodedImage, x: f64, y: f64) -> Option<[u8; 4]> {
    if !covers(image, x, y) {
        return None;
    }
    Some(image.pixel(x.floor() as u32, y.floor() as u32))
}

/// Bilinear sample around pixel centres, edge pixels extended.
///
/// Colour is weighted by alpha so transparent neighbours do not bleed their
/// (meaningless) RGB into visible strokes.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> Option<[u8; 4]> {
    if !covers(image, x, y) {
        return None;
    }

    let fx = x - 0.5;
    let fy = y - 0.5;
    let x_floor = fx.floor();
    let y_floor = fy.floor();
    let tx = fx - x_floor;
    let ty = fy - y_floor;

    let max_x = image.width as i64 - 1;
    let max_y = image.height as i64 - 1;
    let x0 = (x_floor as i64).clamp(0, max_x) as u32;
    let x1 = (x_floor as i64 + 1).clamp(0, max_x) as u32;
    let y0 = (y_floor as i64).clamp(0, max_y) as u32;
    let y1 = (y_floor as i64 + 1).clamp(0, max_y) as u32;

    let taps = [
        (image.pixel(x0, y0), (1.0 - tx) * (1.0 - ty)),
        (image.pixel(x1, y0), tx * (1.0 - ty)),
        (image.pixel(x0, y1), (1.0 - tx) * ty),
        (image.pixel(x1, y1), tx * ty),
    ];

    let mut alpha = 0.0f64;
    let mut rgb = [0.0f64; 3];
    for (p, weight) in taps {
        let a = p[3] as f64 * weight;
        alpha += a;
        for c in 0..3 {
            rgb[c] += p[c] as f64 * a;
        }
    }

    if alpha <= f64::EPSILON {
        return Some([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        out[c] = (rgb[c] / alpha).clamp(0.0, 255.0).round() as u8;
    }
    out[3] = alpha.clamp(0.0, 255.0).round() as u8;
    Some(out)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
