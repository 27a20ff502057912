//! The transform engine: rotation onto a bounding-box canvas and cropping.
//!
//! # Pipeline
//!
//! 1. Decode the source (EXIF orientation applied)
//! 2. Rotate onto a canvas sized to the rotated bounding box
//! 3. Extract the crop rectangle (transparent where it leaves the canvas)
//! 4. Encode as PNG
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Crop coordinates are pixels of the rotated bounding box
//! - Origin is top-left corner

mod crop;
mod engine;
mod error;
mod rotation;

pub use crop::{extract_region, CropRectangle, PixelRect, MAX_OUTPUT_DIMENSION};
pub use engine::{render, render_image, render_with_filter};
pub use error::{TransformError, TransformResult};
pub use rotation::{
    compute_rotated_bounds, normalize_degrees, quarter_turns, rotate_onto_canvas, rotated_bounds,
    InterpolationFilter,
};
