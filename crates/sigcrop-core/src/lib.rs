//! Sigcrop Core - signature image pipeline
//!
//! This crate turns an uploaded or drawn signature into the PNG raster that is
//! attached to a form: decoding the source, rotating it onto its bounding-box
//! canvas, cropping, and encoding. [`CropSession`] drives the interactive
//! crop dialog on top of the stateless transform engine.

pub mod decode;
pub mod encode;
pub mod export;
pub mod session;
pub mod transform;

pub use decode::{DecodeError, DecodedImage, SourceImage};
pub use encode::{EncodeError, OutputRaster};
pub use export::{export_drawing, resize_png};
pub use session::{
    CropSession, RenderJob, SessionConfig, SessionError, SessionState, TransformParameters,
};
pub use transform::{
    compute_rotated_bounds, render, CropRectangle, InterpolationFilter, TransformError,
};
