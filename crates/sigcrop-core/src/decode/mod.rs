//! Image loading and decoding.
//!
//! This module provides functionality for:
//! - Wrapping uploaded bytes or `data:` URIs as [`SourceImage`]s
//! - Decoding PNG and JPEG into RGBA pixel buffers (EXIF orientation applied)
//! - Downscaling rasters to fit maximum dimensions
//!
//! # Architecture
//!
//! Operations are synchronous and allocation-local, so they can run on the
//! UI thread, in a Web Worker via the WASM bindings, or on a native thread.
//!
//! # Examples
//!
//! ```ignore
//! use sigcrop_core::decode::{decode_image, SourceImage};
//!
//! let source = SourceImage::from_data_uri(&uri)?;
//! let image = decode_image(source.bytes())?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod raster;
mod resize;
mod source;
mod types;

pub use raster::{decode_image, probe_dimensions};
pub use resize::{calculate_fit_dimensions, resize, resize_to_bounds};
pub use source::{parse_data_uri, SourceImage};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
