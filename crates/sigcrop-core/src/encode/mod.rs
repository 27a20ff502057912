//! Image encoding.
//!
//! This module provides functionality for:
//! - Encoding RGBA rasters to PNG (lossless, alpha preserved)
//! - Wrapping encoded bytes as an [`OutputRaster`] with form metadata
//!
//! # Examples
//!
//! ```ignore
//! use sigcrop_core::encode::encode_png;
//!
//! let pixels = vec![0u8; 100 * 100 * 4];
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod output;
mod png;

pub use output::OutputRaster;
pub use png::{encode_png, EncodeError};
