//! Error type for the transform engine.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors produced by [`render`](super::render) and friends.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The source image could not be loaded or decoded.
    #[error("Failed to decode source image: {0}")]
    Decode(#[from] DecodeError),

    /// The crop rectangle has non-finite values or an empty/oversized extent.
    #[error("Invalid crop rectangle ({x}, {y}, {width}x{height}): {reason}")]
    InvalidCrop {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        reason: &'static str,
    },

    /// The output raster could not be encoded.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] EncodeError),
}

/// Result alias for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;
