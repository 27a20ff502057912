//! Encoded output handed to the form layer.

use super::{encode_png, EncodeError};
use crate::decode::DecodedImage;

/// A PNG-encoded raster ready to be attached to a multipart form field.
///
/// Produced fresh by every export; the engine keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRaster {
    /// Width of the encoded image in pixels.
    pub width: u32,
    /// Height of the encoded image in pixels.
    pub height: u32,
    /// PNG file bytes.
    pub bytes: Vec<u8>,
}

impl OutputRaster {
    /// File name used for the binary form field.
    pub const FILE_NAME: &'static str = "signature.png";
    /// MIME type of the encoded bytes.
    pub const MIME_TYPE: &'static str = "image/png";

    /// Encode a decoded raster as PNG.
    pub fn from_image(image: &DecodedImage) -> Result<Self, EncodeError> {
        let bytes = encode_png(&image.pixels, image.width, image.height)?;
        Ok(Self {
            width: image.width,
            height: image.height,
            bytes,
        })
    }

}
