//! Source inspection bindings.
//!
//! # Functions
//!
//! - [`probe_dimensions`] - Read `[width, height]` from an encoded image header
//! - [`data_uri_to_bytes`] - Decode the payload of a `data:` URI

use sigcrop_core::decode;
use wasm_bindgen::prelude::*;

/// Read the displayed dimensions of an encoded image without decoding pixels.
///
/// Returns `[width, height]` with EXIF orientation taken into account.
#[wasm_bindgen]
pub fn probe_dimensions(bytes: &[u8]) -> Result<Vec<u32>, JsValue> {
    decode::probe_dimensions(bytes)
        .map(|(w, h)| vec![w, h])
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a `data:` URI (base64 or percent-encoded) into raw bytes.
///
/// # Errors
///
/// Returns an error for any other URI scheme or a malformed payload.
#[wasm_bindgen]
pub fn data_uri_to_bytes(uri: &str) -> Result<Vec<u8>, JsValue> {
    decode::parse_data_uri(uri).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigcrop_core::encode::encode_png;

    #[test]
    fn test_probe_dimensions() {
        let bytes = encode_png(&[0u8; 7 * 3 * 4], 7, 3).unwrap();
        assert_eq!(probe_dimensions(&bytes).unwrap(), vec![7, 3]);
    }

    #[test]
    fn test_data_uri_to_bytes() {
        assert_eq!(
            data_uri_to_bytes("data:text/plain;base64,aGk=").unwrap(),
            b"hi".to_vec()
        );
    }
}
