//! Addressable source images.
//!
//! A [`SourceImage`] holds the still-encoded bytes of an uploaded or pasted
//! image together with its displayed dimensions. Pixels are decoded on demand
//! by the transform engine; nothing is cached between sessions.

use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};

use super::{probe_dimensions, DecodeError};

/// Encoded image bytes plus intrinsic dimensions.
///
/// Cloning is cheap: the bytes are shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl SourceImage {
    /// Wrap encoded bytes, probing the header for dimensions.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self, DecodeError> {
        let bytes = bytes.into();
        let (width, height) = probe_dimensions(&bytes)?;
        Ok(Self {
            bytes,
            width,
            height,
        })
    }

    /// Load a source from a `data:` URI such as the one a file picker yields.
    ///
    /// Remote URLs are rejected: fetching them belongs to the HTTP client.
    pub fn from_data_uri(uri: &str) -> Result<Self, DecodeError> {
        let bytes = parse_data_uri(uri)?;
        Self::from_bytes(bytes)
    }

    /// Intrinsic width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Decode the payload of a `data:[<mime>][;base64],<payload>` URI.
pub fn parse_data_uri(uri: &str) -> Result<Vec<u8>, DecodeError> {
    let uri = uri.trim();
    let Some(rest) = strip_prefix_ignore_case(uri, "data:") else {
        let scheme = uri.split(':').next().unwrap_or_default();
        return Err(DecodeError::UnsupportedSource(format!(
            "expected a data: URI, got scheme `{scheme}`"
        )));
    };

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidDataUri("missing `,` separator".to_string()))?;

    let is_base64 = header
        .split(';')
        .skip(1)
        .any(|param| param.trim().eq_ignore_ascii_case("base64"));

    if is_base64 {
        // Data URIs pasted from text fields sometimes carry line breaks.
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| DecodeError::InvalidDataUri(e.to_string()))
    } else {
        percent_decode(payload)
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

fn percent_decode(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = payload.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| {
                    DecodeError::InvalidDataUri(format!("bad percent escape at byte {i}"))
                })?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    Ok(out)
}
