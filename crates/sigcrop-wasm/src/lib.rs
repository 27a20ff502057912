//! Sigcrop WASM - WebAssembly bindings for the signature pipeline
//!
//! This crate exposes sigcrop-core to the signature upload form.
//!
//! # Module Structure
//!
//! - `session` - The interactive crop dialog ([`JsCropSession`])
//! - `transform` - Stateless rotate + crop rendering
//! - `encode` - Freehand drawing export and PNG resizing
//! - `decode` - Header probing and `data:` URI decoding
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession } from '@sigcrop/wasm';
//!
//! await init();
//!
//! const session = new JsCropSession();
//! session.open(new Uint8Array(await file.arrayBuffer()));
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod transform;
mod types;

// Re-export public types
pub use decode::{data_uri_to_bytes, probe_dimensions};
pub use encode::{export_drawing, resize_png};
pub use session::JsCropSession;
pub use transform::{bounding_box, render_crop, render_crop_rect};
pub use types::JsOutputRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "sigcrop-wasm {} loaded",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Warn in the browser console. No-op off the web.
pub(crate) fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
