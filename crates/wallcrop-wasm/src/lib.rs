//! Wallcrop WASM - WebAssembly bindings for Wallcrop
//!
//! This crate exposes the wallcrop-core transcoder to JavaScript/TypeScript
//! crop dialogs.
//!
//! # Module Structure
//!
//! - `transcode` - Crop, rotate and compress to a byte budget
//! - `transform` - Rotated bounds for sizing previews
//! - `types` - WASM-compatible wrapper for the encoded result
//!
//! # Usage
//!
//! ```typescript
//! import init, { transcode_cropped_image } from '@wallcrop/wasm';
//!
//! await init();
//!
//! const result = transcode_cropped_image(dataUri, 10, 20, 400, 400, 0, 2 * 1024 * 1024);
//! if (!result.metBudget) {
//!   console.warn(`Still ${result.byte_length} bytes after downscaling`);
//! }
//! ```

use wasm_bindgen::prelude::*;

mod transcode;
mod transform;
mod types;

pub use transcode::{transcode_bytes, transcode_cropped_image, transcode_with_options};
pub use transform::{rotated_bounds, JsRotatedBounds};
pub use types::JsEncodedResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
