//! WASM-compatible wrapper types for transcode results.

use wallcrop_core::EncodedResult;
use wasm_bindgen::prelude::*;

/// A transcoded JPEG for JavaScript.
///
/// # Memory Management
///
/// The JPEG bytes live in WASM memory. `bytes()` copies them into a new
/// `Uint8Array`, suitable for `new Blob([result.bytes()], { type: 'image/jpeg' })`.
#[wasm_bindgen]
pub struct JsEncodedResult {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    quality: f32,
    scale: f64,
    met_budget: bool,
}

#[wasm_bindgen]
impl JsEncodedResult {
    /// JPEG bytes as a Uint8Array (copied).
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.bytes.as_slice())
    }

    /// Size of the JPEG in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoder quality in (0, 1]
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Fraction of the cropped resolution that was kept
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// False when the budget could not be met and this is the smallest attempt
    #[wasm_bindgen(getter, js_name = metBudget)]
    pub fn met_budget(&self) -> bool {
        self.met_budget
    }
}

impl From<EncodedResult> for JsEncodedResult {
    fn from(result: EncodedResult) -> Self {
        Self {
            width: result.width,
            height: result.height,
            quality: result.quality,
            scale: result.scale,
            met_budget: result.met_budget,
            bytes: result.bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_encoded_result() {
        let result = EncodedResult {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 640,
            height: 480,
            quality: 0.85,
            scale: 0.9,
            met_budget: true,
        };

        let js = JsEncodedResult::from(result);
        assert_eq!(js.byte_length(), 4);
        assert_eq!((js.width(), js.height()), (640, 480));
        assert_eq!(js.quality(), 0.85);
        assert_eq!(js.scale(), 0.9);
        assert!(js.met_budget());
    }
}
