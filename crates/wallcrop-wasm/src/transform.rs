//! WASM bindings for crop geometry.
//!
//! Lets the crop UI size its preview canvas the same way the transcoder
//! sizes its surface.

use wallcrop_core::transform::rotated_bounds as core_rotated_bounds;
use wasm_bindgen::prelude::*;

/// Bounding box of a rotated rectangle.
#[wasm_bindgen]
pub struct JsRotatedBounds {
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl JsRotatedBounds {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Compute the axis-aligned bounds of a `width` x `height` rectangle
/// rotated by `rotation_degrees` about its center.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const b = rotated_bounds(800, 600, 90);
/// canvas.width = Math.floor(b.width);   // 600
/// canvas.height = Math.floor(b.height); // 800
/// ```
#[wasm_bindgen]
pub fn rotated_bounds(width: f64, height: f64, rotation_degrees: f64) -> JsRotatedBounds {
    let bounds = core_rotated_bounds(width, height, rotation_degrees);
    JsRotatedBounds {
        width: bounds.width,
        height: bounds.height,
    }
}
