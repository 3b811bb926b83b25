//! Bounding-box math for rotated rectangles.
//!
//! A crop rotated about its own center needs a larger canvas to hold all
//! four corners. For rotation by angle θ the axis-aligned bounds are:
//! ```text
//! w' = w * |cos θ| + h * |sin θ|
//! h' = w * |sin θ| + h * |cos θ|
//! ```

/// Axis-aligned size of a rotated rectangle, in (fractional) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedBounds {
    pub width: f64,
    pub height: f64,
}

/// Compute the bounding box of a `width` x `height` rectangle rotated by
/// `rotation_degrees` about its center.
///
/// Exact for 0° (identity). 90° swaps the dimensions up to floating-point
/// rounding. The sign of the angle does not matter.
///
/// # Example
///
/// ```
/// use wallcrop_core::transform::rotated_bounds;
///
/// let b = rotated_bounds(100.0, 50.0, 0.0);
/// assert_eq!((b.width, b.height), (100.0, 50.0));
/// ```
pub fn rotated_bounds(width: f64, height: f64, rotation_degrees: f64) -> RotatedBounds {
    let radians = rotation_degrees.to_radians();
    let cos = radians.cos().abs();
    let sin = radians.sin().abs();

    RotatedBounds {
        width: width * cos + height * sin,
        height: width * sin + height * cos,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
