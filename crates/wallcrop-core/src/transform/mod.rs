//! Geometry for the crop stage: rotated bounds, rotated crops, resampling.
//!
//! # Coordinate System
//!
//! - Crop coordinates are in source-image pixels
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Origin is top-left corner

mod crop;
mod resample;
mod rotation;

pub use crop::{render_rotated_crop, CropRegion};
pub use resample::{resample, scaled_dimensions};
pub use rotation::{rotated_bounds, RotatedBounds};
