//! Crop regions and rotated-crop rendering.
//!
//! A crop is taken in source pixel coordinates and, when a rotation is
//! requested, rendered "rotate about center, then crop" the way image
//! editors do it: the destination canvas is the rotated bounding box, the
//! origin moves to its center, the drawing rotates, and the unrotated crop
//! is drawn centered on that point.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Positive angles rotate clockwise on screen
//! - Pixel centers sit at `i + 0.5`
//!
//! Destination pixels that fall outside the crop rectangle, or crop pixels
//! that fall outside the source image, are black.

use serde::{Deserialize, Serialize};

use super::rotation::rotated_bounds;
use crate::decode::DecodedImage;

/// A crop rectangle in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A region covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    /// True when all coordinates are finite and the size is positive.
    ///
    /// Staying inside the source image is not required.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Pixel size of the surface this crop renders onto.
    ///
    /// Unrotated crops keep their own size; rotated crops use the rotated
    /// bounding box. Fractional sizes truncate like a canvas size assignment.
    pub fn surface_size(&self, rotation_degrees: f64) -> (u32, u32) {
        if rotation_degrees == 0.0 {
            return (self.width as u32, self.height as u32);
        }
        let bounds = rotated_bounds(self.width, self.height, rotation_degrees);
        (bounds.width as u32, bounds.height as u32)
    }

    /// True when every edge lands on a whole pixel.
    fn is_pixel_aligned(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.fract() == 0.0)
    }
}

/// Draw `region` of `source` onto `target`, rotated by `rotation_degrees`
/// about the center of `target`.
///
/// `target` keeps its dimensions; every one of its pixels is overwritten.
pub fn render_rotated_crop(
    source: &DecodedImage,
    region: &CropRegion,
    rotation_degrees: f64,
    target: &mut DecodedImage,
) {
    if rotation_degrees == 0.0 && region.is_pixel_aligned() {
        copy_aligned(source, region, target);
        return;
    }

    let radians = rotation_degrees.to_radians();
    let (sin, cos) = radians.sin_cos();

    let crop_cx = region.width / 2.0;
    let crop_cy = region.height / 2.0;
    let (surface_cx, surface_cy) = if rotation_degrees == 0.0 {
        (crop_cx, crop_cy)
    } else {
        (target.width as f64 / 2.0, target.height as f64 / 2.0)
    };

    let width = target.width as usize;
    for py in 0..target.height as usize {
        for px in 0..width {
            let dx = px as f64 + 0.5 - surface_cx;
            let dy = py as f64 + 0.5 - surface_cy;

            // Inverse rotation back into crop-local coordinates
            let u = crop_cx + cos * dx + sin * dy;
            let v = crop_cy - sin * dx + cos * dy;

            let rgb = if u >= 0.0 && v >= 0.0 && u < region.width && v < region.height {
                sample_bilinear(source, region.x + u, region.y + v)
            } else {
                [0, 0, 0]
            };

            let idx = (py * width + px) * 3;
            target.pixels[idx..idx + 3].copy_from_slice(&rgb);
        }
    }
}

/// Row copy for unrotated, whole-pixel crops.
fn copy_aligned(source: &DecodedImage, region: &CropRegion, target: &mut DecodedImage) {
    target.pixels.fill(0);

    // Past these offsets no row overlaps the source, and the i64 math stays in range.
    let reach_x = source.width as f64 + target.width as f64;
    let reach_y = source.height as f64 + target.height as f64;
    let left = region.x.clamp(-reach_x, reach_x) as i64;
    let top = region.y.clamp(-reach_y, reach_y) as i64;
    let target_w = target.width as i64;

    for ty in 0..target.height as i64 {
        let sy = top + ty;
        if sy < 0 || sy >= source.height as i64 {
            continue;
        }

        // Overlap of this target row with the source row
        let tx_start = (-left).max(0);
        let tx_end = target_w.min(source.width as i64 - left);
        if tx_start >= tx_end {
            continue;
        }

        let src_start = ((sy * source.width as i64 + left + tx_start) * 3) as usize;
        let dst_start = ((ty * target_w + tx_start) * 3) as usize;
        let len = ((tx_end - tx_start) * 3) as usize;
        target.pixels[dst_start..dst_start + len]
            .copy_from_slice(&source.pixels[src_start..src_start + len]);
    }
}

/// Sample a pixel at continuous coordinates using bilinear interpolation.
///
/// Points outside the image are black. Near the edges the neighbourhood is
/// clamped so border pixels keep their own colour.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as f64, image.height as f64);
    if x < 0.0 || y < 0.0 || x >= w || y >= h {
        return [0, 0, 0];
    }

    let fx = (x - 0.5).clamp(0.0, w - 1.0);
    let fy = (y - 0.5).clamp(0.0, h - 1.0);

    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] as f64 * (1.0 - tx) * (1.0 - ty)
            + p10[i] as f64 * tx * (1.0 - ty)
            + p01[i] as f64 * (1.0 - tx) * ty
            + p11[i] as f64 * tx * ty;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}
