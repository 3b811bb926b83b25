//! Drawing surfaces used as scratch space by the transcoder.
//!
//! A surface is a fixed-size RGB raster that can receive a (rotated) crop of
//! a decoded image, or a resampled copy of another surface. Surfaces come
//! from a [`RenderBackend`], which is where allocation limits live.
//!
//! The default backend, [`CanvasBackend`], keeps pixels in memory and
//! resamples with the `image` crate. Tests swap in backends that count or
//! refuse allocations.

mod canvas;

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::transform::CropRegion;

pub use canvas::{Canvas, CanvasBackend, DEFAULT_MAX_AREA, DEFAULT_MAX_DIMENSION};

/// A drawing surface could not be provided or drawn on.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Width or height is zero.
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The requested surface exceeds the backend's limits.
    #[error("Surface {width}x{height} exceeds backend limits")]
    TooLarge { width: u32, height: u32 },

    /// The pixel buffer could not be allocated.
    #[error("Out of memory allocating {bytes} byte surface")]
    OutOfMemory { bytes: usize },

    /// A draw call failed.
    #[error("Draw failed: {0}")]
    DrawFailed(String),
}

/// A mutable RGB raster.
pub trait RasterSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Row-major RGB bytes, `width * height * 3` long.
    fn rgb_pixels(&self) -> &[u8];

    /// Draw `region` of `image` rotated by `rotation_degrees` about this
    /// surface's center, with high-quality smoothing.
    fn draw_crop(
        &mut self,
        image: &DecodedImage,
        region: &CropRegion,
        rotation_degrees: f64,
    ) -> Result<(), SurfaceError>;

    /// Resample all of `source` to fill this surface.
    fn draw_surface(&mut self, source: &Self) -> Result<(), SurfaceError>
    where
        Self: Sized;
}

/// Allocates drawing surfaces.
pub trait RenderBackend {
    type Surface: RasterSurface;

    fn create_surface(&self, width: u32, height: u32) -> Result<Self::Surface, SurfaceError>;
}
