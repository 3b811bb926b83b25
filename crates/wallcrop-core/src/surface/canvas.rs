//! In-memory RGB canvas.

use super::{RasterSurface, RenderBackend, SurfaceError};
use crate::decode::{DecodedImage, FilterType};
use crate::transform::{render_rotated_crop, resample, CropRegion};

/// Largest width or height a canvas may have, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 32_767;

/// Largest canvas area, in pixels (16384 x 16384).
pub const DEFAULT_MAX_AREA: u64 = 268_435_456;

/// Backend producing [`Canvas`] surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasBackend {
    pub max_dimension: u32,
    pub max_area: u64,
    /// Filter used when one canvas is drawn onto another of a different size.
    pub smoothing: FilterType,
}

impl Default for CanvasBackend {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_area: DEFAULT_MAX_AREA,
            smoothing: FilterType::Lanczos3,
        }
    }
}

impl CanvasBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_dimension(mut self, max: u32) -> Self {
        self.max_dimension = max;
        self
    }

    pub fn with_max_area(mut self, max: u64) -> Self {
        self.max_area = max;
        self
    }

    pub fn with_smoothing(mut self, filter: FilterType) -> Self {
        self.smoothing = filter;
        self
    }
}

impl RenderBackend for CanvasBackend {
    type Surface = Canvas;

    fn create_surface(&self, width: u32, height: u32) -> Result<Canvas, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        if width > self.max_dimension
            || height > self.max_dimension
            || width as u64 * height as u64 > self.max_area
        {
            return Err(SurfaceError::TooLarge { width, height });
        }

        let bytes = width as usize * height as usize * 3;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|_| SurfaceError::OutOfMemory { bytes })?;
        pixels.resize(bytes, 0);

        Ok(Canvas {
            image: DecodedImage::new(width, height, pixels),
            smoothing: self.smoothing,
        })
    }
}

/// An RGB canvas backed by a [`DecodedImage`]. Starts out black.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: DecodedImage,
    smoothing: FilterType,
}

impl Canvas {
    /// Borrow the canvas contents as an image.
    pub fn as_image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn into_image(self) -> DecodedImage {
        self.image
    }
}

impl RasterSurface for Canvas {
    fn width(&self) -> u32 {
        self.image.width
    }

    fn height(&self) -> u32 {
        self.image.height
    }

    fn rgb_pixels(&self) -> &[u8] {
        &self.image.pixels
    }

    fn draw_crop(
        &mut self,
        image: &DecodedImage,
        region: &CropRegion,
        rotation_degrees: f64,
    ) -> Result<(), SurfaceError> {
        if image.is_empty() {
            return Err(SurfaceError::DrawFailed("source image is empty".to_string()));
        }
        render_rotated_crop(image, region, rotation_degrees, &mut self.image);
        Ok(())
    }

    fn draw_surface(&mut self, source: &Self) -> Result<(), SurfaceError> {
        let resampled = resample(&source.image, self.image.width, self.image.height, self.smoothing)
            .ok_or_else(|| SurfaceError::DrawFailed("resample failed".to_string()))?;
        self.image.pixels = resampled.pixels;
        Ok(())
    }
}
