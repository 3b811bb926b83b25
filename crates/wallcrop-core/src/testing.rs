//! Fakes shared by the unit tests.

use std::cell::{Cell, RefCell};

use crate::decode::{DecodeError, DecodedImage, ImageDecoder};
use crate::encode::{EncodeError, JpegEncoder};
use crate::surface::{Canvas, CanvasBackend, RasterSurface, RenderBackend, SurfaceError};

/// One recorded encode call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Attempt {
    pub width: u32,
    pub height: u32,
    pub quality: f32,
}

/// Encoder whose output length is a function of surface size and quality.
pub(crate) struct SizedEncoder<F> {
    size: F,
    pub attempts: RefCell<Vec<Attempt>>,
}

impl<F: Fn(u32, u32, f32) -> usize> SizedEncoder<F> {
    pub fn new(size: F) -> Self {
        Self {
            size,
            attempts: RefCell::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> Vec<Attempt> {
        self.attempts.borrow().clone()
    }

    /// Attempted qualities in hundredths, for exact comparisons.
    pub fn quality_levels(&self) -> Vec<u32> {
        self.attempts
            .borrow()
            .iter()
            .map(|a| (a.quality * 100.0).round() as u32)
            .collect()
    }
}

impl<F: Fn(u32, u32, f32) -> usize> JpegEncoder for SizedEncoder<F> {
    fn encode<S: RasterSurface>(&self, surface: &S, quality: f32) -> Result<Vec<u8>, EncodeError> {
        let (width, height) = (surface.width(), surface.height());
        self.attempts.borrow_mut().push(Attempt {
            width,
            height,
            quality,
        });
        Ok(vec![0xAB; (self.size)(width, height, quality)])
    }
}

/// Output size proportional to pixel count and quality, never empty.
pub(crate) fn proportional_size(width: u32, height: u32, quality: f32) -> usize {
    ((width as f64 * height as f64 * quality as f64).round() as usize).max(1)
}

/// Canvas backend that counts allocations.
#[derive(Default)]
pub(crate) struct CountingBackend {
    inner: CanvasBackend,
    pub created: Cell<usize>,
    pub sizes: RefCell<Vec<(u32, u32)>>,
}

impl RenderBackend for CountingBackend {
    type Surface = Canvas;

    fn create_surface(&self, width: u32, height: u32) -> Result<Canvas, SurfaceError> {
        self.created.set(self.created.get() + 1);
        self.sizes.borrow_mut().push((width, height));
        self.inner.create_surface(width, height)
    }
}

/// Decoder returning a fixed image, or failing when given `None`.
pub(crate) struct FixedDecoder(pub Option<DecodedImage>);

impl ImageDecoder for FixedDecoder {
    fn decode(&self, source: &str) -> Result<DecodedImage, DecodeError> {
        self.0
            .clone()
            .ok_or_else(|| DecodeError::FetchFailed(format!("unreachable: {}", source)))
    }
}
