//! Crop-and-transcode entry point.
//!
//! Takes an image reference and a (possibly rotated) crop region, and
//! produces a JPEG no larger than a byte budget whenever that is achievable:
//!
//! 1. Decode the source (nothing else happens if this fails)
//! 2. Allocate a surface the size of the crop, or of its rotated bounds
//! 3. Draw the crop, rotated about the surface center
//! 4. Search quality downwards, then fall back to smaller resolutions
//!
//! A budget that cannot be met is not an error: the smallest attempt is
//! returned with [`EncodedResult::met_budget`] unset.
//!
//! # Examples
//!
//! ```ignore
//! use wallcrop_core::{transcode_cropped_image, CropRegion};
//!
//! let crop = CropRegion::new(120.0, 40.0, 800.0, 800.0);
//! let result = transcode_cropped_image(data_uri, &crop, 0.0, 2 * 1024 * 1024)?;
//! upload_avatar(result.into_bytes());
//! ```

mod ladder;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decode::{DecodeError, DecodedImage, ImageDecoder, SourceDecoder};
use crate::encode::{Compressed, EncodeError, ImageJpegEncoder, JpegEncoder, QualitySearch};
use crate::surface::{CanvasBackend, RasterSurface, RenderBackend, SurfaceError};
use crate::transform::CropRegion;

/// Default byte budget: 2 MiB.
pub const DEFAULT_MAX_SIZE_BYTES: usize = 2 * 1024 * 1024;

/// Default resolution ladder, as fractions of the cropped size.
pub const DEFAULT_SCALE_FACTORS: [f64; 5] = [0.9, 0.8, 0.7, 0.6, 0.5];

/// Errors that abort a transcode.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The crop has a non-positive or non-finite size or position.
    #[error("Invalid crop region: {width}x{height} at ({x}, {y})")]
    InvalidCropRegion {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// The image source could not be loaded or decoded.
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// No drawing surface could be provided.
    #[error("Surface unavailable: {0}")]
    SurfaceUnavailable(#[from] SurfaceError),

    /// An encode attempt failed.
    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),
}

/// Transcoder settings.
///
/// Deserializes from partial objects; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranscodeOptions {
    /// Byte budget for the encoded JPEG.
    pub max_size_bytes: usize,
    /// First quality tried at each resolution, in `(0, 1]`.
    pub initial_quality: f32,
    /// Quality decrement between attempts.
    pub quality_step: f32,
    /// Lowest quality tried.
    pub quality_floor: f32,
    /// Fallback resolutions, tried in order.
    pub scale_factors: Vec<f64>,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            initial_quality: 0.95,
            quality_step: 0.1,
            quality_floor: 0.1,
            scale_factors: DEFAULT_SCALE_FACTORS.to_vec(),
        }
    }
}

impl TranscodeOptions {
    pub fn with_max_size_bytes(mut self, max_size_bytes: usize) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    pub(crate) fn quality_search(&self) -> QualitySearch {
        QualitySearch {
            initial: self.initial_quality,
            step: self.quality_step,
            floor: self.quality_floor,
        }
    }
}

/// A transcoded JPEG and how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedResult {
    /// JPEG bytes.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Encoder quality that produced `bytes`.
    pub quality: f32,
    /// Fraction of the cropped resolution, 1.0 when no downscale happened.
    pub scale: f64,
    /// False when no attempt fit and this is the smallest one made.
    pub met_budget: bool,
}

impl EncodedResult {
    fn from_compressed(compressed: Compressed, width: u32, height: u32, scale: f64) -> Self {
        Self {
            bytes: compressed.bytes,
            width,
            height,
            quality: compressed.quality,
            scale,
            met_budget: compressed.fits,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Crop, rotate and compress images under a byte budget.
///
/// Generic over its three platform collaborators so each can be replaced:
/// the decoder turning a reference into pixels, the backend providing
/// drawing surfaces, and the JPEG encoder. The transcoder holds no
/// per-call state, so one instance can serve any number of calls.
#[derive(Debug, Clone)]
pub struct Transcoder<D = SourceDecoder, B = CanvasBackend, E = ImageJpegEncoder> {
    decoder: D,
    backend: B,
    encoder: E,
    options: TranscodeOptions,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::with_parts(SourceDecoder, CanvasBackend::default(), ImageJpegEncoder)
    }
}

impl Transcoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D, B, E> Transcoder<D, B, E>
where
    D: ImageDecoder,
    B: RenderBackend,
    E: JpegEncoder,
{
    pub fn with_parts(decoder: D, backend: B, encoder: E) -> Self {
        Self {
            decoder,
            backend,
            encoder,
            options: TranscodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TranscodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TranscodeOptions {
        &self.options
    }

    /// Decode `source`, crop it, and encode under the configured budget.
    ///
    /// # Errors
    ///
    /// Fails on an invalid crop, an undecodable source, an unavailable
    /// surface, or an encoder failure. Missing the budget is not an error.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(rotation_degrees = rotation_degrees)
    )]
    pub fn transcode(
        &self,
        source: &str,
        crop: &CropRegion,
        rotation_degrees: f64,
    ) -> Result<EncodedResult, TranscodeError> {
        validate_crop(crop)?;
        debug!(max_size_bytes = self.options.max_size_bytes, "transcode requested");
        let image = self.decoder.decode(source)?;
        debug!(width = image.width, height = image.height, "decoded source");
        self.transcode_image(&image, crop, rotation_degrees)
    }

    /// Same as [`Transcoder::transcode`] for an already decoded image.
    pub fn transcode_image(
        &self,
        image: &DecodedImage,
        crop: &CropRegion,
        rotation_degrees: f64,
    ) -> Result<EncodedResult, TranscodeError> {
        validate_crop(crop)?;

        let (width, height) = crop.surface_size(rotation_degrees);
        let mut surface = self.backend.create_surface(width, height)?;
        surface.draw_crop(image, crop, rotation_degrees)?;
        debug!(
            surface_width = surface.width(),
            surface_height = surface.height(),
            "rendered crop"
        );

        ladder::fit_to_budget(&self.backend, &self.encoder, &surface, &self.options)
    }
}

fn validate_crop(crop: &CropRegion) -> Result<(), TranscodeError> {
    if crop.is_valid() {
        Ok(())
    } else {
        Err(TranscodeError::InvalidCropRegion {
            x: crop.x,
            y: crop.y,
            width: crop.width,
            height: crop.height,
        })
    }
}

/// Transcode with the default decoder, canvas and encoder.
///
/// `rotation_degrees` is usually 0 and `max_size_bytes` usually
/// [`DEFAULT_MAX_SIZE_BYTES`].
pub fn transcode_cropped_image(
    image_source: &str,
    crop: &CropRegion,
    rotation_degrees: f64,
    max_size_bytes: usize,
) -> Result<EncodedResult, TranscodeError> {
    Transcoder::new()
        .with_options(TranscodeOptions::default().with_max_size_bytes(max_size_bytes))
        .transcode(image_source, crop, rotation_degrees)
}
