//! JPEG encoding.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder,
//! and the [`JpegEncoder`] seam the quality search encodes through.

use image::codecs::jpeg::JpegEncoder as ImageCrateJpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::surface::RasterSurface;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// The encoder reported success but produced no bytes
    #[error("JPEG encoder produced no data")]
    EmptyOutput,
}

/// Encodes a surface to JPEG at a quality in `(0, 1]`.
pub trait JpegEncoder {
    fn encode<S: RasterSurface>(&self, surface: &S, quality: f32) -> Result<Vec<u8>, EncodeError>;
}

/// [`JpegEncoder`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageJpegEncoder;

impl JpegEncoder for ImageJpegEncoder {
    fn encode<S: RasterSurface>(&self, surface: &S, quality: f32) -> Result<Vec<u8>, EncodeError> {
        encode_jpeg(
            surface.rgb_pixels(),
            surface.width(),
            surface.height(),
            quality_to_percent(quality),
        )
    }
}

/// Map a `(0, 1]` quality to the encoder's 1-100 scale.
pub fn quality_to_percent(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 1;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    ImageCrateJpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
