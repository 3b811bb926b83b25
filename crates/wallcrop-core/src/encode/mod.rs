//! JPEG encoding and the size-bounded quality search.
//!
//! This module provides functionality for:
//! - Encoding RGB pixels to JPEG with a configurable quality
//! - Searching quality downwards until an encoding fits a byte budget
//!
//! # Examples
//!
//! ```ignore
//! use wallcrop_core::encode::{compress_to_budget, ImageJpegEncoder, QualitySearch};
//!
//! let result = compress_to_budget(&ImageJpegEncoder, &canvas, 500_000, &QualitySearch::default())?;
//! println!("{} bytes at quality {}", result.bytes.len(), result.quality);
//! ```

mod budget;
mod jpeg;

pub use budget::{compress_to_budget, Compressed, QualitySearch};
pub use jpeg::{encode_jpeg, quality_to_percent, EncodeError, ImageJpegEncoder, JpegEncoder};
