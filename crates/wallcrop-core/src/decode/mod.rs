//! Image decoding for the transcoder.
//!
//! This module provides functionality for:
//! - Resolving image references (data URIs, local files, optional HTTP URLs)
//! - Decoding JPEG, PNG and WebP bytes to RGB with EXIF orientation applied
//! - The [`ImageDecoder`] seam used by the transcoder
//!
//! # Examples
//!
//! ```ignore
//! use wallcrop_core::decode::{ImageDecoder, SourceDecoder};
//!
//! let image = SourceDecoder.decode("data:image/png;base64,iVBORw0...").unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod raster;
mod source;
mod types;

pub use raster::{decode_image, get_orientation};
pub use source::{ImageDecoder, ImageSource, SourceDecoder};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
