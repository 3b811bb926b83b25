//! Wallcrop Core - size-bounded image transcoding
//!
//! This crate turns a user-chosen crop of an image (optionally rotated) into
//! a JPEG that fits an upload budget, as used for profile pictures and
//! wallpaper previews. Quality is reduced before resolution, and an
//! unreachable budget yields the smallest attempt rather than an error.
//!
//! # Module Structure
//!
//! - `decode` - Image source resolution and decoding
//! - `transform` - Rotated bounds, rotated crops, resampling
//! - `surface` - Drawing surfaces and their backend
//! - `encode` - JPEG encoding and the quality search
//! - `transcode` - The crop-and-transcode entry point

pub mod decode;
pub mod encode;
pub mod surface;
pub mod transcode;
pub mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use decode::{DecodeError, DecodedImage, ImageDecoder, SourceDecoder};
pub use encode::{EncodeError, ImageJpegEncoder, JpegEncoder};
pub use surface::{Canvas, CanvasBackend, RasterSurface, RenderBackend, SurfaceError};
pub use transcode::{
    transcode_cropped_image, EncodedResult, TranscodeError, TranscodeOptions, Transcoder,
    DEFAULT_MAX_SIZE_BYTES,
};
pub use transform::{rotated_bounds, CropRegion, RotatedBounds};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcoder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Transcoder>();
    }

    #[test]
    fn test_default_budget_is_two_mebibytes() {
        assert_eq!(DEFAULT_MAX_SIZE_BYTES, 2_097_152);
        assert_eq!(
            Transcoder::new().options().max_size_bytes,
            DEFAULT_MAX_SIZE_BYTES
        );
    }
}
