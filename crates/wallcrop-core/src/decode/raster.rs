//! Raster decoding with EXIF orientation handling.
//!
//! Browsers apply EXIF orientation when loading an `<img>`, so crop
//! coordinates chosen in the UI refer to the upright image. Decoding here
//! does the same before any crop is taken.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode image bytes in any enabled format, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the format cannot be guessed or
/// the data fails to decode.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::CorruptedFile("empty image data".to_string()));
    }

    let orientation = get_orientation(bytes);

    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    /// Encode a small RGB test image as PNG bytes.
    pub(crate) fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let img = DecodedImage::solid(width, height, rgb);
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(&img.pixels, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    fn two_pixel_image() -> DynamicImage {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(7, 5, [1, 2, 3]);
        let img = decode_image(&bytes).unwrap();

        assert_eq!((img.width, img.height), (7, 5));
        assert_eq!(img.pixel(6, 4), [1, 2, 3]);
    }

    #[test]
    fn test_decode_jpeg() {
        let pixels = vec![200u8; 16 * 8 * 3];
        let jpeg = crate::encode::encode_jpeg(&pixels, 16, 8, 90).unwrap();
        let img = decode_image(&jpeg).unwrap();

        assert_eq!((img.width, img.height), (16, 8));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(20, 20, [9, 9, 9]);
        assert!(decode_image(&bytes[..bytes.len() / 2]).is_err());
    }

    /// A JPEG whose APP1 segment carries a little-endian EXIF Orientation tag.
    fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        let pixels = DecodedImage::solid(width, height, [90, 140, 190]).pixels;
        let jpeg = crate::encode::encode_jpeg(&pixels, width, height, 90).unwrap();

        let mut exif = b"Exif\0\0".to_vec();
        exif.extend_from_slice(b"II*\0"); // TIFF header, little endian
        exif.extend_from_slice(&8u32.to_le_bytes()); // offset of IFD0
        exif.extend_from_slice(&1u16.to_le_bytes()); // one entry
        exif.extend_from_slice(&0x0112u16.to_le_bytes()); // Orientation
        exif.extend_from_slice(&3u16.to_le_bytes()); // SHORT
        exif.extend_from_slice(&1u32.to_le_bytes()); // count
        exif.extend_from_slice(&orientation.to_le_bytes());
        exif.extend_from_slice(&[0, 0]); // value padding
        exif.extend_from_slice(&0u32.to_le_bytes()); // no next IFD

        let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
        out.extend_from_slice(&(exif.len() as u16 + 2).to_be_bytes());
        out.extend_from_slice(&exif);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_orientation_read_from_exif() {
        let bytes = jpeg_with_orientation(8, 4, 6);
        assert_eq!(get_orientation(&bytes), Orientation::Rotate90CW);

        let bytes = jpeg_with_orientation(8, 4, 3);
        assert_eq!(get_orientation(&bytes), Orientation::Rotate180);
    }

    #[test]
    fn test_decode_applies_exif_rotation() {
        let img = decode_image(&jpeg_with_orientation(8, 4, 6)).unwrap();
        assert_eq!((img.width, img.height), (4, 8));

        let img = decode_image(&jpeg_with_orientation(8, 4, 1)).unwrap();
        assert_eq!((img.width, img.height), (8, 4));
    }

    #[test]
    fn test_orientation_without_exif() {
        let bytes = png_bytes(2, 2, [0, 0, 0]);
        assert_eq!(get_orientation(&bytes), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let result = apply_orientation(two_pixel_image(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let result = apply_orientation(two_pixel_image(), Orientation::Rotate180).into_rgb8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_normal_is_identity() {
        let result = apply_orientation(two_pixel_image(), Orientation::Normal).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }
}
