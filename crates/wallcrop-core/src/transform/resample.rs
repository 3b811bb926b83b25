//! Whole-image resampling for the resolution fallback.

use crate::decode::{DecodedImage, FilterType};

/// Resample an image to exact dimensions.
///
/// Returns `None` if either target dimension is zero or the pixel buffer
/// does not match the image's declared size.
pub fn resample(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Option<DecodedImage> {
    if width == 0 || height == 0 {
        return None;
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Some(image.clone());
    }

    let rgb_image = image.to_rgb_image()?;
    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Some(DecodedImage::from_rgb_image(resized))
}

/// Scale both dimensions by `factor`, flooring to whole pixels.
///
/// Each side is kept at least one pixel so tiny crops still encode.
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let scale = |v: u32| ((v as f64 * factor).floor() as u32).max(1);
    (scale(width), scale(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resample_downscale() {
        let img = create_test_image(100, 50);
        let out = resample(&img, 50, 25, FilterType::Lanczos3).unwrap();

        assert_eq!((out.width, out.height), (50, 25));
        assert_eq!(out.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resample_same_dimensions() {
        let img = create_test_image(30, 20);
        let out = resample(&img, 30, 20, FilterType::Bilinear).unwrap();
        assert_eq!(out.pixels, img.pixels);
    }

    #[test]
    fn test_resample_zero_dimensions() {
        let img = create_test_image(10, 10);
        assert!(resample(&img, 0, 5, FilterType::Bilinear).is_none());
        assert!(resample(&img, 5, 0, FilterType::Bilinear).is_none());
    }

    #[test]
    fn test_resample_mismatched_buffer() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0; 12],
        };
        assert!(resample(&img, 5, 5, FilterType::Nearest).is_none());
    }

    #[test]
    fn test_resample_solid_colour_stays_solid() {
        let img = DecodedImage::solid(64, 64, [30, 60, 90]);
        let out = resample(&img, 32, 32, FilterType::Lanczos3).unwrap();
        let expected = [30i16, 60, 90];
        for p in out.pixels.chunks(3) {
            for (got, want) in p.iter().zip(expected) {
                assert!((*got as i16 - want).abs() <= 1, "{:?}", p);
            }
        }
    }

    #[test]
    fn test_scaled_dimensions_floor() {
        assert_eq!(scaled_dimensions(1000, 1000, 0.9), (900, 900));
        assert_eq!(scaled_dimensions(333, 101, 0.5), (166, 50));
        assert_eq!(scaled_dimensions(999, 10, 0.7), (699, 7));
    }

    #[test]
    fn test_scaled_dimensions_minimum_one() {
        assert_eq!(scaled_dimensions(1, 1, 0.5), (1, 1));
        assert_eq!(scaled_dimensions(100, 1, 0.6), (60, 1));
    }
}
