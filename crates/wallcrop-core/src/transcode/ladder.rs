//! Resolution fallback.
//!
//! Quality goes first: the full-resolution surface is searched from the top
//! quality down to the floor. Only if that fails are smaller copies tried,
//! each one resampled straight from the full-resolution surface so no copy
//! is a resample of a resample. The least aggressive scale that fits wins.
//! If nothing fits, the last attempt (smallest scale, lowest quality) is
//! returned with `met_budget` unset.

use tracing::{debug, warn};

use super::{EncodedResult, TranscodeError, TranscodeOptions};
use crate::encode::{compress_to_budget, JpegEncoder};
use crate::surface::{RasterSurface, RenderBackend};
use crate::transform::scaled_dimensions;

pub(crate) fn fit_to_budget<B, E>(
    backend: &B,
    encoder: &E,
    original: &B::Surface,
    options: &TranscodeOptions,
) -> Result<EncodedResult, TranscodeError>
where
    B: RenderBackend,
    E: JpegEncoder,
{
    let search = options.quality_search();
    let max_size_bytes = options.max_size_bytes;
    let (width, height) = (original.width(), original.height());

    let compressed = compress_to_budget(encoder, original, max_size_bytes, &search)?;
    let mut result = EncodedResult::from_compressed(compressed, width, height, 1.0);
    if result.met_budget {
        return Ok(result);
    }

    for &scale in &options.scale_factors {
        let (scaled_w, scaled_h) = scaled_dimensions(width, height, scale);
        debug!(scale, scaled_w, scaled_h, "quality floor missed budget, downscaling");

        let mut surface = backend.create_surface(scaled_w, scaled_h)?;
        surface.draw_surface(original)?;

        let compressed = compress_to_budget(encoder, &surface, max_size_bytes, &search)?;
        result = EncodedResult::from_compressed(compressed, scaled_w, scaled_h, scale);
        if result.met_budget {
            return Ok(result);
        }
    }

    warn!(
        max_size_bytes,
        size = result.len(),
        width = result.width,
        height = result.height,
        quality = result.quality,
        "budget unreachable, returning smallest attempt"
    );
    Ok(result)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::surface::CanvasBackend;
    use crate::testing::{proportional_size, SizedEncoder};
    use proptest::prelude::*;

    proptest! {
        /// Property: a met budget is really met, a missed one ends at the smallest scale.
        #[test]
        fn prop_budget_or_smallest(
            width in 1u32..=64,
            height in 1u32..=64,
            max_size_bytes in 0usize..5_000,
        ) {
            let backend = CanvasBackend::new();
            let surface = backend.create_surface(width, height).unwrap();
            let encoder = SizedEncoder::new(proportional_size);
            let options = TranscodeOptions {
                max_size_bytes,
                ..TranscodeOptions::default()
            };

            let result = fit_to_budget(&backend, &encoder, &surface, &options).unwrap();
            if result.met_budget {
                prop_assert!(result.len() <= max_size_bytes);
            } else {
                prop_assert_eq!(
                    (result.width, result.height),
                    scaled_dimensions(width, height, 0.5)
                );
            }
        }

        /// Property: resizing only happens when full resolution misses at the floor.
        #[test]
        fn prop_quality_before_resolution(
            width in 1u32..=64,
            height in 1u32..=64,
            max_size_bytes in 0usize..5_000,
        ) {
            let backend = CanvasBackend::new();
            let surface = backend.create_surface(width, height).unwrap();
            let encoder = SizedEncoder::new(proportional_size);
            let options = TranscodeOptions {
                max_size_bytes,
                ..TranscodeOptions::default()
            };

            let result = fit_to_budget(&backend, &encoder, &surface, &options).unwrap();
            let fits_at_floor = proportional_size(width, height, 0.15) <= max_size_bytes;
            if fits_at_floor {
                prop_assert_eq!((result.width, result.height), (width, height));
            }
        }
    }
}
