//! Quality search under a byte budget.
//!
//! The search walks quality downwards in fixed steps and stops at the first
//! encoding that fits, or at the floor. It is a linear scan, not a bisection:
//! the range is short and a fixed sequence of quality levels keeps output
//! sizes reproducible.
//!
//! Levels are tracked in hundredths so that `0.95 - 0.1 * k` never drifts.
//! The floor counts as reached once one more step would go below it, so
//! starting from 0.9 or 0.95 the search makes at most 9 attempts:
//!
//! ```text
//! 0.90 0.80 0.70 0.60 0.50 0.40 0.30 0.20 0.10
//! 0.95 0.85 0.75 0.65 0.55 0.45 0.35 0.25 0.15
//! ```

use tracing::debug;

use super::{EncodeError, JpegEncoder};
use crate::surface::RasterSurface;

/// Parameters of the downward quality scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualitySearch {
    /// First quality tried.
    pub initial: f32,
    /// Amount subtracted after each miss.
    pub step: f32,
    /// Lowest quality ever tried.
    pub floor: f32,
}

impl Default for QualitySearch {
    fn default() -> Self {
        Self {
            initial: 0.9,
            step: 0.1,
            floor: 0.1,
        }
    }
}

impl QualitySearch {
    /// Same step and floor, different starting quality.
    pub fn starting_at(self, initial: f32) -> Self {
        Self { initial, ..self }
    }

    /// Quality levels in hundredths, in the order they would be tried.
    pub fn levels(&self) -> Vec<u32> {
        let start = hundredths(self.initial).max(1);
        let step = hundredths(self.step).max(1);
        let floor = hundredths(self.floor).max(1);

        let mut levels = vec![start];
        let mut level = start;
        while level >= floor + step {
            level -= step;
            levels.push(level);
        }
        levels
    }
}

fn hundredths(value: f32) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value * 100.0).round().min(100.0) as u32
}

/// Outcome of one quality search.
#[derive(Debug, Clone, PartialEq)]
pub struct Compressed {
    pub bytes: Vec<u8>,
    /// Quality of the returned encoding.
    pub quality: f32,
    /// Whether `bytes` fits the budget.
    pub fits: bool,
    /// Number of encodes performed.
    pub attempts: u32,
}

/// Encode `surface` at the highest quality on the search ladder that fits in
/// `max_size_bytes`, or at the floor if nothing does.
///
/// # Errors
///
/// Encoder failures abort the search, including an encoder that returns no
/// bytes (`EncodeError::EmptyOutput`).
pub fn compress_to_budget<S, E>(
    encoder: &E,
    surface: &S,
    max_size_bytes: usize,
    search: &QualitySearch,
) -> Result<Compressed, EncodeError>
where
    S: RasterSurface,
    E: JpegEncoder,
{
    let levels = search.levels();
    let mut attempts = 0;
    let mut last = None;

    for level in levels {
        let quality = level as f32 / 100.0;
        let bytes = encoder.encode(surface, quality)?;
        attempts += 1;

        if bytes.is_empty() {
            return Err(EncodeError::EmptyOutput);
        }

        let fits = bytes.len() <= max_size_bytes;
        debug!(
            width = surface.width(),
            height = surface.height(),
            quality,
            size = bytes.len(),
            max_size_bytes,
            fits,
            "encode attempt"
        );

        let result = Compressed {
            bytes,
            quality,
            fits,
            attempts,
        };
        if fits {
            return Ok(result);
        }
        last = Some(result);
    }

    // levels() is never empty
    last.ok_or(EncodeError::EmptyOutput)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
