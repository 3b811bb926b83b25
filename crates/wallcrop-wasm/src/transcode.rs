//! WASM bindings for the crop-and-transcode pipeline.
//!
//! # Functions
//!
//! - [`transcode_cropped_image`] - Transcode from a data URI
//! - [`transcode_bytes`] - Transcode from raw file bytes
//! - [`transcode_with_options`] - Transcode with a crop object and options object
//!
//! # Example
//!
//! ```typescript
//! import { transcode_bytes } from '@wallcrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = transcode_bytes(bytes, crop.x, crop.y, crop.width, crop.height, rotation, 2 * 1024 * 1024);
//! const blob = new Blob([result.bytes()], { type: 'image/jpeg' });
//! ```
//!
//! The calls are synchronous; run them in a Web Worker to keep the UI
//! responsive and wrap the result in a Promise there.

use serde::Deserialize;
use wallcrop_core::decode::decode_image;
use wallcrop_core::{CropRegion, EncodedResult, TranscodeError, TranscodeOptions, Transcoder};
use wasm_bindgen::prelude::*;

use crate::types::JsEncodedResult;

/// Transcode a crop of an image given as a data URI.
///
/// # Arguments
///
/// * `image_source` - `data:image/...;base64,...` URI
/// * `x`, `y`, `width`, `height` - Crop rectangle in source pixels
/// * `rotation_degrees` - Clockwise rotation about the crop center (0 for none)
/// * `max_size_bytes` - Budget for the JPEG (2097152 is the usual value)
///
/// # Errors
///
/// Returns an error string if the crop is invalid, the source cannot be
/// decoded, or encoding fails. An unreachable budget is not an error: check
/// `metBudget` on the result.
#[wasm_bindgen]
pub fn transcode_cropped_image(
    image_source: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rotation_degrees: f64,
    max_size_bytes: u32,
) -> Result<JsEncodedResult, JsValue> {
    let crop = CropRegion::new(x, y, width, height);
    let result = wallcrop_core::transcode_cropped_image(
        image_source,
        &crop,
        rotation_degrees,
        max_size_bytes as usize,
    );
    finish(result)
}

/// Transcode a crop of an image given as encoded file bytes.
///
/// Same arguments as [`transcode_cropped_image`], with the file contents in
/// place of the URI.
#[wasm_bindgen]
pub fn transcode_bytes(
    bytes: &[u8],
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rotation_degrees: f64,
    max_size_bytes: u32,
) -> Result<JsEncodedResult, JsValue> {
    let options = TranscodeOptions::default().with_max_size_bytes(max_size_bytes as usize);
    let crop = CropRegion::new(x, y, width, height);
    finish(transcode_decoded(bytes, &crop, rotation_degrees, options))
}

/// Transcode with plain JS objects for the crop and the options.
///
/// # Arguments
///
/// * `image_source` - data URI
/// * `crop` - `{ x, y, width, height }`
/// * `rotation_degrees` - Clockwise rotation about the crop center
/// * `options` - Partial `{ maxSizeBytes, initialQuality, qualityStep, qualityFloor, scaleFactors }`,
///   or `undefined` for defaults
#[wasm_bindgen]
pub fn transcode_with_options(
    image_source: &str,
    crop: JsValue,
    rotation_degrees: f64,
    options: JsValue,
) -> Result<JsEncodedResult, JsValue> {
    let crop: CropRegion = serde_wasm_bindgen::from_value(crop)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop region: {}", e)))?;
    let options = parse_options(options)?;

    let result = Transcoder::new()
        .with_options(options)
        .transcode(image_source, &crop, rotation_degrees);
    finish(result)
}

/// Options object as sent from JavaScript; absent means defaults.
#[derive(Deserialize)]
#[serde(transparent)]
struct OptionsJs(Option<TranscodeOptions>);

fn parse_options(options: JsValue) -> Result<TranscodeOptions, JsValue> {
    let OptionsJs(options) = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?;
    Ok(options.unwrap_or_default())
}

fn transcode_decoded(
    bytes: &[u8],
    crop: &CropRegion,
    rotation_degrees: f64,
    options: TranscodeOptions,
) -> Result<EncodedResult, TranscodeError> {
    let image = decode_image(bytes)?;
    Transcoder::new()
        .with_options(options)
        .transcode_image(&image, crop, rotation_degrees)
}

fn finish(result: Result<EncodedResult, TranscodeError>) -> Result<JsEncodedResult, JsValue> {
    let result = result.map_err(|e| JsValue::from_str(&e.to_string()))?;
    if !result.met_budget {
        warn_budget_missed(&result);
    }
    Ok(result.into())
}

#[cfg(target_arch = "wasm32")]
fn warn_budget_missed(result: &EncodedResult) {
    web_sys::console::warn_1(&JsValue::from_str(&format!(
        "wallcrop: budget not met, returning {} bytes at {}x{} (quality {:.2})",
        result.len(),
        result.width,
        result.height,
        result.quality
    )));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn_budget_missed(_result: &EncodedResult) {}
