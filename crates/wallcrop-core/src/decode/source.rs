//! Image source resolution.
//!
//! An image reference arrives as a string: a `data:` URI produced by a file
//! picker, a `file://` URL or bare path, or an `http(s)://` URL pointing at
//! an already-uploaded wallpaper. Remote fetching needs the `http` feature.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{decode_image, DecodeError, DecodedImage};

/// Decodes an image reference into pixels.
///
/// The transcoder only talks to this trait, so tests can substitute a fake
/// and hosts can plug in their own loader.
pub trait ImageDecoder {
    fn decode(&self, source: &str) -> Result<DecodedImage, DecodeError>;
}

/// A parsed image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Inline bytes from a `data:` URI.
    Inline { mime: String, bytes: Vec<u8> },
    /// A local file.
    File(PathBuf),
    /// An `http://` or `https://` URL.
    Remote(String),
}

impl ImageSource {
    /// Parse an image reference string.
    ///
    /// # Errors
    ///
    /// `InvalidSource` for empty strings and malformed data URIs,
    /// `UnsupportedSource` for non-base64 data URIs and unknown URL schemes.
    pub fn parse(source: &str) -> Result<Self, DecodeError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(DecodeError::InvalidSource("empty source".to_string()));
        }

        if let Some(rest) = strip_prefix_ignore_case(source, "data:") {
            return parse_data_uri(rest);
        }
        if let Some(path) = strip_prefix_ignore_case(source, "file://") {
            return Ok(ImageSource::File(PathBuf::from(path)));
        }
        if strip_prefix_ignore_case(source, "http://").is_some()
            || strip_prefix_ignore_case(source, "https://").is_some()
        {
            return Ok(ImageSource::Remote(source.to_string()));
        }

        // Anything else with a scheme is something we cannot load.
        if let Some((scheme, _)) = source.split_once("://") {
            return Err(DecodeError::UnsupportedSource(format!("{}://", scheme)));
        }

        Ok(ImageSource::File(PathBuf::from(source)))
    }

    /// Load the raw encoded bytes this source refers to.
    pub fn load(self) -> Result<Vec<u8>, DecodeError> {
        match self {
            ImageSource::Inline { bytes, .. } => Ok(bytes),
            ImageSource::File(path) => std::fs::read(&path)
                .map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e))),
            ImageSource::Remote(url) => fetch_remote(&url),
        }
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Parse the part of a data URI after `data:`.
fn parse_data_uri(rest: &str) -> Result<ImageSource, DecodeError> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidSource("data URI has no payload".to_string()))?;

    let mut params = meta.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    if !is_base64 {
        return Err(DecodeError::UnsupportedSource(
            "data URI without base64 encoding".to_string(),
        ));
    }

    // Copy-pasted URIs sometimes carry line breaks.
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| DecodeError::InvalidSource(format!("bad base64 payload: {}", e)))?;

    Ok(ImageSource::Inline { mime, bytes })
}

#[cfg(feature = "http")]
fn fetch_remote(url: &str) -> Result<Vec<u8>, DecodeError> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| DecodeError::FetchFailed(e.to_string()))?;
    let bytes = response
        .bytes()
        .map_err(|e| DecodeError::FetchFailed(e.to_string()))?;
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "http"))]
fn fetch_remote(url: &str) -> Result<Vec<u8>, DecodeError> {
    Err(DecodeError::UnsupportedSource(format!(
        "{} (built without the `http` feature)",
        url
    )))
}

/// Default decoder: resolves the source, then decodes with EXIF orientation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceDecoder;

impl ImageDecoder for SourceDecoder {
    fn decode(&self, source: &str) -> Result<DecodedImage, DecodeError> {
        let bytes = ImageSource::parse(source)?.load()?;
        decode_image(&bytes)
    }
}
