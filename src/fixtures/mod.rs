//! Recorded `generateContent` payloads for tests.
//!
//! The common payloads are embedded as constants; anything else under
//! `src/fixtures/` can be loaded by relative path.

use std::path::PathBuf;
use serde::de::DeserializeOwned;
use crate::error::{ConfigurationError, RadarError};

/// A successful report analysis with usage metadata.
pub const ANALYSIS_RESPONSE: &str = include_str!("content/analysis_response.json");

/// A well-formed response whose candidate has no parts.
pub const EMPTY_RESPONSE: &str = include_str!("content/empty_response.json");

/// An image edit returning text followed by a PNG.
pub const IMAGE_RESPONSE: &str = include_str!("content/image_response.json");

/// An image edit that answered with text only.
pub const TEXT_ONLY_IMAGE_RESPONSE: &str = include_str!("content/text_only_image_response.json");

/// A 429 error body mentioning quota.
pub const RATE_LIMITED_ERROR: &str = include_str!("errors/rate_limited.json");

/// A 503 error body for an overloaded model.
pub const OVERLOADED_ERROR: &str = include_str!("errors/overloaded.json");

/// Get the path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("fixtures")
        .join(relative_path)
}

/// Load a JSON fixture from disk and deserialize it.
pub fn load_json_fixture<T: DeserializeOwned>(relative_path: &str) -> Result<T, RadarError> {
    let content = std::fs::read_to_string(fixture_path(relative_path)).map_err(|e| {
        ConfigurationError::InvalidConfiguration {
            message: format!("failed to load fixture {relative_path}: {e}"),
        }
    })?;
    Ok(serde_json::from_str(&content)?)
}
