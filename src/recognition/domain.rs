//! Internal domain models for recognition results.
//!
//! These types are OUR types - they don't change when the engine or the
//! link-resolution service change their responses. Upstream shapes are
//! converted into these via the payload accessors and adapters.

use std::collections::BTreeMap;

use serde::Serialize;

/// Message carried by an unmatched result.
pub const NO_MATCH_MESSAGE: &str = "No song identified";

/// Normalized, UI-ready recognition record.
///
/// Serialized as a flat camelCase object; absent fields become `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    pub title: Option<String>,
    /// Kept apart from `title` so a localized title can replace it later
    pub original_title: Option<String>,
    pub artist: Option<String>,
    pub cover_art: Option<String>,
    /// Always an absolute https URI when present
    pub primary_platform_url: Option<String>,
    pub primary_platform_id: Option<String>,
    pub secondary_platform_url: Option<String>,
    /// The recognition service's own page for the track
    pub source_url: Option<String>,
    pub error: Option<String>,
}

impl RecognitionResult {
    /// Result for a payload without a track.
    pub fn unmatched() -> Self {
        Self {
            error: Some(NO_MATCH_MESSAGE.to_string()),
            ..Default::default()
        }
    }

    pub fn is_match(&self) -> bool {
        self.error.is_none()
    }
}

/// Core metadata pulled from a matched track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub cover_art: Option<String>,
}

/// Output of the platform link resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryLink {
    pub url: Option<String>,
    pub id: Option<String>,
}

/// Input for the link-resolution service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkQuery {
    /// Look up by platform catalog identifier
    ById {
        platform: String,
        entity_type: String,
        id: String,
    },
    /// Look up by any platform URL
    ByUrl(String),
}

/// A single platform entry from the link-resolution service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformLink {
    pub url: Option<String>,
    pub entity_id: Option<String>,
}

/// Platform name -> link, as returned by the link-resolution service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinksByPlatform {
    /// Aggregated landing page covering every platform
    pub page_url: Option<String>,
    pub links: BTreeMap<String, PlatformLink>,
}

impl LinksByPlatform {
    /// Non-empty URL for a platform, if listed.
    pub fn url_for(&self, platform: &str) -> Option<&str> {
        self.links
            .get(platform)
            .and_then(|link| link.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Errors that can occur during recognition
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecognitionError {
    #[error("Uploaded audio is empty")]
    EmptyUpload,

    #[error("Fingerprint engine not available: {0}")]
    EngineUnavailable(String),

    #[error("Fingerprint engine failed: {0}")]
    EngineFailure(String),

    #[error("Engine timed out after {0} seconds")]
    EngineTimeout(u64),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Link resolution timed out")]
    Timeout,
}

impl RecognitionError {
    /// True when the fingerprint engine itself could not produce a payload.
    pub fn is_engine_failure(&self) -> bool {
        matches!(
            self,
            Self::EngineUnavailable(_) | Self::EngineFailure(_) | Self::EngineTimeout(_) | Self::Io(_)
        )
    }
}

impl From<std::io::Error> for RecognitionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
