//! song.link (Odesli) API Data Transfer Objects
//!
//! These types match what the links endpoint returns.
//! DO NOT use these types outside the songlink module - convert to domain types.
//!
//! API Reference: https://linktree.notion.site/API-d0ebe08a5e304a55928405eb682f6741
//!
//! Example response (trimmed):
//! ```json
//! {
//!   "entityUniqueId": "ITUNES_SONG::1443109064",
//!   "userCountry": "US",
//!   "pageUrl": "https://song.link/us/i/1443109064",
//!   "linksByPlatform": {
//!     "appleMusic": {"url": "https://geo.music.apple.com/...", "entityUniqueId": "ITUNES_SONG::1443109064"},
//!     "spotify": {"url": "https://open.spotify.com/track/4Km5HrUvYTaSUfiSGPJeQR", "entityUniqueId": "SPOTIFY_SONG::4Km5..."}
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level links response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinksResponse {
    pub entity_unique_id: Option<String>,
    pub user_country: Option<String>,
    pub page_url: Option<String>,
    #[serde(default)]
    pub links_by_platform: BTreeMap<String, PlatformEntry>,
}

/// One platform's entry in `linksByPlatform`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformEntry {
    pub url: Option<String>,
    pub entity_unique_id: Option<String>,
    pub country: Option<String>,
    pub native_app_uri_mobile: Option<String>,
    pub native_app_uri_desktop: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    pub code: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
