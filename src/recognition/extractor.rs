//! Title, artist and cover art from a matched track.

use super::domain::TrackMetadata;
use super::payload::TrackNode;

/// Cover art keys, best quality first.
const COVER_ART_KEYS: &[&str] = &["coverarthq", "coverart"];

/// Pull core metadata out of `payload.track`.
///
/// Title and artist fall back to empty strings; cover art is `None` when
/// neither image variant is present.
pub fn extract_metadata(track: TrackNode<'_>) -> TrackMetadata {
    TrackMetadata {
        title: track.str_at(&["title"]).unwrap_or_default().to_string(),
        artist: track.str_at(&["subtitle"]).unwrap_or_default().to_string(),
        cover_art: cover_art(track),
    }
}

fn cover_art(track: TrackNode<'_>) -> Option<String> {
    COVER_ART_KEYS
        .iter()
        .find_map(|key| track.str_at(&["images", *key]))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::payload::RawMatchPayload;
    use serde_json::json;

    fn extract(value: serde_json::Value) -> TrackMetadata {
        let payload = RawMatchPayload::new(value);
        extract_metadata(payload.track().expect("fixture has a track"))
    }

    #[test]
    fn test_title_and_artist() {
        let meta = extract(json!({"track": {"title": "X", "subtitle": "Y"}}));
        assert_eq!(meta.title, "X");
        assert_eq!(meta.artist, "Y");
        assert_eq!(meta.cover_art, None);
    }

    #[test]
    fn test_missing_title_and_artist_default_to_empty() {
        let meta = extract(json!({"track": {}}));
        assert_eq!(meta.title, "");
        assert_eq!(meta.artist, "");
    }

    #[test]
    fn test_prefers_high_quality_cover_art() {
        let meta = extract(json!({"track": {"images": {
            "coverart": "https://img/lo.jpg",
            "coverarthq": "https://img/hq.jpg"
        }}}));
        assert_eq!(meta.cover_art.as_deref(), Some("https://img/hq.jpg"));
    }

    #[test]
    fn test_falls_back_to_regular_cover_art() {
        let meta = extract(json!({"track": {"images": {"coverart": "https://img/lo.jpg"}}}));
        assert_eq!(meta.cover_art.as_deref(), Some("https://img/lo.jpg"));
    }

    #[test]
    fn test_empty_hq_cover_art_is_skipped() {
        let meta = extract(json!({"track": {"images": {"coverarthq": "", "coverart": "lo"}}}));
        assert_eq!(meta.cover_art.as_deref(), Some("lo"));
    }

    #[test]
    fn test_malformed_images_yield_no_cover_art() {
        let meta = extract(json!({"track": {"images": ["coverart"]}}));
        assert_eq!(meta.cover_art, None);
    }
}
