//! Test fixtures shared across modules.
//!
//! Engine payloads are trimmed copies of real recognizer responses, reduced
//! to the fields the pipeline reads plus some noise it must ignore.

use serde_json::{Value, json};

/// Minimal matched payload with a catalog id and an empty hub.
pub fn end_to_end_payload() -> Value {
    json!({
        "track": {
            "title": "Song",
            "subtitle": "Artist",
            "adamid": "12345",
            "images": {"coverart": "http://x/art.jpg"},
            "hub": {"options": []},
            "url": "http://engine/track/1"
        }
    })
}

/// Matched payload whose only link lives in `hub.options`.
pub fn hub_payload() -> Value {
    json!({
        "matches": [{"id": "2", "offset": 12.5}],
        "track": {
            "key": "55",
            "title": "Hub Song",
            "subtitle": "Hub Artist",
            "images": {
                "background": "https://img/bg.jpg",
                "coverart": "https://img/400.jpg",
                "coverarthq": "https://img/800.jpg"
            },
            "hub": {
                "type": "APPLEMUSIC",
                "actions": [
                    {"name": "apple", "type": "applemusicplay", "id": "2"},
                    {"name": "apple", "type": "uri", "uri": "https://audio-ssl.itunes.apple.com/preview.m4a"}
                ],
                "options": [
                    {"caption": "OPEN", "actions": [
                        {"name": "hub:applemusic:deeplink", "type": "applemusicopen", "uri": "https://music.apple.com/gb/album/song/1?i=2"},
                        {"name": "hub:applemusic:deeplink", "type": "uri", "uri": "https://music.apple.com/gb/album/other"}
                    ]}
                ],
                "providers": [
                    {"type": "SPOTIFY", "actions": [{"name": "hub:spotify:searchdeeplink", "type": "uri", "uri": "spotify:search:Hub%20Song"}]}
                ]
            },
            "url": "https://www.shazam.com/track/55/hub-song"
        }
    })
}
