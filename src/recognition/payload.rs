//! Defensive accessors over the engine's raw match payload.
//!
//! The engine response has no schema we can rely on across versions, so it
//! is kept as a `serde_json::Value` tree and every read goes through these
//! helpers. A missing key, a wrong type or an empty string all come back as
//! `None` (or an empty slice); nothing here can fail.

use serde_json::Value;

/// Raw engine output for one recognition request.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatchPayload(Value);

impl RawMatchPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse engine output text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self)
    }

    /// The matched track, if the engine found one.
    pub fn track(&self) -> Option<TrackNode<'_>> {
        self.0
            .get("track")
            .filter(|t| t.is_object())
            .map(TrackNode)
    }
}

/// Borrowed view of `payload.track`.
#[derive(Debug, Clone, Copy)]
pub struct TrackNode<'a>(&'a Value);

impl<'a> TrackNode<'a> {
    /// Non-empty string at `path` below the track.
    pub fn str_at(&self, path: &[&str]) -> Option<&'a str> {
        non_empty_str(node_at(self.0, path)?)
    }

    /// Array at `path` below the track; empty when absent or not an array.
    pub fn array_at(&self, path: &[&str]) -> &'a [Value] {
        array_of(node_at(self.0, path))
    }

    /// Identifier at `path`, accepting either a string or an integer.
    pub fn id_at(&self, path: &[&str]) -> Option<String> {
        match node_at(self.0, path)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Walk object keys, returning `None` at the first missing step.
pub fn node_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(*key))
}

/// Non-empty string value of a node.
pub fn non_empty_str(node: &Value) -> Option<&str> {
    node.as_str().filter(|s| !s.trim().is_empty())
}

/// Array items of a node, or nothing.
pub fn array_of(node: Option<&Value>) -> &[Value] {
    node.and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// `uri` strings of every item in an `actions` array.
pub fn action_uris(item: &Value) -> impl Iterator<Item = &str> {
    array_of(item.get("actions"))
        .iter()
        .filter_map(|action| action.get("uri").and_then(non_empty_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_track_is_none() {
        assert!(RawMatchPayload::new(json!({"matches": []})).track().is_none());
        assert!(RawMatchPayload::new(json!(null)).track().is_none());
        assert!(RawMatchPayload::new(json!([1, 2])).track().is_none());
    }

    #[test]
    fn test_non_object_track_is_none() {
        assert!(RawMatchPayload::new(json!({"track": "oops"})).track().is_none());
        assert!(RawMatchPayload::new(json!({"track": null})).track().is_none());
    }

    #[test]
    fn test_str_at_rejects_wrong_types_and_empty() {
        let payload = RawMatchPayload::new(json!({
            "track": {"title": 42, "subtitle": "", "images": {"coverart": "u"}}
        }));
        let track = payload.track().unwrap();
        assert_eq!(track.str_at(&["title"]), None);
        assert_eq!(track.str_at(&["subtitle"]), None);
        assert_eq!(track.str_at(&["images", "coverart"]), Some("u"));
        assert_eq!(track.str_at(&["images", "coverarthq"]), None);
        assert_eq!(track.str_at(&["images", "coverart", "deeper"]), None);
    }

    #[test]
    fn test_array_at_tolerates_wrong_shape() {
        let payload = RawMatchPayload::new(json!({
            "track": {"hub": {"options": {"not": "a list"}, "actions": [1, 2]}}
        }));
        let track = payload.track().unwrap();
        assert!(track.array_at(&["hub", "options"]).is_empty());
        assert_eq!(track.array_at(&["hub", "actions"]).len(), 2);
        assert!(track.array_at(&["hub", "providers"]).is_empty());
    }

    #[test]
    fn test_id_at_accepts_string_and_integer() {
        let payload = RawMatchPayload::new(json!({"track": {"a": "123", "b": 456, "c": 1.5, "d": " "}}));
        let track = payload.track().unwrap();
        assert_eq!(track.id_at(&["a"]).as_deref(), Some("123"));
        assert_eq!(track.id_at(&["b"]).as_deref(), Some("456"));
        assert_eq!(track.id_at(&["c"]), None);
        assert_eq!(track.id_at(&["d"]), None);
    }

    #[test]
    fn test_action_uris_skips_malformed_actions() {
        let item = json!({"actions": [{"uri": ""}, {"name": "x"}, "junk", {"uri": "https://a"}]});
        let uris: Vec<_> = action_uris(&item).collect();
        assert_eq!(uris, vec!["https://a"]);
    }
}
