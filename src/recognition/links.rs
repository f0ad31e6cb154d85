//! Primary platform link resolution.
//!
//! The engine payload can carry a platform link in several places, none of
//! them guaranteed. Each place gets its own strategy and the strategies run
//! in a fixed order; the first one producing an https URL wins and the rest
//! are skipped.
//!
//! | # | strategy      | source                                              |
//! |---|---------------|-----------------------------------------------------|
//! | 1 | hub options   | first https `hub.options[].actions[].uri`           |
//! | 2 | hub providers | providers whose `type` names the platform           |
//! | 3 | hub actions   | https `hub.actions[].uri` on the platform domain    |
//! | 4 | catalog id    | `adamid` plugged into the catalog URL template      |
//!
//! Hub entries are curated upstream and can be region specific, so they come
//! first. The catalog link always works but carries no storefront context.

use reqwest::Url;
use serde_json::Value;

use super::domain::PrimaryLink;
use super::payload::{TrackNode, action_uris};
use crate::config::PlatformConfig;

/// Payload key holding the platform catalog id.
pub const CATALOG_ID_KEY: &str = "adamid";

const SECURE_SCHEME: &str = "https://";

/// Read-only inputs shared by every strategy.
#[derive(Debug, Clone, Copy)]
pub struct LinkContext<'a> {
    pub platform: &'a PlatformConfig,
    /// Restrict `hub.options` hits to the platform domain
    pub strict_option_links: bool,
}

/// One step of the fallback chain.
#[derive(Clone, Copy)]
pub struct LinkStrategy {
    pub name: &'static str,
    pub resolve: fn(TrackNode<'_>, &LinkContext<'_>) -> Option<String>,
}

/// The fallback chain, in priority order.
pub const STRATEGIES: &[LinkStrategy] = &[
    LinkStrategy {
        name: "hub_options",
        resolve: from_hub_options,
    },
    LinkStrategy {
        name: "hub_providers",
        resolve: from_hub_providers,
    },
    LinkStrategy {
        name: "hub_actions",
        resolve: from_hub_actions,
    },
    LinkStrategy {
        name: "catalog_id",
        resolve: from_catalog_id,
    },
];

/// Run the fallback chain and read the catalog id.
pub fn resolve_primary(track: TrackNode<'_>, ctx: &LinkContext<'_>) -> PrimaryLink {
    resolve_with(STRATEGIES, track, ctx)
}

/// Run an arbitrary chain; first secure hit wins.
pub fn resolve_with(
    strategies: &[LinkStrategy],
    track: TrackNode<'_>,
    ctx: &LinkContext<'_>,
) -> PrimaryLink {
    let url = strategies.iter().find_map(|strategy| {
        let url = (strategy.resolve)(track, ctx)
            .map(|u| u.trim().to_string())
            .filter(|u| is_secure_uri(u))?;
        tracing::debug!(strategy = strategy.name, %url, "Resolved primary platform link");
        Some(url)
    });

    if url.is_none() {
        tracing::debug!(platform = %ctx.platform.name, "No primary platform link in payload");
    }

    PrimaryLink {
        url,
        id: track.id_at(&[CATALOG_ID_KEY]),
    }
}

/// True for an absolute `https://` URI that names a host.
///
/// The authority is checked on the raw text as well, since URL parsing
/// quietly collapses `https:///path` into a URI whose host is `path`.
pub fn is_secure_uri(uri: &str) -> bool {
    let uri = uri.trim();
    let Some(authority) = uri
        .get(..SECURE_SCHEME.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(SECURE_SCHEME))
        .and_then(|_| uri.get(SECURE_SCHEME.len()..))
    else {
        return false;
    };
    if authority.is_empty() || authority.starts_with(['/', '\\']) {
        return false;
    }

    Url::parse(uri).is_ok_and(|url| {
        url.scheme() == "https" && url.host_str().is_some_and(|host| !host.is_empty())
    })
}

fn first_secure_action(item: &Value) -> Option<&str> {
    action_uris(item).find(|uri| is_secure_uri(uri))
}

fn on_domain(uri: &str, domain: &str) -> bool {
    uri.to_ascii_lowercase()
        .contains(&domain.to_ascii_lowercase())
}

/// Lowercase with whitespace removed, so "Apple Music" matches "APPLEMUSIC".
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn from_hub_options(track: TrackNode<'_>, ctx: &LinkContext<'_>) -> Option<String> {
    track
        .array_at(&["hub", "options"])
        .iter()
        .find_map(|option| {
            action_uris(option).find(|uri| {
                is_secure_uri(uri)
                    && (!ctx.strict_option_links || on_domain(uri, &ctx.platform.domain))
            })
        })
        .map(str::to_string)
}

fn from_hub_providers(track: TrackNode<'_>, ctx: &LinkContext<'_>) -> Option<String> {
    let wanted = normalize_name(&ctx.platform.name);
    if wanted.is_empty() {
        return None;
    }

    track
        .array_at(&["hub", "providers"])
        .iter()
        .filter(|provider| {
            provider
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|kind| normalize_name(kind).contains(&wanted))
        })
        .find_map(first_secure_action)
        .map(str::to_string)
}

fn from_hub_actions(track: TrackNode<'_>, ctx: &LinkContext<'_>) -> Option<String> {
    track
        .array_at(&["hub", "actions"])
        .iter()
        .filter_map(|action| action.get("uri").and_then(Value::as_str))
        .find(|uri| is_secure_uri(uri) && on_domain(uri, &ctx.platform.domain))
        .map(str::to_string)
}

fn from_catalog_id(track: TrackNode<'_>, ctx: &LinkContext<'_>) -> Option<String> {
    track
        .id_at(&[CATALOG_ID_KEY])
        .map(|id| ctx.platform.catalog_url(&id))
}
