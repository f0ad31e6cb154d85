//! Secondary platform link via the link-resolution service.
//!
//! This step is optional enrichment. Whatever goes wrong (no input, timeout,
//! transport error, bad status, bad body, platform missing from the answer)
//! the caller only ever sees `None`.

use super::domain::{LinkQuery, PrimaryLink};
use super::traits::LinkResolutionApi;
use crate::config::{LinkServiceConfig, PlatformConfig};

/// Build the service query: catalog id first, primary URL second.
pub fn build_query(primary: &PrimaryLink, platform: &PlatformConfig) -> Option<LinkQuery> {
    if let Some(id) = &primary.id {
        return Some(LinkQuery::ById {
            platform: platform.service_platform.clone(),
            entity_type: platform.service_entity_type.clone(),
            id: id.clone(),
        });
    }
    primary.url.clone().map(LinkQuery::ByUrl)
}

/// Resolve the secondary platform URL, best effort.
pub async fn resolve_secondary(
    api: &dyn LinkResolutionApi,
    primary: &PrimaryLink,
    platform: &PlatformConfig,
    links: &LinkServiceConfig,
) -> Option<String> {
    let query = build_query(primary, platform)?;

    let response = match tokio::time::timeout(links.timeout(), api.resolve(&query)).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            tracing::warn!(?query, "Link resolution failed: {}", e);
            return None;
        }
        Err(_) => {
            tracing::warn!(?query, timeout_ms = links.timeout_ms, "Link resolution timed out");
            return None;
        }
    };

    let url = response.url_for(&links.secondary_platform).map(str::to_string);
    if url.is_none() {
        tracing::debug!(
            platform = %links.secondary_platform,
            "Link service returned no entry for secondary platform"
        );
    }
    url
}
