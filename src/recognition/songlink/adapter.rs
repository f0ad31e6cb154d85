//! Adapter layer: Convert song.link DTOs to domain models

use super::dto;
use crate::recognition::domain::{LinksByPlatform, PlatformLink};

/// Convert a links response into the domain map.
pub fn to_links(response: dto::LinksResponse) -> LinksByPlatform {
    LinksByPlatform {
        page_url: response.page_url.filter(|u| !u.is_empty()),
        links: response
            .links_by_platform
            .into_iter()
            .map(|(platform, entry)| {
                (
                    platform,
                    PlatformLink {
                        url: entry.url.filter(|u| !u.is_empty()),
                        entity_id: entry.entity_unique_id,
                    },
                )
            })
            .collect(),
    }
}
