//! Result assembly: raw engine payload in, `RecognitionResult` out.
//!
//! ```text
//! payload ─┬─ no track ──────────────────────────────> Unmatched {error}
//!          └─ track ─> extract ─> primary link ─> secondary link ─> Matched
//! ```
//!
//! Nothing in here returns an error. Missing payload fields degrade to absent
//! result fields and the secondary lookup degrades to `None`.

use std::sync::Arc;

use super::cross_platform::resolve_secondary;
use super::domain::RecognitionResult;
use super::extractor::extract_metadata;
use super::links::{LinkContext, resolve_primary};
use super::payload::{RawMatchPayload, TrackNode};
use super::traits::LinkResolutionApi;
use crate::config::Config;

/// Terminal states of one pipeline run.
#[derive(Debug, Clone, Copy)]
pub enum MatchState<'a> {
    Matched(TrackNode<'a>),
    Unmatched,
}

impl<'a> MatchState<'a> {
    pub fn classify(payload: &'a RawMatchPayload) -> Self {
        payload.track().map_or(Self::Unmatched, Self::Matched)
    }
}

/// Assembles recognition results. Cheap to clone; shared across requests.
#[derive(Clone)]
pub struct Pipeline {
    config: Arc<Config>,
    links: Arc<dyn LinkResolutionApi>,
}

impl Pipeline {
    pub fn new(config: Arc<Config>, links: Arc<dyn LinkResolutionApi>) -> Self {
        Self { config, links }
    }

    /// Turn an engine payload into a result.
    pub async fn assemble(&self, payload: &RawMatchPayload) -> RecognitionResult {
        let track = match MatchState::classify(payload) {
            MatchState::Matched(track) => track,
            MatchState::Unmatched => {
                tracing::info!("Engine returned no track");
                return RecognitionResult::unmatched();
            }
        };

        let options = &self.config.pipeline;
        let metadata = extract_metadata(track);

        let ctx = LinkContext {
            platform: &self.config.platform,
            strict_option_links: options.strict_option_links,
        };
        let primary = resolve_primary(track, &ctx);

        let secondary = if options.resolve_secondary {
            resolve_secondary(
                self.links.as_ref(),
                &primary,
                &self.config.platform,
                &self.config.links,
            )
            .await
        } else {
            None
        };

        tracing::info!(
            title = %metadata.title,
            artist = %metadata.artist,
            primary = primary.url.is_some(),
            secondary = secondary.is_some(),
            "Assembled recognition result"
        );

        RecognitionResult {
            original_title: Some(metadata.title.clone()),
            title: Some(metadata.title),
            artist: Some(metadata.artist),
            cover_art: metadata.cover_art.filter(|_| options.cover_art),
            primary_platform_url: primary.url,
            primary_platform_id: primary.id,
            secondary_platform_url: secondary,
            source_url: track.str_at(&["url"]).map(str::to_string),
            error: None,
        }
    }
}
