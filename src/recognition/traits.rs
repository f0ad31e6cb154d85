//! Trait definitions for the pipeline's external collaborators.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the SongRec engine and the song.link client, while
//! tests substitute the mocks below.

use std::path::Path;

use async_trait::async_trait;

use super::domain::{LinkQuery, LinksByPlatform, RecognitionError};
use super::payload::RawMatchPayload;

/// Audio fingerprint engine.
///
/// Returns the raw match payload; a payload without a `track` object means
/// "no match". `Err` means the engine could not run at all.
#[async_trait]
pub trait FingerprintEngine: Send + Sync {
    /// Recognize a complete, already-written audio file.
    async fn recognize(&self, audio: &Path) -> Result<RawMatchPayload, RecognitionError>;
}

/// Cross-platform link-resolution service.
#[async_trait]
pub trait LinkResolutionApi: Send + Sync {
    /// Resolve an entity to its links on every known platform.
    async fn resolve(&self, query: &LinkQuery) -> Result<LinksByPlatform, RecognitionError>;
}

#[async_trait]
impl LinkResolutionApi for super::songlink::SongLinkClient {
    async fn resolve(&self, query: &LinkQuery) -> Result<LinksByPlatform, RecognitionError> {
        self.resolve(query).await
    }
}
