//! Recognition service - runs the engine, then the assembly pipeline
//!
//! This is the high-level API for recognizing a clip:
//! 1. Materialize the audio on disk (uploads only)
//! 2. Run the fingerprint engine (failure aborts the request)
//! 3. Assemble the result (never fails)

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use super::domain::{RecognitionError, RecognitionResult};
use super::engine::SongRecEngine;
use super::payload::RawMatchPayload;
use super::pipeline::Pipeline;
use super::songlink::SongLinkClient;
use super::traits::{FingerprintEngine, LinkResolutionApi};
use crate::config::Config;

/// Suffix used when an upload carries no usable file extension.
pub const DEFAULT_UPLOAD_SUFFIX: &str = ".webm";

/// Service for recognizing audio clips
#[derive(Clone)]
pub struct RecognitionService {
    engine: Arc<dyn FingerprintEngine>,
    pipeline: Pipeline,
}

impl RecognitionService {
    /// Build the service with the SongRec engine and the song.link client.
    pub fn new(config: Arc<Config>) -> Result<Self, RecognitionError> {
        let engine = Arc::new(SongRecEngine::new(&config.engine)?);
        let links = Arc::new(SongLinkClient::new(&config.links)?);
        Ok(Self::with_collaborators(config, engine, links))
    }

    /// Build the service with explicit collaborators.
    pub fn with_collaborators(
        config: Arc<Config>,
        engine: Arc<dyn FingerprintEngine>,
        links: Arc<dyn LinkResolutionApi>,
    ) -> Self {
        Self {
            engine,
            pipeline: Pipeline::new(config, links),
        }
    }

    /// Recognize an audio file already on disk.
    pub async fn recognize_file(&self, path: &Path) -> Result<RecognitionResult, RecognitionError> {
        let payload = self.engine.recognize(path).await?;
        Ok(self.assemble(&payload).await)
    }

    /// Recognize uploaded audio bytes.
    ///
    /// The bytes go to a temporary file named with the upload's extension
    /// (recognizers sniff the container from it). The file is removed when
    /// this future completes or is dropped.
    pub async fn recognize_upload(
        &self,
        bytes: &[u8],
        filename: Option<&str>,
    ) -> Result<RecognitionResult, RecognitionError> {
        if bytes.is_empty() {
            return Err(RecognitionError::EmptyUpload);
        }

        let suffix = upload_suffix(filename);
        let mut temp = tempfile::Builder::new()
            .prefix("soundmark-")
            .suffix(&suffix)
            .tempfile()?;
        temp.write_all(bytes)?;
        temp.flush()?;

        tracing::debug!(path = ?temp.path(), size = bytes.len(), "Materialized upload");
        self.recognize_file(temp.path()).await
    }

    /// Run the assembly pipeline on an existing payload.
    pub async fn assemble(&self, payload: &RawMatchPayload) -> RecognitionResult {
        self.pipeline.assemble(payload).await
    }
}

/// File suffix (with dot) for an upload name.
pub fn upload_suffix(filename: Option<&str>) -> String {
    filename
        .map(Path::new)
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| DEFAULT_UPLOAD_SUFFIX.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::traits::mocks::{MockEngine, MockLinks};
    use crate::test_utils;
    use serde_json::json;

    fn service(engine: MockEngine) -> (RecognitionService, Arc<MockEngine>) {
        let engine = Arc::new(engine);
        let service = RecognitionService::with_collaborators(
            Arc::new(Config::default()),
            engine.clone(),
            Arc::new(MockLinks::with_link("spotify", "https://open.spotify.com/track/abc")),
        );
        (service, engine)
    }

    #[test]
    fn test_upload_suffix() {
        assert_eq!(upload_suffix(Some("clip.mp3")), ".mp3");
        assert_eq!(upload_suffix(Some("recording.webm")), ".webm");
        assert_eq!(upload_suffix(Some("noext")), DEFAULT_UPLOAD_SUFFIX);
        assert_eq!(upload_suffix(Some("evil.m p3")), DEFAULT_UPLOAD_SUFFIX);
        assert_eq!(upload_suffix(None), DEFAULT_UPLOAD_SUFFIX);
    }

    #[tokio::test]
    async fn test_upload_is_recognized_and_cleaned_up() {
        let (service, engine) = service(MockEngine::returning(test_utils::end_to_end_payload()));

        let result = service
            .recognize_upload(b"fake audio", Some("clip.ogg"))
            .await
            .unwrap();

        assert_eq!(result.title.as_deref(), Some("Song"));
        let seen = engine.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].extension().and_then(|e| e.to_str()), Some("ogg"));
        assert!(!seen[0].exists(), "temp file should be removed");
    }

    #[tokio::test]
    async fn test_engine_failure_propagates_and_cleans_up() {
        let (service, engine) = service(MockEngine::with_error(RecognitionError::EngineFailure(
            "bad audio".to_string(),
        )));

        let result = service.recognize_upload(b"garbage", None).await;

        assert!(matches!(result, Err(RecognitionError::EngineFailure(_))));
        assert!(!engine.seen.lock().unwrap()[0].exists());
    }

    #[tokio::test]
    async fn test_empty_upload_rejected_without_engine_call() {
        let (service, engine) = service(MockEngine::returning(json!({})));

        let result = service.recognize_upload(b"", Some("a.webm")).await;

        assert!(matches!(result, Err(RecognitionError::EmptyUpload)));
        assert!(engine.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_match_is_success() {
        let (service, _) = service(MockEngine::returning(json!({"matches": []})));

        let result = service.recognize_upload(b"silence", Some("a.wav")).await.unwrap();

        assert_eq!(result, RecognitionResult::unmatched());
    }
}
