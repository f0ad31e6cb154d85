//! Song recognition - identifies a clip and assembles a platform-linked result.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - `RecognitionResult` and friends, our own types
//! - **Payload** (`payload.rs`) - defensive accessors over the engine's raw JSON
//! - **Extractor** (`extractor.rs`) - title / artist / cover art
//! - **Links** (`links.rs`) - ordered fallback chain for the primary platform link
//! - **Cross-platform** (`cross_platform.rs`) - best-effort secondary link lookup
//! - **song.link** (`songlink/`) - DTOs, adapter and HTTP client for the link service
//! - **Engine** (`engine.rs`) - SongRec CLI adapter for fingerprint recognition
//! - **Pipeline** (`pipeline.rs`) - sequences the steps into one result
//! - **Service** (`service.rs`) - engine + pipeline, including upload handling
//!
//! Only an engine failure is surfaced as an error. A missing track is reported
//! in the result itself, and every other gap just leaves a field empty.
//!
//! # Usage
//!
//! ```ignore
//! let config = Arc::new(config::load(None)?);
//! let service = RecognitionService::new(config)?;
//!
//! let result = service.recognize_file(Path::new("clip.webm")).await?;
//! println!("{:?} - {:?}", result.title, result.artist);
//! ```

pub mod cross_platform;
pub mod domain;
pub mod engine;
pub mod extractor;
pub mod links;
pub mod payload;
pub mod pipeline;
pub mod service;
pub mod songlink;
pub mod traits;

pub use domain::{LinkQuery, RecognitionError, RecognitionResult};
pub use payload::RawMatchPayload;
pub use service::RecognitionService;
pub use songlink::SongLinkClient;
