//! Fingerprint engine adapter using the SongRec CLI
//!
//! This module shells out to `songrec` (an open-source Shazam client) which
//! fingerprints the audio, queries the recognition service and prints the raw
//! JSON response. We never look inside the fingerprinting; the printed JSON
//! is handed to the pipeline as an opaque payload.
//!
//! Install songrec:
//! - Linux: `apt install songrec` / `flatpak install com.github.marinm.songrec`
//! - Any platform: `cargo install songrec`

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::domain::RecognitionError;
use super::payload::RawMatchPayload;
use super::traits::FingerprintEngine;
use crate::config::EngineConfig;

/// Common installation paths for songrec
#[cfg(windows)]
const SONGREC_PATHS: &[&str] = &["songrec", r"C:\Program Files\SongRec\songrec.exe"];

#[cfg(not(windows))]
const SONGREC_PATHS: &[&str] = &[
    "songrec", // In PATH
    "/usr/bin/songrec",
    "/usr/local/bin/songrec",
    "/opt/homebrew/bin/songrec",
];

/// Find the songrec executable, checking common installation paths
fn find_songrec() -> Option<&'static str> {
    SONGREC_PATHS.iter().copied().find(|path| probe(Path::new(path)))
}

fn probe(command: &Path) -> bool {
    std::process::Command::new(command)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Engine backed by an external recognizer process.
pub struct SongRecEngine {
    command: PathBuf,
    args: Vec<String>,
    config: EngineConfig,
}

impl SongRecEngine {
    /// Resolve the executable from config, or probe the usual locations.
    pub fn new(config: &EngineConfig) -> Result<Self, RecognitionError> {
        let command = match &config.command {
            Some(explicit) => explicit.clone(),
            None => find_songrec().map(PathBuf::from).ok_or_else(|| {
                RecognitionError::EngineUnavailable(
                    "songrec not found. Install it or set engine.command in the config"
                        .to_string(),
                )
            })?,
        };

        Ok(Self {
            command,
            args: config.args.clone(),
            config: config.clone(),
        })
    }

    async fn run(&self, audio: &Path) -> Result<RawMatchPayload, RecognitionError> {
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(audio)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                RecognitionError::EngineFailure(format!(
                    "Failed to run {}: {}",
                    self.command.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::EngineFailure(format!(
                "{} exited with {}: {}",
                self.command.display(),
                output.status,
                stderr.trim()
            )));
        }

        parse_engine_output(&String::from_utf8_lossy(&output.stdout))
    }
}

#[async_trait]
impl FingerprintEngine for SongRecEngine {
    async fn recognize(&self, audio: &Path) -> Result<RawMatchPayload, RecognitionError> {
        tracing::debug!(engine = %self.command.display(), ?audio, "Running fingerprint engine");

        match tokio::time::timeout(self.config.timeout(), self.run(audio)).await {
            Ok(result) => result,
            Err(_) => Err(RecognitionError::EngineTimeout(self.config.timeout_secs)),
        }
    }
}

/// Parse the engine's stdout into a payload.
///
/// The recognizer prints one JSON document; blank output or anything that is
/// not JSON is an engine failure rather than "no match".
fn parse_engine_output(stdout: &str) -> Result<RawMatchPayload, RecognitionError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(RecognitionError::EngineFailure(
            "engine produced no output".to_string(),
        ));
    }
    RawMatchPayload::from_json_str(trimmed).map_err(|e| {
        RecognitionError::EngineFailure(format!("Failed to parse engine output: {e}"))
    })
}

/// Check if an engine is available on the system
pub fn is_engine_available(config: &EngineConfig) -> bool {
    match &config.command {
        Some(command) => probe(command),
        None => find_songrec().is_some(),
    }
}

/// Get the engine version string (for diagnostics)
pub fn engine_version(config: &EngineConfig) -> Option<String> {
    let command = match &config.command {
        Some(command) => command.clone(),
        None => PathBuf::from(find_songrec()?),
    };
    std::process::Command::new(command)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}
