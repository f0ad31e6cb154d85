//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`RecognitionError`](crate::recognition::RecognitionError),
//! [`ConfigError`](crate::config::ConfigError)), the CLI uses `anyhow`, and
//! this enum sits between them for the server and command plumbing.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Recognition error (engine or link service)
    #[error("Recognition error: {0}")]
    Recognition(#[from] crate::recognition::RecognitionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Captured payload could not be read as JSON
    #[error("Invalid payload in {path}: {message}")]
    Payload { path: PathBuf, message: String },

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a payload error.
    pub fn payload(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Payload {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, crate::recognition::RecognitionError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Recognition(e).context(ctx))
    }
}
