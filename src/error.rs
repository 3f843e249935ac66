//! Error types for the prompt composer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, ComposerError>;

/// Errors that can occur while composing and submitting prompts.
#[derive(Error, Debug)]
pub enum ComposerError {
    /// Error reading a file.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP transport error.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The completion API answered with a non-success status.
    #[error("Completion API error: {0}")]
    Api(String),

    /// The completion API body could not be decoded.
    #[error("Failed to parse completion response: {0}")]
    Parse(String),

    /// The completion API returned no choices.
    #[error("Completion response contained no choices")]
    EmptyResponse,

    /// Configuration file or value error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ComposerError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for ComposerError {
    fn from(err: reqwest::Error) -> Self {
        ComposerError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for ComposerError {
    fn from(err: serde_json::Error) -> Self {
        ComposerError::Parse(err.to_string())
    }
}
