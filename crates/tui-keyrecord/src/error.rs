//! Recorder error types.

use thiserror::Error;

/// Errors that can occur while setting up or configuring a recording.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A recording is already in progress on this dispatcher.
    #[error("a key sequence is already being recorded")]
    AlreadyRecording,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML error.
    #[error("TOML error: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for RecordError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e.to_string())
    }
}

/// Result type for recorder operations.
pub type RecordResult<T> = Result<T, RecordError>;
