//! Error types for notifier-core

use std::path::PathBuf;
use thiserror::Error;

/// Which half of a webhook exchange failed at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpPhase {
    /// Sending the request (connect, TLS, write, timeout)
    Post,
    /// Reading the response body after headers arrived
    ReadBody,
}

impl std::fmt::Display for HttpPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpPhase::Post => write!(f, "slack http post failed"),
            HttpPhase::ReadBody => write!(f, "failed to read response body"),
        }
    }
}

/// Errors that can occur while resolving or delivering a notification
#[derive(Error, Debug)]
pub enum NotifierError {
    /// The running executable could not report its own location
    #[error("failed to get notification directory: {0}")]
    LocatorFailure(String),

    /// The isolation directory for playback could not be created
    #[error("failed to create temp directory for notification: {0}")]
    TempDirFailure(#[source] std::io::Error),

    /// File extension is not one of the playable types
    #[error("unsupported audio file type: {0} (expected .wav or .mp3)")]
    UnsupportedFileType(String),

    /// Built-in name does not exist in the media directory
    #[error("built-in audio file {name:?} not found in {}", .dir.display())]
    BuiltInNotFound { name: String, dir: PathBuf },

    /// Media directory could not be listed
    #[error("failed to list media directory {}: {source}", .dir.display())]
    MediaListing {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport-level webhook failure
    #[error("{phase}: {message}")]
    Http { phase: HttpPhase, message: String },

    /// HTTP client could not be constructed
    #[error("failed to build http client: {0}")]
    HttpClient(String),

    /// Webhook answered with something other than 200
    #[error("failed with status code {code}:\n{body}")]
    BadStatus { code: u16, body: String },

    /// JSON encoding error
    #[error("failed to marshal object to json: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for NotifierError {
    fn from(err: reqwest::Error) -> Self {
        NotifierError::HttpClient(err.to_string())
    }
}

/// Result type for notifier operations
pub type Result<T> = std::result::Result<T, NotifierError>;
