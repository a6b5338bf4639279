//! Error types for the media service
//!
//! All errors use thiserror for structured error handling.
//! The HTTP layer maps these onto status codes in `api`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Media not found: {0}")]
    MediaNotFound(String),

    /// The registry has an entry but its blob is gone from disk
    #[error("Blob missing for media {id}: {source}")]
    BlobMissing {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed registry snapshot {path}: {source}")]
    MalformedRegistry {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
