//! Error types shared across the gallery.

use thiserror::Error;

/// Everything that can go wrong while loading gallery data.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a success status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Manifest or imprint body was not the JSON we expect
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The config file exists but could not be parsed
    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Image bytes could not be decoded
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    /// A blocking worker panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
