//! Error types for the provider layer.

use thiserror::Error;

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for provider operations.
///
/// These errors never cross the [`generate_melody`](crate::generate_melody) /
/// [`generate_silhouette`](crate::generate_silhouette) boundary; both convert
/// every failure into their safe default.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reported by the provider (non-2xx status or API-level code).
    #[error("provider error (http {status}): {message}")]
    Api { status: u16, message: String },

    /// The response parsed but lacked the expected payload.
    #[error("provider response missing {0}")]
    MissingData(&'static str),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Creates an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: message.into(),
        }
    }
}
