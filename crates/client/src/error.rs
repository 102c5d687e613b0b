//! Error types for the directory client.

use thiserror::Error;

/// Errors raised while talking to the directory API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}{}", message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        /// Response status code.
        status: u16,
        /// The `error` field of the response body, if any.
        message: Option<String>,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Decoder error message.
        message: String,
    },

    /// The configured base URL cannot be joined with an endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
