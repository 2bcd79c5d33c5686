//! Plane API error types.

use j2p_core::CoreError;
use thiserror::Error;

/// Errors that can occur when talking to the Plane API.
#[derive(Debug, Error)]
pub enum PlaneError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Plane returned a non-success status code.
    #[error("{method} {url} -> {status} {message}")]
    Api {
        method: String,
        url: String,
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        message: String,
    },

    /// A JSON body was expected but something else came back (often an HTML
    /// login or proxy page).
    #[error("{method} {url}: non-JSON response (Content-Type={content_type}). First bytes: {snippet}")]
    NonJson {
        method: String,
        url: String,
        content_type: String,
        snippet: String,
    },

    /// The JSON body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Plane returned 429 Too Many Requests.
    #[error("rate limited - retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The API key cannot be sent as a header value.
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,
}

impl From<PlaneError> for CoreError {
    fn from(error: PlaneError) -> Self {
        Self::Api(anyhow::Error::new(error))
    }
}
