//! HTTP adapter error types.

use libris_domain::error::{LibrisError, TransportError};

/// Errors specific to the reqwest adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpAdapterError {
    /// The configured base URL, or a path joined onto it, is not a URL.
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The underlying client could not be constructed.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// The request did not produce a complete response.
    #[error("HTTP request failed")]
    Request(#[source] reqwest::Error),
}

impl From<HttpAdapterError> for LibrisError {
    fn from(err: HttpAdapterError) -> Self {
        TransportError::Network(Box::new(err)).into()
    }
}
