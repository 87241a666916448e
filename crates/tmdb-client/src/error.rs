//! Errors returned by the TMDB client.

/// Failure modes of constructing or calling the TMDB client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The API key was rejected before any request was made.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    /// The configured base URL is not an absolute URL.
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request never produced a response (connect, TLS, timeout).
    /// Holds the error with its URL removed.
    #[error("TMDB request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// TMDB answered with a non-success status.
    #[error("TMDB {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// TMDB's `status_message`, or the raw body when absent.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("TMDB parse error: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status of the failed call, if TMDB answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
