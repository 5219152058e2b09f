//! Error types for the client crate.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for dispatcher operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while dispatching a request.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend could not be reached or did not answer in time.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP error ({status})")]
    Http { status: u16 },

    /// A newer request to the same path superseded this one.
    #[error("Request cancelled: {path}")]
    Cancelled { path: String },

    /// The payload could not be decoded into the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request could not be built (bad base URL, bad path).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a network error for a request that exceeded its ceiling
    pub fn timeout(limit: Duration) -> Self {
        Self::Network(format!("request timed out after {}s", limit.as_secs()))
    }

    /// Create an HTTP status error
    pub fn http(status: u16) -> Self {
        Self::Http { status }
    }

    /// Create a cancellation outcome for the given path
    pub fn cancelled(path: impl Into<String>) -> Self {
        Self::Cancelled { path: path.into() }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns true when the request was superseded rather than failed.
    ///
    /// Callers must not surface this outcome as a user-visible error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// HTTP status of the failed response, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::InvalidRequest(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::Http {
                status: status.as_u16(),
            };
        }
        // Connect failures, timeouts and body read errors all mean the
        // backend was not usable for this call.
        Self::Network(err.to_string())
    }
}
