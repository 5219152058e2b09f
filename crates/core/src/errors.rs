//! Core error types for the findash containers.
//!
//! Transport failures arrive as [`ClientError`] from the dispatcher and are
//! wrapped here; everything else is raised by the domain layer itself.

use findash_client::ClientError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the dashboard domain.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Request failed: {0}")]
    Client(#[from] ClientError),

    /// Financial data that cannot produce a metric (missing field, zero
    /// denominator, non-numeric value).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Report generation failed: {0}")]
    ReportGeneration(String),

    #[error("Failed to deliver file: {0}")]
    Delivery(String),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn report_generation(message: impl Into<String>) -> Self {
        Self::ReportGeneration(message.into())
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery(message.into())
    }

    /// Returns true when the underlying request was superseded.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Client(err) if err.is_cancelled())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Delivery(err.to_string())
    }
}
