//! Voice enrollment error types
//!
//! Every failure is local to a single call. Nothing is retried and no state is
//! left behind, so the variants only carry the cause for display.

use thiserror::Error;

/// Result type for voice enrollment operations
pub type EnrollmentResult<T> = Result<T, EnrollmentError>;

/// Errors surfaced by the voice enrollment client.
///
/// Non-2xx HTTP responses are not errors: the status code and decoded body are
/// returned to the caller as a [`TaskResponse`](crate::core::enrollment::TaskResponse).
/// An unrecognised `output.status` is data as well, see
/// [`VoiceStatus::Unknown`](crate::core::enrollment::VoiceStatus::Unknown).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    /// Network failure, timeout, refused connection or a body that is not JSON
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid client configuration or HTTP client construction failure
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EnrollmentError {
    /// Whether the error came from the transport layer rather than local setup.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for EnrollmentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("Request timed out: {err}"))
        } else if err.is_connect() {
            Self::Transport(format!("Connection failed: {err}"))
        } else if err.is_builder() {
            Self::Configuration(format!("Failed to build request: {err}"))
        } else {
            Self::Transport(format!("Request failed: {err}"))
        }
    }
}
