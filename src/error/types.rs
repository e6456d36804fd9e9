//! Top-level error type for ProjectRadar operations.

use std::time::Duration;
use thiserror::Error;
use super::categories::*;

/// Result type alias for ProjectRadar operations.
pub type RadarResult<T> = Result<T, RadarError>;

/// Returned when a gateway invocation is cancelled through its token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("operation cancelled before completion")]
pub struct Cancelled;

/// Top-level error type.
///
/// The retry gateway never inspects these variants; every one of them is
/// retried until the delay table is exhausted.
#[derive(Error, Debug, Clone)]
pub enum RadarError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Cancelled(#[from] Cancelled),
}

impl RadarError {
    /// Returns true if the remote call completed but produced nothing usable.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, RadarError::Response(ResponseError::EmptyResult { .. }))
    }

    /// Returns true if the invocation was cancelled by the caller.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RadarError::Cancelled(_))
    }

    /// Server-advertised wait, if the remote sent one.
    ///
    /// Informational only: the retry gateway always follows its own table.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RadarError::RateLimit(e) => e.retry_after(),
            RadarError::Server(ServerError::ServiceUnavailable { retry_after }) => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RadarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RadarError::Network(NetworkError::Timeout {
                duration: Duration::from_secs(0), // Unknown actual duration
            })
        } else {
            RadarError::Network(NetworkError::ConnectionFailed {
                message: err.to_string(),
            })
        }
    }
}

impl From<serde_json::Error> for RadarError {
    fn from(err: serde_json::Error) -> Self {
        RadarError::Response(ResponseError::DeserializationError {
            message: err.to_string(),
        })
    }
}

impl From<url::ParseError> for RadarError {
    fn from(err: url::ParseError) -> Self {
        RadarError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: err.to_string(),
        })
    }
}
