//! Transport layer error types.

use std::time::Duration;
use crate::error::{NetworkError, RadarError};

/// Transport error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Request error: {0}")]
    Request(String),
}

impl From<TransportError> for RadarError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout(duration) => RadarError::Network(NetworkError::Timeout { duration }),
            other => RadarError::Network(NetworkError::ConnectionFailed {
                message: other.to_string(),
            }),
        }
    }
}
