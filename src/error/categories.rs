//! Error category types for granular error handling.

use std::time::Duration;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Authentication-related errors.
#[derive(Error, Debug, Clone)]
pub enum AuthenticationError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Quota exceeded for API key")]
    QuotaExceeded,
}

/// Request validation errors.
#[derive(Error, Debug, Clone)]
pub enum RequestError {
    #[error("Validation error: {message}")]
    ValidationError { message: String, details: Vec<ValidationDetail> },

    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    #[error("Payload too large: {size} bytes (max: {max_size})")]
    PayloadTooLarge { size: usize, max_size: usize },

    #[error("Unsupported media type: {mime_type}")]
    UnsupportedMediaType { mime_type: String },

    #[error("Attachment could not be read: {path} - {message}")]
    AttachmentUnreadable { path: String, message: String },
}

/// Validation detail for field-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    /// Offending field path.
    pub field: String,
    /// What is wrong with it.
    pub description: String,
}

/// Rate limiting errors reported by the remote service.
#[derive(Error, Debug, Clone)]
pub enum RateLimitError {
    #[error("Too many requests")]
    TooManyRequests { retry_after: Option<Duration> },

    #[error("Quota exceeded")]
    QuotaExceeded { retry_after: Option<Duration> },
}

impl RateLimitError {
    /// Wait advertised by the server, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RateLimitError::TooManyRequests { retry_after }
            | RateLimitError::QuotaExceeded { retry_after } => *retry_after,
        }
    }
}

/// Network-related errors.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timed out after {duration:?}")]
    Timeout { duration: Duration },
}

/// Server-side errors.
#[derive(Error, Debug, Clone)]
pub enum ServerError {
    #[error("Internal server error: {message}")]
    InternalError { message: String },

    #[error("Service unavailable")]
    ServiceUnavailable { retry_after: Option<Duration> },

    #[error("Model overloaded: {model}")]
    ModelOverloaded { model: String },

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },
}

/// Response parsing errors.
#[derive(Error, Debug, Clone)]
pub enum ResponseError {
    #[error("Failed to deserialize response: {message}")]
    DeserializationError { message: String },

    #[error("Unexpected response format: {message}")]
    UnexpectedFormat { message: String },

    /// The call succeeded but carried no text and no image.
    #[error("{message}")]
    EmptyResult { message: String },

    #[error("Model returned text instead of image: {text}")]
    TextInsteadOfImage { text: String },
}

/// Content safety errors.
#[derive(Error, Debug, Clone)]
pub enum ContentError {
    #[error("Content blocked due to safety: {reason:?}")]
    SafetyBlocked {
        reason: String,
        safety_ratings: Vec<SafetyRatingInfo>,
    },

    #[error("Content blocked due to recitation")]
    RecitationBlocked {
        safety_ratings: Vec<SafetyRatingInfo>,
    },

    #[error("Prohibited content detected")]
    ProhibitedContent,
}

/// Information about a safety rating for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyRatingInfo {
    /// Harm category.
    pub category: String,
    /// Reported probability level.
    pub probability: String,
}
