//! Maps HTTP error responses from `generateContent` onto [`RadarError`].

use serde::Deserialize;
use super::categories::*;
use super::types::RadarError;

/// Structured API error envelope returned by Gemini.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    /// The error body.
    pub error: ApiErrorDetail,
}

/// Detailed error information inside the envelope.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    /// HTTP-style code.
    #[serde(default)]
    pub code: i32,
    /// Human-readable message.
    pub message: String,
    /// Canonical status name, e.g. `RESOURCE_EXHAUSTED`.
    #[serde(default)]
    pub status: String,
    /// Typed detail objects, kept as raw JSON.
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// Maps an HTTP status code and raw body to the most specific error variant.
///
/// `Retry-After` values are filled in afterwards by the response parser, which
/// has access to the headers.
pub fn map_http_status_with_body(status: u16, body: &[u8]) -> RadarError {
    let (message, detail) = match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(envelope) => (envelope.error.message.clone(), Some(envelope.error)),
        Err(_) => (String::from_utf8_lossy(body).trim().to_string(), None),
    };
    let lowered = message.to_lowercase();

    match status {
        400 => RadarError::Request(RequestError::ValidationError {
            details: detail
                .as_ref()
                .map(|d| parse_validation_details(&d.details))
                .unwrap_or_default(),
            message,
        }),
        401 => RadarError::Authentication(AuthenticationError::InvalidApiKey),
        403 => {
            if lowered.contains("quota") {
                RadarError::Authentication(AuthenticationError::QuotaExceeded)
            } else {
                RadarError::Authentication(AuthenticationError::PermissionDenied { message })
            }
        }
        404 => RadarError::Server(ServerError::ModelNotFound {
            model: extract_resource_name(&message),
        }),
        413 => {
            let (size, max_size) = extract_size_info(&message);
            RadarError::Request(RequestError::PayloadTooLarge { size, max_size })
        }
        415 => RadarError::Request(RequestError::UnsupportedMediaType {
            mime_type: extract_mime_type(&message),
        }),
        429 => {
            if lowered.contains("quota") {
                RadarError::RateLimit(RateLimitError::QuotaExceeded { retry_after: None })
            } else {
                RadarError::RateLimit(RateLimitError::TooManyRequests { retry_after: None })
            }
        }
        500 => RadarError::Server(ServerError::InternalError { message }),
        503 => {
            if lowered.contains("overload") {
                RadarError::Server(ServerError::ModelOverloaded {
                    model: extract_resource_name(&message),
                })
            } else {
                RadarError::Server(ServerError::ServiceUnavailable { retry_after: None })
            }
        }
        _ => RadarError::Server(ServerError::InternalError {
            message: format!("HTTP {status}: {message}"),
        }),
    }
}

/// Extracts a model or resource name from an error message.
fn extract_resource_name(message: &str) -> String {
    if let Some(found) = message.split_whitespace().find(|s| s.starts_with("models/")) {
        return found
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '/' && c != '-' && c != '_' && c != '.')
            .to_string();
    }

    for quote in ['\'', '"'] {
        if let Some(start) = message.find(quote) {
            if let Some(end) = message[start + 1..].find(quote) {
                return message[start + 1..start + 1 + end].to_string();
            }
        }
    }

    "unknown".to_string()
}

/// Pulls "size ... max" numbers out of a 413 message.
fn extract_size_info(message: &str) -> (usize, usize) {
    let numbers: Vec<usize> = message
        .split_whitespace()
        .filter_map(|s| s.trim_matches(|c: char| !c.is_numeric()).parse().ok())
        .collect();

    match numbers.as_slice() {
        [] => (0, 0),
        [size] => (*size, 0),
        [size, max, ..] => (*size, *max),
    }
}

fn extract_mime_type(message: &str) -> String {
    const FAMILIES: [&str; 5] = ["image/", "video/", "audio/", "application/", "text/"];

    message
        .split_whitespace()
        .find(|word| FAMILIES.iter().any(|family| word.starts_with(family)))
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '/' && c != '+' && c != '-' && c != '.')
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn parse_validation_details(details: &[serde_json::Value]) -> Vec<ValidationDetail> {
    details
        .iter()
        .filter_map(|detail| {
            let obj = detail.as_object()?;
            let field = obj
                .get("field")
                .or_else(|| obj.get("fieldPath"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            let description = obj
                .get("description")
                .or_else(|| obj.get("message"))
                .and_then(|v| v.as_str())
                .filter(|d| !d.is_empty())?;

            Some(ValidationDetail {
                field: field.to_string(),
                description: description.to_string(),
            })
        })
        .collect()
}
