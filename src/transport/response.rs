//! HTTP response parsing for the Gemini API.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{
    map_http_status_with_body, RadarError, RadarResult, RateLimitError, ResponseError, ServerError,
};
use super::http::HttpResponse;

const REQUEST_ID_HEADERS: [&str; 3] = ["x-request-id", "x-goog-request-id", "request-id"];

/// Turns transport responses into typed bodies or typed errors.
pub struct ResponseParser;

impl ResponseParser {
    /// Deserializes a 2xx body, or maps a non-2xx response to an error.
    pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> RadarResult<T> {
        if response.is_success() {
            if response.body.iter().all(u8::is_ascii_whitespace) {
                return Err(ResponseError::UnexpectedFormat {
                    message: format!("empty body with status {}", response.status),
                }
                .into());
            }
            Ok(serde_json::from_slice(&response.body)?)
        } else {
            Err(Self::parse_error_response(response))
        }
    }

    /// Maps an error response using its status and body, then fills in the
    /// `Retry-After` header for rate-limit and unavailable errors.
    pub fn parse_error_response(response: HttpResponse) -> RadarError {
        let header_retry_after = Self::parse_retry_after(&response.headers);
        let mut error = map_http_status_with_body(response.status, &response.body);

        match &mut error {
            RadarError::RateLimit(
                RateLimitError::TooManyRequests { retry_after }
                | RateLimitError::QuotaExceeded { retry_after },
            )
            | RadarError::Server(ServerError::ServiceUnavailable { retry_after }) => {
                if header_retry_after.is_some() {
                    *retry_after = header_retry_after;
                }
            }
            _ => {}
        }

        if let Some(id) = Self::extract_request_id(&response.headers) {
            tracing::debug!(
                request_id = %id,
                status = response.status,
                error = %error,
                "API error occurred"
            );
        }

        error
    }

    /// Reads a `Retry-After` header expressed in seconds.
    ///
    /// HTTP-date values are ignored.
    pub fn parse_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("retry-after"))
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Extracts a request ID header for log correlation.
    pub fn extract_request_id(headers: &HashMap<String, String>) -> Option<String> {
        headers
            .iter()
            .find(|(key, _)| {
                REQUEST_ID_HEADERS
                    .iter()
                    .any(|candidate| key.eq_ignore_ascii_case(candidate))
            })
            .map(|(_, value)| value.clone())
    }
}
