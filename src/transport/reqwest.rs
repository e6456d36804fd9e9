//! Reqwest-based HTTP transport implementation.

use super::http::{HttpTransport, HttpRequest, HttpResponse, HttpMethod};
use super::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::time::Duration;
use crate::config::RadarConfig;

/// Reqwest-based HTTP transport.
///
/// The per-request and connect timeouts live here; the retry gateway has no
/// deadline of its own.
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new reqwest transport with the given timeouts.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportError::Connection(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// Create a transport using the timeouts from `config`.
    pub fn from_config(config: &RadarConfig) -> Result<Self, TransportError> {
        Self::new(config.timeout, config.connect_timeout)
    }

    fn header_map(headers: HashMap<String, String>) -> HeaderMap {
        headers
            .into_iter()
            .filter_map(|(key, value)| {
                let name = HeaderName::from_bytes(key.as_bytes()).ok()?;
                let value = HeaderValue::from_str(&value).ok()?;
                Some((name, value))
            })
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client
            .request(method, &request.url)
            .headers(Self::header_map(request.headers));

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout)
            } else {
                TransportError::Connection(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout)
            } else {
                TransportError::Request(format!("Failed to read response body: {e}"))
            }
        })?;

        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(120), Duration::from_secs(30));
        assert!(transport.is_ok());
    }

    #[test]
    fn test_header_map_skips_invalid_names() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("bad header".to_string(), "x".to_string());

        let map = ReqwestTransport::header_map(headers);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("content-type").unwrap(), "application/json");
    }
}
