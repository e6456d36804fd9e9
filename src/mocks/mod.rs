//! In-memory test doubles for the transport and auth layers.
//!
//! Always compiled so integration tests under `tests/` can use them.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use url::Url;

use crate::auth::{AuthManager, API_KEY_HEADER, API_KEY_QUERY_PARAM};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Transport that replays queued responses in order and records every request.
///
/// Once the queue is empty every call fails with a connection error.
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    latency: Option<Duration>,
}

impl MockHttpTransport {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response by `latency` (uses the tokio clock).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue a raw result.
    pub fn enqueue_response(&self, response: Result<HttpResponse, TransportError>) {
        lock(&self.responses).push_back(response);
    }

    /// Queue a JSON body with the given status.
    pub fn enqueue_json_response(&self, status: u16, body: &serde_json::Value) {
        self.enqueue_body(status, body.to_string());
    }

    /// Queue a body verbatim, e.g. to simulate a malformed payload.
    pub fn enqueue_body(&self, status: u16, body: impl Into<String>) {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        self.enqueue_response(Ok(HttpResponse {
            status,
            headers,
            body: Bytes::from(body.into()),
        }));
    }

    /// Queue a transport failure.
    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue_response(Err(error));
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Request bodies parsed as JSON, in send order. Requests without a body are skipped.
    pub fn request_bodies(&self) -> Vec<serde_json::Value> {
        lock(&self.requests)
            .iter()
            .filter_map(|r| r.body.as_ref())
            .filter_map(|body| serde_json::from_slice(body).ok())
            .collect()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Err(TransportError::Connection(
                "No response configured in MockHttpTransport".to_string(),
            ))
        })
    }
}

/// Auth manager with a plain-text key.
#[derive(Clone, Debug)]
pub struct MockAuthManager {
    api_key: String,
    use_header: bool,
}

impl MockAuthManager {
    /// Sends the key in the `x-goog-api-key` header.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: true,
        }
    }

    /// Sends the key as the `key` query parameter.
    pub fn with_query_param(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: false,
        }
    }
}

impl AuthManager for MockAuthManager {
    fn authorize(&self, headers: &mut HashMap<String, String>, url: &mut Url) {
        if self.use_header {
            headers.insert(API_KEY_HEADER.to_string(), self.api_key.clone());
        } else {
            url.query_pairs_mut().append_pair(API_KEY_QUERY_PARAM, &self.api_key);
        }
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(self.clone())
    }
}
