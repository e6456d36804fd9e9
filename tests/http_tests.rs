//! End-to-end tests through `ReqwestTransport` against a local mock server.

use project_radar::config::AuthMethod;
use project_radar::error::{RadarError, RateLimitError, ServerError};
use project_radar::fixtures;
use project_radar::resilience::{RetryPolicy, RetryProgress};
use project_radar::services::Attachment;
use project_radar::simulation::AppMode;
use project_radar::RadarClient;
use secrecy::SecretString;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANALYZE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn client(server: &MockServer, policy: RetryPolicy) -> RadarClient {
    RadarClient::builder()
        .api_key(SecretString::new("wire-key".into()))
        .base_url_str(&server.uri())
        .unwrap()
        .retry_policy(policy)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn json_body(raw: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(raw.as_bytes().to_vec(), "application/json")
}

fn report() -> Attachment {
    Attachment::new("october.txt", "text/plain", &b"Sprint 4 done"[..])
}

#[tokio::test]
async fn test_analyze_document_wire_format() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE_PATH))
        .and(header("x-goog-api-key", "wire-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "inlineData": { "mimeType": "text/plain", "data": "U3ByaW50IDQgZG9uZQ==" } },
                    { "text": "Analyze this project report." }
                ]
            }]
        })))
        .respond_with(json_body(fixtures::ANALYSIS_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    // Act
    let text = client(&server, RetryPolicy::no_retry())
        .analysis()
        .analyze_document(&report(), AppMode::Education, None)
        .await
        .unwrap();

    // Assert
    assert!(text.starts_with("## Executive Summary"));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let instruction = body["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
    assert!(instruction.contains("expert project analyzer for academic institutions"));
    assert!(body["generationConfig"].to_string().contains("\"temperature\":0.4"));
}

#[tokio::test]
async fn test_query_param_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE_PATH))
        .and(query_param("key", "wire-key"))
        .respond_with(json_body(fixtures::ANALYSIS_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    let client = RadarClient::builder()
        .api_key(SecretString::new("wire-key".into()))
        .base_url_str(&server.uri())
        .unwrap()
        .auth_method(AuthMethod::QueryParam)
        .retry_policy(RetryPolicy::no_retry())
        .build()
        .unwrap();

    let result = client
        .analysis()
        .provide_feedback(&report(), AppMode::Organization, None)
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_overloaded_then_success() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE_PATH))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_raw(fixtures::OVERLOADED_ERROR.as_bytes().to_vec(), "application/json"),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ANALYZE_PATH))
        .respond_with(json_body(fixtures::ANALYSIS_RESPONSE))
        .mount(&server)
        .await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let observer = move |p: RetryProgress| sink.lock().unwrap().push(p.attempt);

    // Act
    let text = client(&server, RetryPolicy::from_millis(&[20, 20]))
        .analysis()
        .analyze_report(&[report()], "Summarize.", "You are terse.", None, Some(&observer))
        .await
        .unwrap();

    // Assert
    assert!(text.contains("Key Metrics"));
    assert_eq!(*seen.lock().unwrap(), vec![1]);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_answers_exhaust_the_table() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE_PATH))
        .respond_with(json_body(fixtures::EMPTY_RESPONSE))
        .expect(3)
        .mount(&server)
        .await;

    // Act
    let err = client(&server, RetryPolicy::from_millis(&[10, 10]))
        .analysis()
        .analyze_document(&report(), AppMode::Education, None)
        .await
        .unwrap_err();

    // Assert
    assert!(err.is_empty_result());
    assert_eq!(err.to_string(), "Response error: No analysis generated.");
}

#[tokio::test]
async fn test_rate_limit_keeps_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "30")
                .set_body_raw(fixtures::RATE_LIMITED_ERROR.as_bytes().to_vec(), "application/json"),
        )
        .mount(&server)
        .await;

    let err = client(&server, RetryPolicy::no_retry())
        .analysis()
        .analyze_document(&report(), AppMode::Education, None)
        .await
        .unwrap_err();

    assert!(matches!(err, RadarError::RateLimit(RateLimitError::QuotaExceeded { .. })));
    assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn test_unknown_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-9:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            br#"{"error":{"code":404,"message":"models/gemini-9 is not found for API version v1beta","status":"NOT_FOUND"}}"#.to_vec(),
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = client(&server, RetryPolicy::no_retry())
        .analysis()
        .analyze_report(&[], "Hi", "Inst", Some("gemini-9"), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RadarError::Server(ServerError::ModelNotFound { ref model }) if model == "models/gemini-9"
    ));
}

#[tokio::test]
async fn test_edit_image_over_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash-image:generateContent"))
        .respond_with(json_body(fixtures::IMAGE_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    let image = Attachment::new("photo.jpg", "image/jpeg", &b"\xff\xd8\xff"[..]);
    let uri = client(&server, RetryPolicy::no_retry())
        .analysis()
        .edit_image(&image, "Make it retro", None)
        .await
        .unwrap();

    assert!(uri.starts_with("data:image/png;base64,"));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["contents"][0].get("role").is_none());
    assert_eq!(body["contents"][0]["parts"][1]["text"], "Make it retro");
}
