//! HTTP request builder for the Gemini API.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

use crate::auth::AuthManager;
use crate::error::RadarResult;
use super::http::{HttpRequest, HttpMethod};

/// Builds authenticated requests against a versioned base URL.
pub struct RequestBuilder {
    base_url: Url,
    api_version: String,
    auth_manager: Box<dyn AuthManager>,
}

impl Clone for RequestBuilder {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            api_version: self.api_version.clone(),
            auth_manager: self.auth_manager.clone_box(),
        }
    }
}

impl RequestBuilder {
    /// Creates a new request builder.
    pub fn new(base_url: Url, api_version: String, auth_manager: Box<dyn AuthManager>) -> Self {
        Self {
            base_url,
            api_version,
            auth_manager,
        }
    }

    /// Joins `path` onto `{base}/{version}/`.
    ///
    /// A leading slash on `path` is ignored. Any path already present on the
    /// base URL is kept.
    pub fn build_url(&self, path: &str) -> RadarResult<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }

        let full_path = format!("{}/{}", self.api_version, path.trim_start_matches('/'));
        Ok(base.join(&full_path)?)
    }

    /// Builds an authenticated request, serializing `body` as JSON.
    pub fn build_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&T>,
    ) -> RadarResult<HttpRequest> {
        let mut url = self.build_url(path)?;
        let mut headers = HashMap::new();

        let body = match body {
            Some(body) => {
                headers.insert("Content-Type".to_string(), "application/json".to_string());
                Some(Bytes::from(serde_json::to_vec(body)?))
            }
            None => None,
        };

        self.auth_manager.authorize(&mut headers, &mut url);

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKeyAuthManager;
    use crate::config::AuthMethod;
    use secrecy::SecretString;
    use serde_json::json;

    fn builder(base: &str, auth_method: AuthMethod) -> RequestBuilder {
        RequestBuilder::new(
            Url::parse(base).unwrap(),
            "v1beta".to_string(),
            Box::new(ApiKeyAuthManager::new(SecretString::new("test-api-key".into()), auth_method)),
        )
    }

    #[test]
    fn test_build_url_with_version() {
        let builder = builder("https://generativelanguage.googleapis.com", AuthMethod::Header);
        let url = builder.build_url("/models/gemini-2.5-flash:generateContent").unwrap();

        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let builder = builder("http://127.0.0.1:8080/proxy", AuthMethod::Header);
        let url = builder.build_url("models/m:generateContent").unwrap();

        assert_eq!(url.as_str(), "http://127.0.0.1:8080/proxy/v1beta/models/m:generateContent");
    }

    #[test]
    fn test_build_request_with_header_auth() {
        let builder = builder("https://generativelanguage.googleapis.com", AuthMethod::Header);
        let request = builder
            .build_request(HttpMethod::Post, "/models/m:generateContent", Some(&json!({"a": 1})))
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(request.headers.get("x-goog-api-key").unwrap(), "test-api-key");
        assert_eq!(request.body.unwrap(), Bytes::from_static(br#"{"a":1}"#));
    }

    #[test]
    fn test_build_request_with_query_auth_and_no_body() {
        let builder = builder("https://generativelanguage.googleapis.com", AuthMethod::QueryParam);
        let request = builder
            .build_request::<()>(HttpMethod::Post, "/models/m:countTokens", None)
            .unwrap();

        assert!(request.url.ends_with("/v1beta/models/m:countTokens?key=test-api-key"));
        assert!(!request.headers.contains_key("Content-Type"));
        assert!(request.body.is_none());
    }
}
