//! API key authentication for the Gemini endpoint.

use std::collections::HashMap;
use secrecy::{ExposeSecret, SecretString};
use url::Url;
use crate::config::{AuthMethod, RadarConfig};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Query parameter carrying the API key.
pub const API_KEY_QUERY_PARAM: &str = "key";

/// Attaches credentials to outgoing requests.
pub trait AuthManager: Send + Sync {
    /// Adds credentials to the request headers or URL.
    fn authorize(&self, headers: &mut HashMap<String, String>, url: &mut Url);

    /// Clone the auth manager into a boxed trait object.
    fn clone_box(&self) -> Box<dyn AuthManager>;
}

/// Authenticates with a static API key.
#[derive(Clone)]
pub struct ApiKeyAuthManager {
    api_key: SecretString,
    auth_method: AuthMethod,
}

impl ApiKeyAuthManager {
    /// Create a new API key auth manager.
    pub fn new(api_key: SecretString, auth_method: AuthMethod) -> Self {
        Self { api_key, auth_method }
    }

    /// Create from config.
    pub fn from_config(config: &RadarConfig) -> Self {
        Self::new(config.api_key.clone(), config.auth_method)
    }
}

impl std::fmt::Debug for ApiKeyAuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthManager")
            .field("auth_method", &self.auth_method)
            .finish_non_exhaustive()
    }
}

impl AuthManager for ApiKeyAuthManager {
    fn authorize(&self, headers: &mut HashMap<String, String>, url: &mut Url) {
        let key = self.api_key.expose_secret();
        match self.auth_method {
            AuthMethod::Header => {
                headers.insert(API_KEY_HEADER.to_string(), key.clone());
            }
            AuthMethod::QueryParam => {
                url.query_pairs_mut().append_pair(API_KEY_QUERY_PARAM, key);
            }
        }
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(self.clone())
    }
}
