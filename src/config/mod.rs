//! Configuration types for the ProjectRadar client.

use secrecy::SecretString;
use std::time::Duration;
use url::Url;
use crate::error::{RadarError, ConfigurationError};
use crate::resilience::RetryPolicy;

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Default request timeout (120 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Model used for report analysis, comparison, feedback and search.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Model used for image editing.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Sampling temperature for report analysis and feedback.
pub const DEFAULT_ANALYSIS_TEMPERATURE: f32 = 0.4;

/// Authentication method for API key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Use x-goog-api-key header (recommended).
    #[default]
    Header,
    /// Use ?key= query parameter.
    QueryParam,
}

/// Log level for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Error level - only errors.
    Error,
    /// Warning level - errors and warnings.
    Warn,
    /// Info level - general information.
    #[default]
    Info,
    /// Debug level - detailed information.
    Debug,
    /// Trace level - very detailed information.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Configuration for the ProjectRadar client.
#[derive(Clone)]
pub struct RadarConfig {
    /// API key (required).
    pub api_key: SecretString,
    /// Base URL for the API.
    pub base_url: Url,
    /// API version.
    pub api_version: String,
    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Backoff table used by the retry gateway.
    pub retry_policy: RetryPolicy,
    /// Model for text operations.
    pub text_model: String,
    /// Model for image editing.
    pub image_model: String,
    /// Temperature for analysis and feedback requests.
    pub analysis_temperature: f32,
    /// Log level.
    pub log_level: LogLevel,
    /// Authentication method.
    pub auth_method: AuthMethod,
}

impl std::fmt::Debug for RadarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadarConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("retry_policy", &self.retry_policy)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish_non_exhaustive()
    }
}

impl RadarConfig {
    /// Create a new configuration builder.
    pub fn builder() -> RadarConfigBuilder {
        RadarConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `GEMINI_API_KEY`, `GOOGLE_API_KEY` or `API_KEY` (required, first wins)
    /// - `GEMINI_BASE_URL`, `GEMINI_API_VERSION`, `GEMINI_TIMEOUT_SECS`
    /// - `RADAR_RETRY_DELAYS_MS` (comma-separated, e.g. `5000,10000,15000`)
    /// - `RADAR_TEXT_MODEL`, `RADAR_IMAGE_MODEL`
    pub fn from_env() -> Result<Self, RadarError> {
        let api_key = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"]
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
            .ok_or(ConfigurationError::MissingApiKey)?;

        let mut builder = Self::builder().api_key(SecretString::new(api_key));

        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            builder = builder.base_url(&base_url)?;
        }
        if let Ok(version) = std::env::var("GEMINI_API_VERSION") {
            builder = builder.api_version(&version);
        }
        if let Ok(raw) = std::env::var("GEMINI_TIMEOUT_SECS") {
            builder = builder.timeout(parse_timeout_secs(&raw)?);
        }
        if let Ok(raw) = std::env::var("RADAR_RETRY_DELAYS_MS") {
            builder = builder.retry_policy(parse_retry_delays(&raw)?);
        }
        if let Ok(model) = std::env::var("RADAR_TEXT_MODEL") {
            builder = builder.text_model(&model);
        }
        if let Ok(model) = std::env::var("RADAR_IMAGE_MODEL") {
            builder = builder.image_model(&model);
        }

        builder.build()
    }
}

/// Parses a whole number of seconds such as `120`.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, RadarError> {
    let secs = raw.trim().parse::<u64>().map_err(|_| ConfigurationError::InvalidConfiguration {
        message: format!("invalid timeout '{raw}' in GEMINI_TIMEOUT_SECS"),
    })?;
    Ok(Duration::from_secs(secs))
}

/// Parses a comma-separated millisecond table such as `5000,10000,15000`.
///
/// An empty string yields a policy with no retries.
pub fn parse_retry_delays(raw: &str) -> Result<RetryPolicy, RadarError> {
    let millis = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>().map_err(|_| ConfigurationError::InvalidConfiguration {
                message: format!("invalid retry delay '{s}' in RADAR_RETRY_DELAYS_MS"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RetryPolicy::from_millis(&millis))
}

/// Builder for RadarConfig.
#[derive(Default)]
pub struct RadarConfigBuilder {
    api_key: Option<SecretString>,
    base_url: Option<Url>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_policy: Option<RetryPolicy>,
    text_model: Option<String>,
    image_model: Option<String>,
    analysis_temperature: Option<f32>,
    log_level: Option<LogLevel>,
    auth_method: Option<AuthMethod>,
}

impl RadarConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: &str) -> Result<Self, RadarError> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    /// Set the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = Some(version.to_string());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the retry backoff table.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Set the text model.
    pub fn text_model(mut self, model: &str) -> Self {
        self.text_model = Some(model.to_string());
        self
    }

    /// Set the image model.
    pub fn image_model(mut self, model: &str) -> Self {
        self.image_model = Some(model.to_string());
        self
    }

    /// Set the analysis temperature.
    pub fn analysis_temperature(mut self, temperature: f32) -> Self {
        self.analysis_temperature = Some(temperature);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<RadarConfig, RadarError> {
        let api_key = self.api_key
            .ok_or(ConfigurationError::MissingApiKey)?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let analysis_temperature = self.analysis_temperature.unwrap_or(DEFAULT_ANALYSIS_TEMPERATURE);
        if !(0.0..=2.0).contains(&analysis_temperature) {
            return Err(ConfigurationError::InvalidConfiguration {
                message: format!("analysis temperature {analysis_temperature} is outside 0.0..=2.0"),
            }
            .into());
        }

        Ok(RadarConfig {
            api_key,
            base_url,
            api_version: self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout: self.timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            retry_policy: self.retry_policy.unwrap_or_default(),
            text_model: self.text_model.unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: self.image_model.unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            analysis_temperature,
            log_level: self.log_level.unwrap_or_default(),
            auth_method: self.auth_method.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RadarConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .build()
            .unwrap();

        assert_eq!(config.base_url.as_str(), "https://generativelanguage.googleapis.com/");
        assert_eq!(config.api_version, "v1beta");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.text_model, "gemini-2.5-flash");
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.auth_method, AuthMethod::Header);
        assert_eq!(
            config.retry_policy.delays(),
            &[Duration::from_secs(5), Duration::from_secs(10), Duration::from_secs(15)]
        );
    }

    #[test]
    fn test_custom_config() {
        let config = RadarConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .api_version("v1")
            .timeout(Duration::from_secs(60))
            .auth_method(AuthMethod::QueryParam)
            .retry_policy(RetryPolicy::no_retry())
            .build()
            .unwrap();

        assert_eq!(config.api_version, "v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.auth_method, AuthMethod::QueryParam);
        assert_eq!(config.retry_policy.max_attempts(), 1);
    }

    #[test]
    fn test_missing_api_key() {
        let result = RadarConfig::builder().build();
        assert!(matches!(
            result,
            Err(RadarError::Configuration(ConfigurationError::MissingApiKey))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        let result = RadarConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .analysis_temperature(3.5)
            .build();
        assert!(matches!(
            result,
            Err(RadarError::Configuration(ConfigurationError::InvalidConfiguration { .. }))
        ));
    }

    #[test]
    fn test_parse_retry_delays() {
        let policy = parse_retry_delays("5000, 10000,15000").unwrap();
        assert_eq!(policy, RetryPolicy::default());

        assert_eq!(parse_retry_delays("").unwrap().max_attempts(), 1);
        assert!(parse_retry_delays("5s,10s").is_err());
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs(" 90 ").unwrap(), Duration::from_secs(90));

        let err = parse_timeout_secs("two minutes").unwrap_err();
        assert!(matches!(
            err,
            RadarError::Configuration(ConfigurationError::InvalidConfiguration { ref message })
                if message.contains("GEMINI_TIMEOUT_SECS")
        ));
        assert!(parse_timeout_secs("-5").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = RadarConfig::builder()
            .api_key(SecretString::new("super-secret".into()))
            .build()
            .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
