//! Builder for [`RadarClient`].

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::auth::{ApiKeyAuthManager, AuthManager};
use crate::config::{AuthMethod, LogLevel, RadarConfig};
use crate::error::{ConfigurationError, NetworkError, RadarError};
use crate::observability::{create_default_stack, Logger, MetricsRecorder, RadarMetrics, Tracer};
use crate::resilience::{RetryGateway, RetryPolicy};
use crate::services::ContentService;
use crate::transport::{HttpTransport, ReqwestTransport};

use super::client::RadarClient;

const SERVICE_NAME: &str = "project_radar";
const API_KEY_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

/// Fluent construction of a [`RadarClient`].
///
/// # Example
///
/// ```no_run
/// use project_radar::RadarClientBuilder;
/// use project_radar::resilience::RetryPolicy;
/// use secrecy::SecretString;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RadarClientBuilder::new()
///     .api_key(SecretString::new("your-api-key".into()))
///     .retry_policy(RetryPolicy::from_millis(&[1000, 2000]))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct RadarClientBuilder {
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

    // Injectable dependencies for testing
    transport: Option<Arc<dyn HttpTransport>>,
    content_service: Option<Arc<dyn ContentService>>,
    logger: Option<Arc<dyn Logger>>,
    tracer: Option<Arc<dyn Tracer>>,
    metrics: Option<Arc<dyn MetricsRecorder>>,
}

impl RadarClientBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-filled from `config`.
    pub fn from_config(config: RadarConfig) -> Self {
        Self {
            api_key: Some(config.api_key),
            base_url: Some(config.base_url),
            api_version: Some(config.api_version),
            timeout: Some(config.timeout),
            connect_timeout: Some(config.connect_timeout),
            retry_policy: Some(config.retry_policy),
            text_model: Some(config.text_model),
            image_model: Some(config.image_model),
            analysis_temperature: Some(config.analysis_temperature),
            log_level: Some(config.log_level),
            auth_method: Some(config.auth_method),
            ..Self::default()
        }
    }

    /// Sets the API key; otherwise the environment is consulted.
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the base URL from a string, e.g. a mock server address.
    pub fn base_url_str(mut self, url: &str) -> Result<Self, RadarError> {
        self.base_url = Some(Url::parse(url)?);
        Ok(self)
    }

    /// Sets the API version path segment.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Sets the delay table used by every analysis operation.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets the model used for text analysis and search.
    pub fn text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = Some(model.into());
        self
    }

    /// Sets the model used for image editing.
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }

    /// Sets the sampling temperature for report analysis.
    pub fn analysis_temperature(mut self, temperature: f32) -> Self {
        self.analysis_temperature = Some(temperature);
        self
    }

    /// Sets the minimum level for the default logger.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Sets how the API key is attached to requests.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Sets a custom HTTP transport (for testing).
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the HTTP-backed content service (for testing).
    pub fn content_service(mut self, service: Arc<dyn ContentService>) -> Self {
        self.content_service = Some(service);
        self
    }

    /// Sets a custom logger (for testing).
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets a custom tracer (for testing).
    pub fn tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Sets a custom metrics recorder (for testing).
    pub fn metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no API key was given and none is set in the environment
    /// - a configuration value is out of range
    /// - the HTTP transport cannot be created
    pub fn build(self) -> Result<RadarClient, RadarError> {
        // explicit key, then GEMINI_API_KEY, GOOGLE_API_KEY, API_KEY
        let api_key = self
            .api_key
            .or_else(|| {
                API_KEY_VARS
                    .iter()
                    .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
                    .map(SecretString::new)
            })
            .ok_or(ConfigurationError::MissingApiKey)?;

        let mut config = RadarConfig::builder().api_key(api_key);
        if let Some(url) = self.base_url {
            config = config.base_url(url.as_str())?;
        }
        if let Some(version) = &self.api_version {
            config = config.api_version(version);
        }
        if let Some(timeout) = self.timeout {
            config = config.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            config = config.connect_timeout(timeout);
        }
        if let Some(policy) = self.retry_policy {
            config = config.retry_policy(policy);
        }
        if let Some(model) = &self.text_model {
            config = config.text_model(model);
        }
        if let Some(model) = &self.image_model {
            config = config.image_model(model);
        }
        if let Some(temperature) = self.analysis_temperature {
            config = config.analysis_temperature(temperature);
        }
        if let Some(level) = self.log_level {
            config = config.log_level(level);
        }
        if let Some(method) = self.auth_method {
            config = config.auth_method(method);
        }
        let config = config.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::from_config(&config).map_err(|e| {
                RadarError::Network(NetworkError::ConnectionFailed {
                    message: format!("Failed to create HTTP transport: {}", e),
                })
            })?),
        };

        let auth_manager: Arc<dyn AuthManager> = Arc::new(ApiKeyAuthManager::from_config(&config));

        let (default_logger, default_tracer, default_metrics) =
            create_default_stack(SERVICE_NAME, config.log_level);
        let logger = self.logger.unwrap_or(default_logger);
        let tracer = self.tracer.unwrap_or(default_tracer);
        let metrics = match self.metrics {
            Some(recorder) => RadarMetrics::new(SERVICE_NAME, recorder),
            None => default_metrics,
        };

        logger.info(
            "ProjectRadar client initialized",
            serde_json::json!({
                "base_url": config.base_url.as_str(),
                "api_version": config.api_version,
                "auth_method": format!("{:?}", config.auth_method),
                "text_model": config.text_model,
                "image_model": config.image_model,
                "retry_delays_ms": config
                    .retry_policy
                    .delays()
                    .iter()
                    .map(|d| d.as_millis() as u64)
                    .collect::<Vec<_>>(),
            }),
        );

        let gateway = RetryGateway::new(config.retry_policy.clone());

        Ok(RadarClient::from_parts(
            config,
            transport,
            auth_manager,
            gateway,
            self.content_service,
            logger,
            tracer,
            metrics,
        ))
    }
}
