//! The ProjectRadar client.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::RadarConfig;
use crate::error::RadarError;
use crate::observability::{Logger, RadarMetrics, Tracer};
use crate::resilience::RetryGateway;
use crate::services::{AnalysisService, ContentService, ContentServiceImpl};
use crate::transport::HttpTransport;

use super::builder::RadarClientBuilder;

/// Access point to the content and analysis services.
///
/// Services are built on first access and shared afterwards. The client is
/// `Send + Sync`; wrap it in an `Arc` to use it from several tasks.
///
/// # Example
///
/// ```no_run
/// use project_radar::RadarClient;
/// use project_radar::simulation::AppMode;
/// use project_radar::services::Attachment;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RadarClient::from_env()?;
/// let report = Attachment::from_path("october.pdf").await?;
/// let summary = client
///     .analysis()
///     .analyze_document(&report, AppMode::Education, None)
///     .await?;
/// println!("{summary}");
/// # Ok(())
/// # }
/// ```
pub struct RadarClient {
    config: RadarConfig,
    transport: Arc<dyn HttpTransport>,
    auth_manager: Arc<dyn AuthManager>,
    gateway: RetryGateway,

    // Lazy-initialized services
    content_service: OnceCell<Arc<dyn ContentService>>,
    analysis_service: OnceCell<AnalysisService>,

    // Observability
    logger: Arc<dyn Logger>,
    tracer: Arc<dyn Tracer>,
    metrics: RadarMetrics,
}

impl RadarClient {
    /// Creates a new client builder.
    pub fn builder() -> RadarClientBuilder {
        RadarClientBuilder::new()
    }

    /// Creates a client from a configuration object.
    pub fn new(config: RadarConfig) -> Result<Self, RadarError> {
        RadarClientBuilder::from_config(config).build()
    }

    /// Creates a client from environment variables.
    ///
    /// See [`RadarConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, RadarError> {
        Self::new(RadarConfig::from_env()?)
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn from_parts(
        config: RadarConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        gateway: RetryGateway,
        content_service: Option<Arc<dyn ContentService>>,
        logger: Arc<dyn Logger>,
        tracer: Arc<dyn Tracer>,
        metrics: RadarMetrics,
    ) -> Self {
        let content = OnceCell::new();
        if let Some(service) = content_service {
            let _ = content.set(service);
        }

        Self {
            config,
            transport,
            auth_manager,
            gateway,
            content_service: content,
            analysis_service: OnceCell::new(),
            logger,
            tracer,
            metrics,
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// The gateway shared by all analysis operations.
    pub fn gateway(&self) -> &RetryGateway {
        &self.gateway
    }

    /// Single-shot content generation, without retries.
    pub fn content(&self) -> &dyn ContentService {
        self.content_arc().as_ref()
    }

    /// Retry-gated report analysis, comparison, search and image editing.
    pub fn analysis(&self) -> &AnalysisService {
        self.analysis_service.get_or_init(|| {
            AnalysisService::new(
                Arc::clone(self.content_arc()),
                self.gateway.clone(),
                &self.config,
                self.metrics.clone(),
            )
        })
    }

    fn content_arc(&self) -> &Arc<dyn ContentService> {
        self.content_service.get_or_init(|| {
            Arc::new(ContentServiceImpl::new(
                &self.config,
                Arc::clone(&self.transport),
                self.auth_manager.as_ref(),
                Arc::clone(&self.logger),
                Arc::clone(&self.tracer),
                self.metrics.clone(),
            ))
        })
    }
}

impl std::fmt::Debug for RadarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadarClient")
            .field("config", &self.config)
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}

/// Create a client from configuration.
pub fn create_client(config: RadarConfig) -> Result<Arc<RadarClient>, RadarError> {
    Ok(Arc::new(RadarClient::new(config)?))
}

/// Create a client from environment variables.
pub fn create_client_from_env() -> Result<Arc<RadarClient>, RadarError> {
    create_client(RadarConfig::from_env()?)
}
