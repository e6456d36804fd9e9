//! # ProjectRadar
//!
//! Retry-gated report analysis on the Google Gemini API, plus the in-memory
//! workspace (organizations, users, projects) the analyses are run for.
//!
//! ## Features
//!
//! - Request-retry gateway with a fixed 5s/10s/15s delay table, progress
//!   observers and cooperative cancellation
//! - Report analysis, feedback, month-over-month comparison, project search
//!   and image editing over `generateContent`
//! - Academic and corporate vocabulary for prompts and navigation
//! - Typed error taxonomy with HTTP status mapping
//! - Observability through `tracing` (logging, spans, metrics)
//! - Secure credential handling with `SecretString`
//! - Mock transport and JSON fixtures for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use project_radar::{create_client, RadarConfig};
//! use project_radar::services::Attachment;
//! use project_radar::simulation::{AppMode, SimulationStore};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RadarConfig::builder()
//!         .api_key(SecretString::new("your-api-key".into()))
//!         .build()?;
//!     let client = create_client(config)?;
//!
//!     let store = SimulationStore::new();
//!     let answer = client
//!         .analysis()
//!         .search_projects("computer vision", store.projects(), None)
//!         .await?;
//!     println!("{answer}");
//!
//!     let report = Attachment::from_path("report.pdf").await?;
//!     let observer = |p: project_radar::RetryProgress| eprintln!("{}", p.status_line());
//!     let summary = client
//!         .analysis()
//!         .analyze_document(&report, AppMode::Education, Some(&observer))
//!         .await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `resilience` - Retry gateway and progress observers
//! - `client` - Client facade and builder
//! - `config` - Configuration types and builder
//! - `auth` - API key authentication
//! - `transport` - HTTP transport layer
//! - `error` - Error types and taxonomy
//! - `types` - `generateContent` wire types
//! - `services` - Content and analysis services
//! - `simulation` - In-memory workspace state

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod resilience;
pub mod services;
pub mod simulation;
pub mod transport;
pub mod types;

// Development/testing modules - always available for integration tests
pub mod fixtures;
pub mod mocks;

// Re-exports for convenience
pub use auth::{ApiKeyAuthManager, AuthManager};
pub use client::{create_client, create_client_from_env, RadarClient, RadarClientBuilder};
pub use config::{
    AuthMethod, LogLevel, RadarConfig, RadarConfigBuilder, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL,
    DEFAULT_TIMEOUT_SECS,
};
pub use error::{
    // Main error types
    Cancelled,
    RadarError,
    RadarResult,
    // Error categories
    AuthenticationError,
    ConfigurationError,
    ContentError,
    NetworkError,
    RateLimitError,
    RequestError,
    ResponseError,
    ServerError,
    ValidationDetail,
    // Error mapping utilities
    map_http_status_with_body,
};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBuilder, ResponseParser,
    TransportError,
};

// Type re-exports
pub use types::{
    Blob, Candidate, Content, FinishReason, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, HarmCategory, HarmProbability, Part, Role, SafetyRating, UsageMetadata,
};

// Service re-exports
pub use services::{AnalysisKind, AnalysisService, Attachment, ContentService};

// Observability re-exports
pub use observability::{
    // Logging
    init_subscriber, Logger, StructuredLogger,
    // Tracing
    Span, SpanStatus, Tracer, TracingSpan, TracingTracer,
    // Metrics
    MetricsRecorder, RadarMetrics, TracingMetricsRecorder,
    // Factory functions
    create_default_stack, create_noop_stack,
};

// Resilience re-exports
pub use resilience::{ChannelObserver, RetryGateway, RetryObserver, RetryPolicy, RetryProgress};
