//! Observability for the ProjectRadar client.
//!
//! Trait-based logging, spans and metrics, all backed by `tracing` by default
//! and replaceable with no-op implementations in tests.
//!
//! ```rust
//! use project_radar::observability::{Logger, StructuredLogger};
//! use project_radar::config::LogLevel;
//! use serde_json::json;
//!
//! let logger = StructuredLogger::new("radar.analysis").with_level(LogLevel::Debug);
//! logger.info("Report analyzed", json!({"model": "gemini-2.5-flash", "api_key": "hidden"}));
//! ```

pub mod logging;
pub mod metrics;
pub mod tracing;

pub use logging::{init_subscriber, Logger, NoopLogger, StructuredLogger};
pub use metrics::{MetricsRecorder, NoopMetricsRecorder, RadarMetrics, TracingMetricsRecorder};
pub use tracing::{NoopTracer, Span, SpanStatus, Tracer, TracingSpan, TracingTracer};

use std::sync::Arc;
use crate::config::LogLevel;

/// Create the default `tracing`-backed stack, logging at `level` and above.
pub fn create_default_stack(
    service_name: &str,
    level: LogLevel,
) -> (Arc<dyn Logger>, Arc<dyn Tracer>, RadarMetrics) {
    (
        Arc::new(StructuredLogger::new(service_name).with_level(level)),
        Arc::new(TracingTracer::new(service_name)),
        RadarMetrics::new(service_name, Arc::new(TracingMetricsRecorder)),
    )
}

/// Create a stack that records nothing.
pub fn create_noop_stack() -> (Arc<dyn Logger>, Arc<dyn Tracer>, RadarMetrics) {
    (Arc::new(NoopLogger), Arc::new(NoopTracer), RadarMetrics::noop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_stack_prefixes_metrics_with_service_name() {
        let (logger, tracer, metrics) = create_default_stack("radar_test", LogLevel::Debug);

        logger.debug("stack ready", json!({"api_key": "hidden"}));
        let mut span = tracer.start_span("radar_test.op");
        span.set_attribute("model", "gemini-2.5-flash");
        span.set_status(SpanStatus::Ok);
        span.end();
        metrics.record_operation("analysis", true);

        assert!(format!("{:?}", metrics).contains("radar_test"));
    }

    #[test]
    fn test_noop_stack_accepts_every_call() {
        let (logger, tracer, metrics) = create_noop_stack();

        logger.error("ignored", json!({}));
        let mut span = tracer.start_span("ignored");
        span.set_status(SpanStatus::Error("boom".into()));
        span.end();
        metrics.record_retry("analysis", 2);

        assert!(format!("{:?}", metrics).contains("radar"));
    }
}
