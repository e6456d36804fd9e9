//! Lightweight spans around remote calls.

use std::collections::HashMap;
use std::time::Instant;

/// Creates spans.
pub trait Tracer: Send + Sync {
    /// Start a new span with the given name.
    fn start_span(&self, name: &str) -> Box<dyn Span>;
}

/// A span in progress.
pub trait Span: Send {
    /// Set an attribute on the span.
    fn set_attribute(&mut self, key: &str, value: &str);

    /// Set the final status.
    fn set_status(&mut self, status: SpanStatus);

    /// End the span, emitting its duration and attributes.
    fn end(self: Box<Self>);
}

/// Outcome of a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanStatus {
    /// Completed normally.
    Ok,
    /// Failed with the given message.
    Error(String),
}

/// Tracer that reports spans as `tracing` events.
pub struct TracingTracer {
    service_name: String,
}

impl TracingTracer {
    /// Create a tracer for `service_name`.
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
        }
    }
}

impl Tracer for TracingTracer {
    fn start_span(&self, name: &str) -> Box<dyn Span> {
        tracing::debug!(service = %self.service_name, span_name = %name, "Span started");

        Box::new(TracingSpan {
            name: name.to_string(),
            service_name: self.service_name.clone(),
            start: Instant::now(),
            attributes: HashMap::new(),
            status: None,
        })
    }
}

/// Span emitted through `tracing` when it ends.
pub struct TracingSpan {
    name: String,
    service_name: String,
    start: Instant,
    attributes: HashMap<String, String>,
    status: Option<SpanStatus>,
}

impl TracingSpan {
    fn status_label(&self) -> &'static str {
        match self.status {
            Some(SpanStatus::Ok) => "ok",
            Some(SpanStatus::Error(_)) => "error",
            None => "unset",
        }
    }
}

impl Span for TracingSpan {
    fn set_attribute(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    fn set_status(&mut self, status: SpanStatus) {
        if let SpanStatus::Error(message) = &status {
            tracing::debug!(span_name = %self.name, error = %message, "Span failed");
        }
        self.status = Some(status);
    }

    fn end(self: Box<Self>) {
        tracing::info!(
            service = %self.service_name,
            span_name = %self.name,
            duration_ms = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX),
            status = self.status_label(),
            attributes = ?self.attributes,
            "Span ended"
        );
    }
}

/// Tracer whose spans do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn start_span(&self, _name: &str) -> Box<dyn Span> {
        Box::new(NoopSpan)
    }
}

struct NoopSpan;

impl Span for NoopSpan {
    fn set_attribute(&mut self, _key: &str, _value: &str) {}
    fn set_status(&mut self, _status: SpanStatus) {}
    fn end(self: Box<Self>) {}
}
