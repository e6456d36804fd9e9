//! Structured logging for the ProjectRadar client.

use serde_json::Value;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use crate::config::LogLevel;
use crate::error::{ConfigurationError, RadarError};

const REDACTED: &str = "***REDACTED***";

const SENSITIVE_KEYS: [&str; 11] = [
    "api_key", "apiKey", "key",
    "token", "access_token", "accessToken",
    "secret", "password", "credential",
    "authorization", "x-goog-api-key",
];

/// Logger trait for structured logging.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

/// Logger that emits `tracing` events with credentials redacted.
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Create a new structured logger with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum log level for this logger.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    /// Replaces credential-like fields at any depth.
    fn redact_sensitive_fields(fields: Value) -> Value {
        match fields {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        if SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(&key)) {
                            (key, Value::String(REDACTED.to_string()))
                        } else {
                            (key, Self::redact_sensitive_fields(value))
                        }
                    })
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.into_iter().map(Self::redact_sensitive_fields).collect()),
            other => other,
        }
    }
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Debug) {
            let fields = Self::redact_sensitive_fields(fields);
            tracing::debug!(logger = %self.name, fields = %fields, "{}", message);
        }
    }

    fn info(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Info) {
            let fields = Self::redact_sensitive_fields(fields);
            tracing::info!(logger = %self.name, fields = %fields, "{}", message);
        }
    }

    fn warn(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Warn) {
            let fields = Self::redact_sensitive_fields(fields);
            tracing::warn!(logger = %self.name, fields = %fields, "{}", message);
        }
    }

    fn error(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Error) {
            let fields = Self::redact_sensitive_fields(fields);
            tracing::error!(logger = %self.name, fields = %fields, "{}", message);
        }
    }
}

/// Logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str, _fields: Value) {}
    fn info(&self, _message: &str, _fields: Value) {}
    fn warn(&self, _message: &str, _fields: Value) {}
    fn error(&self, _message: &str, _fields: Value) {}
}

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence; `level` is the fallback directive. Fails if a
/// global subscriber is already set.
pub fn init_subscriber(level: LogLevel) -> Result<(), RadarError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| {
            ConfigurationError::InvalidConfiguration {
                message: format!("failed to install tracing subscriber: {e}"),
            }
            .into()
        })
}
