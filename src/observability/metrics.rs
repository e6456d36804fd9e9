//! Metrics recording for the ProjectRadar client.

use std::collections::HashMap;
use std::sync::Arc;

/// Backend that receives metric samples.
pub trait MetricsRecorder: Send + Sync {
    /// Increment a counter by one.
    fn increment_counter(&self, name: &str, labels: &[(&str, &str)]);

    /// Record a histogram sample.
    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]);
}

/// Named metrics for remote calls and analysis operations.
#[derive(Clone)]
pub struct RadarMetrics {
    prefix: String,
    recorder: Arc<dyn MetricsRecorder>,
}

impl RadarMetrics {
    /// Create metrics with `prefix` on every metric name.
    pub fn new(prefix: &str, recorder: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            prefix: prefix.to_string(),
            recorder,
        }
    }

    /// Metrics that go nowhere.
    pub fn noop() -> Self {
        Self::new("radar", Arc::new(NoopMetricsRecorder))
    }

    fn name(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// One HTTP round trip.
    pub fn record_request(&self, model: &str, status: u16, duration_ms: u64) {
        let status = status.to_string();
        self.recorder.increment_counter(
            &self.name("requests_total"),
            &[("model", model), ("status", &status)],
        );
        #[allow(clippy::cast_precision_loss)]
        self.recorder.record_histogram(
            &self.name("request_duration_ms"),
            duration_ms as f64,
            &[("model", model)],
        );
    }

    /// Token usage reported by the service.
    pub fn record_tokens(&self, model: &str, prompt_tokens: i32, completion_tokens: i32) {
        let labels = [("model", model)];
        self.recorder.record_histogram(&self.name("prompt_tokens"), f64::from(prompt_tokens), &labels);
        self.recorder.record_histogram(&self.name("completion_tokens"), f64::from(completion_tokens), &labels);
    }

    /// A prompt or candidate blocked for safety.
    pub fn record_safety_block(&self, model: &str, reason: &str) {
        self.recorder.increment_counter(
            &self.name("safety_blocks_total"),
            &[("model", model), ("reason", reason)],
        );
    }

    /// A retry scheduled by the gateway.
    pub fn record_retry(&self, operation: &str, attempt: u32) {
        let attempt = attempt.to_string();
        self.recorder.increment_counter(
            &self.name("retries_total"),
            &[("operation", operation), ("attempt", &attempt)],
        );
    }

    /// Final outcome of an analysis operation, after all retries.
    pub fn record_operation(&self, operation: &str, success: bool) {
        self.recorder.increment_counter(
            &self.name("operations_total"),
            &[("operation", operation), ("outcome", if success { "success" } else { "failure" })],
        );
    }
}

impl std::fmt::Debug for RadarMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadarMetrics").field("prefix", &self.prefix).finish_non_exhaustive()
    }
}

/// Recorder that emits samples as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetricsRecorder;

impl MetricsRecorder for TracingMetricsRecorder {
    fn increment_counter(&self, name: &str, labels: &[(&str, &str)]) {
        let labels: HashMap<&str, &str> = labels.iter().copied().collect();
        tracing::debug!(
            metric_type = "counter",
            metric_name = name,
            metric_value = 1,
            labels = ?labels,
            "Counter incremented"
        );
    }

    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        let labels: HashMap<&str, &str> = labels.iter().copied().collect();
        tracing::debug!(
            metric_type = "histogram",
            metric_name = name,
            metric_value = value,
            labels = ?labels,
            "Histogram recorded"
        );
    }
}

/// Recorder that discards every sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetricsRecorder;

impl MetricsRecorder for NoopMetricsRecorder {
    fn increment_counter(&self, _name: &str, _labels: &[(&str, &str)]) {}

    fn record_histogram(&self, _name: &str, _value: f64, _labels: &[(&str, &str)]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingRecorder {
        counters: Mutex<Vec<(String, Vec<(String, String)>)>>,
        histograms: Mutex<Vec<(String, f64)>>,
    }

    impl MetricsRecorder for CapturingRecorder {
        fn increment_counter(&self, name: &str, labels: &[(&str, &str)]) {
            let labels = labels.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
            self.counters.lock().unwrap().push((name.to_string(), labels));
        }

        fn record_histogram(&self, name: &str, value: f64, _labels: &[(&str, &str)]) {
            self.histograms.lock().unwrap().push((name.to_string(), value));
        }
    }

    #[test]
    fn test_record_request() {
        let recorder = Arc::new(CapturingRecorder::default());
        let metrics = RadarMetrics::new("radar", recorder.clone());

        metrics.record_request("gemini-2.5-flash", 200, 1234);

        let counters = recorder.counters.lock().unwrap();
        assert_eq!(counters[0].0, "radar_requests_total");
        assert!(counters[0].1.contains(&("status".to_string(), "200".to_string())));
        assert_eq!(recorder.histograms.lock().unwrap()[0], ("radar_request_duration_ms".to_string(), 1234.0));
    }

    #[test]
    fn test_record_retry_and_outcome() {
        let recorder = Arc::new(CapturingRecorder::default());
        let metrics = RadarMetrics::new("radar", recorder.clone());

        metrics.record_retry("analyze_report", 2);
        metrics.record_operation("analyze_report", false);

        let counters = recorder.counters.lock().unwrap();
        assert_eq!(counters[0].0, "radar_retries_total");
        assert!(counters[0].1.contains(&("attempt".to_string(), "2".to_string())));
        assert_eq!(counters[1].0, "radar_operations_total");
        assert!(counters[1].1.contains(&("outcome".to_string(), "failure".to_string())));
    }

    #[test]
    fn test_record_tokens() {
        let recorder = Arc::new(CapturingRecorder::default());
        let metrics = RadarMetrics::new("radar", recorder.clone());

        metrics.record_tokens("gemini-2.5-flash", 100, 50);

        let histograms = recorder.histograms.lock().unwrap();
        assert_eq!(histograms.len(), 2);
        assert_eq!(histograms[1], ("radar_completion_tokens".to_string(), 50.0));
    }
}
