//! Metrics utilities module
//!
//! Prometheus backed diagnostic sink counting dispatch outcomes per method.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

use crate::domain::DiagnosticSink;
use crate::shared::error::{AppError, AppResult};

/// Outcome label values
const OUTCOME_SUCCESS: &str = "success";
const OUTCOME_NOT_FOUND: &str = "not_found";
const OUTCOME_EXECUTION_ERROR: &str = "execution_error";
const OUTCOME_CONFIGURATION_DEFECT: &str = "configuration_defect";

/// Method label for names with no registry entry
pub const UNKNOWN_METHOD: &str = "<unknown>";

/// Dispatch metrics collected on a private prometheus registry.
///
/// Only registered names become `method` label values. Unknown names are
/// chosen by callers and are all counted under [`UNKNOWN_METHOD`].
pub struct MetricsDiagnostics {
    registry: Registry,
    calls: IntCounterVec,
    duration: HistogramVec,
}

impl MetricsDiagnostics {
    /// Create the collectors and register them
    pub fn new() -> AppResult<Self> {
        let registry = Registry::new();

        let calls = IntCounterVec::new(
            Opts::new("method_calls_total", "Remote method calls by outcome"),
            &["method", "outcome"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "method_call_duration_seconds",
                "Time spent inside remote method handlers",
            ),
            &["method"],
        )?;

        registry.register(Box::new(calls.clone()))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self {
            registry,
            calls,
            duration,
        })
    }

    /// Number of calls recorded for `method` with `outcome`
    pub fn call_count(&self, method: &str, outcome: &str) -> u64 {
        self.calls.with_label_values(&[method, outcome]).get()
    }

    /// Render all collectors in the prometheus text format
    pub fn export(&self) -> AppResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(AppError::from)?;
        String::from_utf8(buffer).map_err(|e| AppError::Internal(e.to_string()))
    }

    fn record(&self, method: &str, outcome: &str) {
        self.calls.with_label_values(&[method, outcome]).inc();
    }
}

impl DiagnosticSink for MetricsDiagnostics {
    fn method_not_found(&self, _method: &str) {
        self.record(UNKNOWN_METHOD, OUTCOME_NOT_FOUND);
    }

    fn execution_failed(&self, method: &str, _cause: &str) {
        self.record(method, OUTCOME_EXECUTION_ERROR);
    }

    fn configuration_defect(&self, method: &str, _detail: &str) {
        self.record(method, OUTCOME_CONFIGURATION_DEFECT);
    }

    fn completed(&self, method: &str, elapsed: Duration, success: bool) {
        self.duration
            .with_label_values(&[method])
            .observe(elapsed.as_secs_f64());
        if success {
            self.record(method, OUTCOME_SUCCESS);
        }
    }
}
