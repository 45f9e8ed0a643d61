//! Diagnostic sink contract
//!
//! The registry reports what really happened during a dispatch through a
//! [`DiagnosticSink`], separately from the caller-safe [`CallResult`].
//! Implementations live in `shared` (tracing and prometheus backed).
//!
//! [`CallResult`]: super::result::CallResult

use std::sync::Arc;
use std::time::Duration;

/// Receives internal dispatch diagnostics. All callbacks default to no-ops.
pub trait DiagnosticSink: Send + Sync {
    /// A call named a method that is not registered
    fn method_not_found(&self, _method: &str) {}

    /// A handler returned an error or panicked; `cause` is the real detail
    fn execution_failed(&self, _method: &str, _cause: &str) {}

    /// A registry entry could not be resolved to a handler
    fn configuration_defect(&self, _method: &str, _detail: &str) {}

    /// A dispatch finished after `elapsed`
    fn completed(&self, _method: &str, _elapsed: Duration, _success: bool) {}
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl DiagnosticSink for NoopDiagnostics {}

/// Sink forwarding every event to several sinks in order
#[derive(Default, Clone)]
pub struct FanoutDiagnostics {
    sinks: Vec<Arc<dyn DiagnosticSink>>,
}

impl FanoutDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink
    pub fn with(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl DiagnosticSink for FanoutDiagnostics {
    fn method_not_found(&self, method: &str) {
        for sink in &self.sinks {
            sink.method_not_found(method);
        }
    }

    fn execution_failed(&self, method: &str, cause: &str) {
        for sink in &self.sinks {
            sink.execution_failed(method, cause);
        }
    }

    fn configuration_defect(&self, method: &str, detail: &str) {
        for sink in &self.sinks {
            sink.configuration_defect(method, detail);
        }
    }

    fn completed(&self, method: &str, elapsed: Duration, success: bool) {
        for sink in &self.sinks {
            sink.completed(method, elapsed, success);
        }
    }
}
