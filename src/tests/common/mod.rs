//! Common test fixtures
//!
//! Handlers with observable behavior and a diagnostic sink that records
//! every event it receives.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::{DiagnosticSink, MethodCall, MethodResult, RemoteMethod};

/// Capability object counting its invocations
#[derive(Default)]
pub struct CountingMethod {
    calls: AtomicU32,
}

impl CountingMethod {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteMethod for CountingMethod {
    async fn call_method(&self, _call: &MethodCall) -> MethodResult {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(json!(n))
    }
}

/// Capability object that always fails with `message`
pub struct FailingMethod {
    pub message: String,
}

#[async_trait]
impl RemoteMethod for FailingMethod {
    async fn call_method(&self, _call: &MethodCall) -> MethodResult {
        anyhow::bail!("{}", self.message)
    }
}

/// Capability object that sleeps before echoing the parameter
pub struct SlowMethod {
    pub delay: Duration,
}

#[async_trait]
impl RemoteMethod for SlowMethod {
    async fn call_method(&self, call: &MethodCall) -> MethodResult {
        tokio::time::sleep(self.delay).await;
        Ok(call.parameter.clone())
    }
}

/// A recorded diagnostic event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NotFound(String),
    Failed { method: String, cause: String },
    Defect(String),
    Completed { method: String, success: bool },
}

/// Diagnostic sink recording every event
#[derive(Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<Event>>,
}

impl RecordingDiagnostics {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn push(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn method_not_found(&self, method: &str) {
        self.push(Event::NotFound(method.to_string()));
    }

    fn execution_failed(&self, method: &str, cause: &str) {
        self.push(Event::Failed {
            method: method.to_string(),
            cause: cause.to_string(),
        });
    }

    fn configuration_defect(&self, method: &str, _detail: &str) {
        self.push(Event::Defect(method.to_string()));
    }

    fn completed(&self, method: &str, _elapsed: Duration, success: bool) {
        self.push(Event::Completed {
            method: method.to_string(),
            success,
        });
    }
}

/// Build a call envelope
pub fn call(method: &str, parameter: Value) -> MethodCall {
    MethodCall::new(method, parameter)
}
