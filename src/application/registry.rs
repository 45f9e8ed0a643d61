//! Method registry - name to handler mapping and the dispatch path
//!
//! Registration happens during setup through `&mut self`; afterwards the
//! registry is shared (typically as `Arc<MethodRegistry>`) and `dispatch`
//! only ever reads the map, so any number of dispatches may run
//! concurrently.

use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::error;

use crate::domain::{
    CallFailure, CallResult, DiagnosticSink, FnMethod, MethodCall, MethodResult, NoopDiagnostics,
    RemoteMethod, TypedMethod,
};
use crate::shared::error::DispatchError;

/// Maximum number of alias hops followed while resolving a name
pub const MAX_ALIAS_DEPTH: usize = 8;

/// A registry slot
enum Entry {
    Method(Arc<dyn RemoteMethod>),
    Alias(String),
}

/// Registry mapping method names to handlers
pub struct MethodRegistry {
    methods: HashMap<String, Entry>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl MethodRegistry {
    /// Create an empty registry that discards diagnostics
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
            diagnostics: Arc::new(NoopDiagnostics),
        }
    }

    /// Use `sink` for internal dispatch diagnostics
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Register a handler under `name`, replacing any previous entry
    pub fn register(&mut self, name: impl Into<String>, method: Arc<dyn RemoteMethod>) {
        self.methods.insert(name.into(), Entry::Method(method));
    }

    /// Register an async closure receiving the whole call envelope
    pub fn register_fn<F, Fut>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(MethodCall) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = MethodResult> + Send + 'static,
    {
        self.register(name, Arc::new(FnMethod::new(handler)));
    }

    /// Register an async closure over a typed parameter payload
    pub fn register_typed<F, P, R, Fut>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        P: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    {
        self.register(name, Arc::new(TypedMethod::new(handler)));
    }

    /// Make `alias` resolve to whatever is registered under `target`.
    ///
    /// The target is looked up at dispatch time, so it may be registered
    /// later. A dangling or cyclic alias is reported as a configuration
    /// defect when called.
    pub fn register_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.methods.insert(alias.into(), Entry::Alias(target.into()));
    }

    /// Remove an entry, returning whether it existed
    pub fn unregister(&mut self, name: &str) -> bool {
        self.methods.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Registered names, aliases included, in ascending order
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }

    /// Follow aliases from `name` to a handler
    fn resolve(&self, name: &str) -> Result<Arc<dyn RemoteMethod>, DispatchError> {
        let mut current = name;

        for _ in 0..=MAX_ALIAS_DEPTH {
            match self.methods.get(current) {
                Some(Entry::Method(method)) => return Ok(method.clone()),
                Some(Entry::Alias(target)) => current = target.as_str(),
                None if current == name => {
                    return Err(DispatchError::MethodNotFound {
                        method: name.to_string(),
                    })
                }
                None => {
                    return Err(DispatchError::ConfigurationDefect {
                        method: name.to_string(),
                        detail: format!("alias target '{}' is not registered", current),
                    })
                }
            }
        }

        Err(DispatchError::ConfigurationDefect {
            method: name.to_string(),
            detail: format!("alias chain longer than {} hops", MAX_ALIAS_DEPTH),
        })
    }

    /// Dispatch a call and keep the internal error detail.
    ///
    /// Handler errors and panics both become
    /// [`DispatchError::ExecutionFailure`]. Nothing is reported to the
    /// diagnostic sink; use [`MethodRegistry::dispatch`] for the
    /// caller-facing path.
    pub async fn try_dispatch(&self, call: &MethodCall) -> Result<Value, DispatchError> {
        let name = call.method_name().ok_or_else(|| DispatchError::MethodNotFound {
            method: call.method.clone().unwrap_or_default(),
        })?;
        let method = self.resolve(name)?;

        match AssertUnwindSafe(method.call_method(call)).catch_unwind().await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(DispatchError::ExecutionFailure {
                method: name.to_string(),
                cause: format!("{:#}", e),
            }),
            Err(payload) => Err(DispatchError::ExecutionFailure {
                method: name.to_string(),
                cause: format!("handler panicked: {}", panic_message(&*payload)),
            }),
        }
    }

    /// Dispatch a call to its handler and normalize the outcome.
    ///
    /// Never fails and never unwinds: an unknown name, a failing or
    /// panicking handler, a panicking diagnostic sink and an unresolvable
    /// entry all end in [`CallResult::Failure`] carrying a generic message.
    pub async fn dispatch(&self, call: &MethodCall) -> CallResult {
        let started = Instant::now();
        let outcome = self.try_dispatch(call).await;

        match outcome {
            Ok(value) => {
                let name = call.method_name().unwrap_or_default();
                self.notify(|sink| sink.completed(name, started.elapsed(), true));
                CallResult::Success(value)
            }
            Err(err) => {
                self.report(&err, started.elapsed());
                CallResult::Failure(err.to_failure())
            }
        }
    }

    /// Report a call abandoned by its caller after `elapsed`.
    ///
    /// Used by transports that stop waiting for a dispatch; the sink sees
    /// an execution failure just as for a failing handler.
    pub fn report_timeout(&self, method: &str, elapsed: Duration) -> CallFailure {
        let err = DispatchError::ExecutionFailure {
            method: method.to_string(),
            cause: format!("timed out after {} ms", elapsed.as_millis()),
        };
        self.report(&err, elapsed);
        err.to_failure()
    }

    fn report(&self, err: &DispatchError, elapsed: Duration) {
        let method = err.method();
        match err {
            DispatchError::MethodNotFound { .. } => {
                self.notify(|sink| sink.method_not_found(method))
            }
            DispatchError::ExecutionFailure { cause, .. } => self.notify(|sink| {
                sink.execution_failed(method, cause);
                sink.completed(method, elapsed, false);
            }),
            DispatchError::ConfigurationDefect { detail, .. } => {
                self.notify(|sink| sink.configuration_defect(method, detail))
            }
        }
    }

    /// Run a sink callback, containing any panic it raises
    fn notify(&self, f: impl FnOnce(&dyn DiagnosticSink)) {
        let sink = self.diagnostics.as_ref();
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| f(sink))) {
            error!(panic = %panic_message(&*payload), "Diagnostic sink panicked");
        }
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
