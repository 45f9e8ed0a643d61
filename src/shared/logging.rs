//! Logging utilities module
//!
//! This module provides centralized logging functionality and the
//! `tracing` backed diagnostic sink used by the registry.

use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::domain::DiagnosticSink;
use crate::shared::error::{AppError, AppResult};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified level and format.
    ///
    /// `RUST_LOG` takes precedence over `level`. A `format` of `"json"`
    /// selects JSON lines, anything else the human readable formatter.
    pub fn initialize(level: &str, format: &str) -> AppResult<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let result = if format.eq_ignore_ascii_case("json") {
            tracing::subscriber::set_global_default(builder.json().finish())
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };

        result.map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))
    }

    /// Log an incoming call
    pub fn log_call(request_id: &str, method: Option<&str>) {
        info!(
            request_id = %request_id,
            method = method.unwrap_or(""),
            "Dispatching remote method call"
        );
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        format!("req_{}", uuid::Uuid::new_v4().simple())
    }
}

/// Diagnostic sink emitting structured `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn method_not_found(&self, method: &str) {
        debug!(method = %method, "Remote method not supported");
    }

    fn execution_failed(&self, method: &str, cause: &str) {
        warn!(method = %method, error = %cause, "Remote method execution failed");
    }

    fn configuration_defect(&self, method: &str, detail: &str) {
        error!(method = %method, detail = %detail, "Registry entry could not be resolved");
    }

    fn completed(&self, method: &str, elapsed: Duration, success: bool) {
        debug!(
            method = %method,
            duration_ms = %elapsed.as_millis(),
            success = success,
            "Remote method call completed"
        );
    }
}
