//! Error handling module
//!
//! This module provides centralized error handling for the application.

use thiserror::Error;

use crate::domain::CallFailure;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<prometheus::Error> for AppError {
    fn from(err: prometheus::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Why a dispatch did not produce a handler value.
///
/// The `Display` output carries the real cause and is meant for
/// diagnostics only; callers receive [`DispatchError::to_failure`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Method not found: {method}")]
    MethodNotFound { method: String },

    #[error("Execution of {method} failed: {cause}")]
    ExecutionFailure { method: String, cause: String },

    #[error("Configuration defect for {method}: {detail}")]
    ConfigurationDefect { method: String, detail: String },
}

impl DispatchError {
    /// The attempted method name
    pub fn method(&self) -> &str {
        match self {
            DispatchError::MethodNotFound { method }
            | DispatchError::ExecutionFailure { method, .. }
            | DispatchError::ConfigurationDefect { method, .. } => method,
        }
    }

    /// Caller-safe failure without the internal detail
    pub fn to_failure(&self) -> CallFailure {
        match self {
            DispatchError::MethodNotFound { method } => CallFailure::method_not_supported(method),
            DispatchError::ExecutionFailure { method, .. } => CallFailure::execution_error(method),
            DispatchError::ConfigurationDefect { method, .. } => CallFailure::internal_error(method),
        }
    }
}
