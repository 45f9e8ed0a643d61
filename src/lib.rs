//! Method API - a remote method dispatch registry
//!
//! Maps the method name carried by an incoming [`MethodCall`] to a locally
//! registered [`RemoteMethod`], invokes it and normalizes the outcome into
//! a [`CallResult`]. Unknown methods, failing handlers and broken registry
//! entries all come back as failure results with a generic, non-leaking
//! message; dispatch never returns an error or unwinds into its caller.
//!
//! ```ignore
//! use method_api::{MethodCall, MethodRegistry};
//! use serde_json::json;
//!
//! let mut registry = MethodRegistry::new();
//! registry.register_fn("echo", |call: MethodCall| async move {
//!     Ok(call.parameter["value"].clone())
//! });
//!
//! let result = registry
//!     .dispatch(&MethodCall::new("echo", json!({"value": "x"})))
//!     .await;
//! assert_eq!(result.value(), Some(&json!("x")));
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;


pub use application::{MethodRegistry, RegistrySetup};
pub use config::AppConfig;
pub use domain::{
    CallFailure, CallResult, DiagnosticSink, FailureKind, MethodCall, MethodResult, RemoteMethod,
};
pub use infrastructure::HttpServer;
pub use shared::error::{AppError, AppResult, DispatchError};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
