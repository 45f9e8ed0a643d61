//! Normalized dispatch outcomes

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Category of a failed dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No handler registered under the requested name
    MethodNotSupported,
    /// The handler returned an error or panicked
    ExecutionError,
    /// The registry entry could not be resolved to a handler
    InternalError,
}

/// Caller-safe description of a failed dispatch.
///
/// The message never contains the underlying handler error. Execution and
/// internal failures use a fixed message; the attempted name travels in
/// `method` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFailure {
    pub kind: FailureKind,
    pub message: String,
    pub method: String,
}

impl CallFailure {
    pub fn method_not_supported(method: &str) -> Self {
        Self {
            kind: FailureKind::MethodNotSupported,
            message: format!("Remote method '{}' not supported.", method),
            method: method.to_string(),
        }
    }

    pub fn execution_error(method: &str) -> Self {
        Self {
            kind: FailureKind::ExecutionError,
            message: "There was an error while executing the remote method.".to_string(),
            method: method.to_string(),
        }
    }

    pub fn internal_error(method: &str) -> Self {
        Self {
            kind: FailureKind::InternalError,
            message: "The remote method is not available due to an internal error.".to_string(),
            method: method.to_string(),
        }
    }
}

/// Outcome of a dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    /// The handler's return value, unmodified
    Success(Value),
    Failure(CallFailure),
}

impl CallResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success(_))
    }

    /// The success value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            CallResult::Success(value) => Some(value),
            CallResult::Failure(_) => None,
        }
    }

    /// The failure, if any
    pub fn failure(&self) -> Option<&CallFailure> {
        match self {
            CallResult::Success(_) => None,
            CallResult::Failure(failure) => Some(failure),
        }
    }

    /// Convert into the wire representation
    pub fn into_value(self) -> Value {
        match self {
            CallResult::Success(value) => value,
            CallResult::Failure(failure) => serde_json::json!({
                "error": failure.message,
                "method": failure.method,
            }),
        }
    }
}

impl From<CallFailure> for CallResult {
    fn from(failure: CallFailure) -> Self {
        CallResult::Failure(failure)
    }
}

// Success serializes as the bare value, failure as `{"error", "method"}`.
impl Serialize for CallResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CallResult::Success(value) => value.serialize(serializer),
            CallResult::Failure(failure) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", &failure.message)?;
                map.serialize_entry("method", &failure.method)?;
                map.end()
            }
        }
    }
}
