//! Call envelope - the incoming record naming the target method

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded remote method call.
///
/// Handlers always receive the whole envelope, so a handler can read the
/// method name it was invoked under (useful behind aliases) as well as the
/// parameter payload. The payload is opaque to the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Target method name
    #[serde(default, alias = "methodName", skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Parameter payload passed through to the handler
    #[serde(default)]
    pub parameter: Value,
}

impl MethodCall {
    /// Create a call for `method` carrying `parameter`
    pub fn new(method: impl Into<String>, parameter: Value) -> Self {
        Self {
            method: Some(method.into()),
            parameter,
        }
    }

    /// Create a call without a method name
    pub fn anonymous(parameter: Value) -> Self {
        Self {
            method: None,
            parameter,
        }
    }

    /// The method name, with an empty string treated as absent
    pub fn method_name(&self) -> Option<&str> {
        self.method.as_deref().filter(|name| !name.is_empty())
    }
}
