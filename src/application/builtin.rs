//! Built-in methods registered by the server binary

use serde_json::{json, Value};

use super::registry::MethodRegistry;
use crate::domain::MethodCall;

/// Register `echo`, `ping` and `time`
pub fn register_builtins(registry: &mut MethodRegistry) {
    registry.register_fn("echo", |call: MethodCall| async move { Ok(call.parameter) });
    registry.register_fn("ping", |_call: MethodCall| async move { Ok(json!("pong")) });
    registry.register_fn("time", |_call: MethodCall| async move {
        Ok(Value::String(chrono::Utc::now().to_rfc3339()))
    });
}
