//! HTTP request handlers
//!
//! The call handler decodes nothing itself: warp hands it a parsed
//! [`MethodCall`] and it replies with the serialized [`CallResult`].
//! A failure result is a normal answer and is sent with `200 OK`.

use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::application::MethodRegistry;
use crate::domain::{CallResult, MethodCall};
use crate::shared::{LoggingUtils, MetricsDiagnostics};

/// Handle a remote method call
#[instrument(skip_all, fields(method = ?call.method))]
pub async fn handle_call(
    call: MethodCall,
    registry: Arc<MethodRegistry>,
    timeout: Duration,
) -> Result<impl Reply, Rejection> {
    let request_id = LoggingUtils::generate_request_id();
    LoggingUtils::log_call(&request_id, call.method_name());

    let result = match tokio::time::timeout(timeout, registry.dispatch(&call)).await {
        Ok(result) => result,
        Err(_) => {
            let method = call.method_name().unwrap_or_default();
            warn!(
                request_id = %request_id,
                method = %method,
                timeout_ms = %timeout.as_millis(),
                "Remote method call timed out"
            );
            CallResult::from(registry.report_timeout(method, timeout))
        }
    };

    Ok(warp::reply::json(&result))
}

/// List registered method names
pub async fn handle_methods(registry: Arc<MethodRegistry>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&json!({ "methods": registry.method_names() })))
}

/// Liveness check
pub async fn handle_health(registry: Arc<MethodRegistry>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "methods": registry.len(),
    })))
}

/// Export prometheus metrics
pub async fn handle_metrics(
    metrics: Option<Arc<MetricsDiagnostics>>,
) -> Result<warp::reply::Response, Rejection> {
    let Some(metrics) = metrics else {
        return Ok(warp::reply::with_status("metrics disabled", StatusCode::NOT_FOUND).into_response());
    };

    match metrics.export() {
        Ok(text) => Ok(warp::reply::with_header(
            text,
            "content-type",
            "text/plain; version=0.0.4",
        )
        .into_response()),
        Err(e) => {
            warn!(error = %e, "Failed to export metrics");
            Ok(warp::reply::with_status(
                "metrics unavailable",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response())
        }
    }
}

/// Turn rejections into JSON error bodies
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, "Malformed method call")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request too large")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&json!({ "error": message })),
        status,
    ))
}
