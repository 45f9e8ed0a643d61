//! Route configuration
//!
//! - `POST /call`    dispatch a JSON method call
//! - `GET /methods`  registered method names
//! - `GET /health`   liveness
//! - `GET /metrics`  prometheus text export

use std::sync::Arc;
use std::time::Duration;
use warp::Filter;

use super::handlers::{handle_call, handle_health, handle_methods, handle_metrics, handle_rejection};
use super::utils::{with_metrics, with_registry, with_timeout};
use crate::application::MethodRegistry;
use crate::shared::MetricsDiagnostics;

/// Route builder
pub struct RouteBuilder;

impl RouteBuilder {
    /// Build every route with rejection recovery
    pub fn build_routes(
        registry: Arc<MethodRegistry>,
        metrics: Option<Arc<MetricsDiagnostics>>,
        timeout: Duration,
        max_request_size: u64,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        Self::call_route(registry.clone(), timeout, max_request_size)
            .or(Self::methods_route(registry.clone()))
            .or(Self::health_route(registry))
            .or(Self::metrics_route(metrics))
            .recover(handle_rejection)
    }

    /// Create the call endpoint route
    pub fn call_route(
        registry: Arc<MethodRegistry>,
        timeout: Duration,
        max_request_size: u64,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("call")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(max_request_size))
            .and(warp::body::json())
            .and(with_registry(registry))
            .and(with_timeout(timeout))
            .and_then(handle_call)
    }

    /// Create the method listing route
    pub fn methods_route(
        registry: Arc<MethodRegistry>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("methods")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_registry(registry))
            .and_then(handle_methods)
    }

    /// Create the health check route
    pub fn health_route(
        registry: Arc<MethodRegistry>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_registry(registry))
            .and_then(handle_health)
    }

    /// Create the metrics route
    pub fn metrics_route(
        metrics: Option<Arc<MetricsDiagnostics>>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("metrics")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_metrics(metrics))
            .and_then(handle_metrics)
    }
}
