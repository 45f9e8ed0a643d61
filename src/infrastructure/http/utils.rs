//! HTTP utilities - filters injecting shared state into routes

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use warp::Filter;

use crate::application::MethodRegistry;
use crate::shared::MetricsDiagnostics;

/// Helper function to inject the method registry into route
pub fn with_registry(
    registry: Arc<MethodRegistry>,
) -> impl Filter<Extract = (Arc<MethodRegistry>,), Error = Infallible> + Clone {
    warp::any().map(move || registry.clone())
}

/// Helper function to inject the dispatch timeout into route
pub fn with_timeout(
    timeout: Duration,
) -> impl Filter<Extract = (Duration,), Error = Infallible> + Clone {
    warp::any().map(move || timeout)
}

/// Helper function to inject the optional metrics collector into route
pub fn with_metrics(
    metrics: Option<Arc<MetricsDiagnostics>>,
) -> impl Filter<Extract = (Option<Arc<MetricsDiagnostics>>,), Error = Infallible> + Clone {
    warp::any().map(move || metrics.clone())
}
