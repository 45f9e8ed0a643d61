//! HTTP server hosting a method registry
//!
//! The server is only a transport: it decodes the JSON envelope, applies
//! the configured per-call timeout and hands the call to the registry.

use std::sync::Arc;
use tracing::{info, instrument};
use warp::{Filter, Reply};

use super::routes::RouteBuilder;
use crate::application::{MethodRegistry, RegistrySetup};
use crate::config::AppConfig;
use crate::shared::error::{AppError, AppResult};
use crate::shared::MetricsDiagnostics;

/// HTTP server implementation
pub struct HttpServer {
    config: AppConfig,
    registry: Arc<MethodRegistry>,
    metrics: Option<Arc<MetricsDiagnostics>>,
}

impl HttpServer {
    /// Create a server around an already populated registry
    pub fn new(
        config: AppConfig,
        registry: Arc<MethodRegistry>,
        metrics: Option<Arc<MetricsDiagnostics>>,
    ) -> Self {
        Self {
            config,
            registry,
            metrics,
        }
    }

    /// Create a server with the registry described by `config`
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let setup = RegistrySetup::from_config(&config.dispatch)?;
        Ok(Self::new(config, Arc::new(setup.registry), setup.metrics))
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the hosted registry
    pub fn registry(&self) -> &Arc<MethodRegistry> {
        &self.registry
    }

    /// Run the HTTP server until the process stops
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr = self.config.server_address();
        let addr: std::net::SocketAddr = addr
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        info!(
            address = %addr,
            methods = ?self.registry.method_names(),
            "Starting HTTP server"
        );

        let routes = self.routes();
        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Create the application routes
    pub fn routes(
        &self,
    ) -> impl Filter<Extract = impl Reply, Error = std::convert::Infallible> + Clone {
        RouteBuilder::build_routes(
            self.registry.clone(),
            self.metrics.clone(),
            self.config.dispatch_timeout(),
            self.config.server.max_request_size as u64,
        )
    }
}
