//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;
use validator::Validate;

use super::validation::ConfigValidator;
use crate::shared::error::{AppError, AppResult};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Maximum request size in bytes
    #[validate(range(min = 1024, max = 10485760))] // 1KB to 10MB
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            max_request_size: 1024 * 1024, // 1MB
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format: "json" or "text"
    #[validate(length(min = 1))]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DispatchConfig {
    /// Time a single call may take before the transport gives up (seconds)
    #[validate(range(min = 1, max = 3600))]
    pub timeout_seconds: u64,

    /// Additional names resolving to registered methods (alias -> target)
    pub aliases: HashMap<String, String>,

    /// Collect prometheus dispatch metrics
    pub metrics_enabled: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            aliases: HashMap::new(),
            metrics_enabled: true,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Dispatch configuration
    pub dispatch: DispatchConfig,
}

impl AppConfig {
    /// Load configuration from `Conf.toml` and `METHOD_API__*` environment variables
    pub fn load() -> AppResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("Conf").required(false))
            .add_source(config::Environment::with_prefix("METHOD_API").separator("__"));

        Self::from_builder(builder)
    }

    /// Load configuration from a TOML document
    pub fn from_toml_str(source: &str) -> AppResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> AppResult<Self> {
        let config = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        config.validate_config()?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> AppResult<()> {
        self.server
            .validate()
            .map_err(|e| AppError::Validation(format!("Configuration validation failed: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| AppError::Validation(format!("Configuration validation failed: {}", e)))?;
        self.dispatch
            .validate()
            .map_err(|e| AppError::Validation(format!("Configuration validation failed: {}", e)))?;

        ConfigValidator::validate_config(self)
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    /// Per-call timeout
    pub fn dispatch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.dispatch.timeout_seconds)
    }
}
