//! Registry construction from configuration

use std::sync::Arc;
use tracing::info;

use super::builtin::register_builtins;
use super::registry::MethodRegistry;
use crate::config::DispatchConfig;
use crate::domain::FanoutDiagnostics;
use crate::shared::error::AppResult;
use crate::shared::{MetricsDiagnostics, TracingDiagnostics};

/// A configured registry plus its metrics collector, when enabled
pub struct RegistrySetup {
    pub registry: MethodRegistry,
    pub metrics: Option<Arc<MetricsDiagnostics>>,
}

impl RegistrySetup {
    /// Build a registry with the built-in methods, configured aliases and
    /// tracing (plus optional prometheus) diagnostics
    pub fn from_config(dispatch: &DispatchConfig) -> AppResult<Self> {
        let metrics = if dispatch.metrics_enabled {
            Some(Arc::new(MetricsDiagnostics::new()?))
        } else {
            None
        };

        let mut sinks = FanoutDiagnostics::new().with(Arc::new(TracingDiagnostics));
        if let Some(metrics) = &metrics {
            sinks = sinks.with(metrics.clone());
        }

        let mut registry = MethodRegistry::new().with_diagnostics(Arc::new(sinks));
        register_builtins(&mut registry);

        for (alias, target) in &dispatch.aliases {
            registry.register_alias(alias.clone(), target.clone());
        }

        info!(
            methods = registry.len(),
            aliases = dispatch.aliases.len(),
            metrics = metrics.is_some(),
            "Method registry ready"
        );

        Ok(Self { registry, metrics })
    }
}
