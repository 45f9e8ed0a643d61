//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::app_config::{AppConfig, DispatchConfig, LoggingConfig};
use crate::shared::error::{AppError, AppResult};

/// Accepted method name shape for configured aliases
const METHOD_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_.:\-]*$";

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> AppResult<()> {
        Self::validate_logging_config(&config.logging)?;
        Self::validate_dispatch_config(&config.dispatch)?;

        Ok(())
    }

    /// Whether `name` is an acceptable method name
    pub fn is_valid_method_name(name: &str) -> bool {
        static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
        PATTERN
            .get_or_init(|| Regex::new(METHOD_NAME_PATTERN).ok())
            .as_ref()
            .is_some_and(|re| re.is_match(name))
    }

    fn validate_logging_config(logging: &LoggingConfig) -> AppResult<()> {
        if !["json", "text"].contains(&logging.format.to_ascii_lowercase().as_str()) {
            return Err(AppError::Validation(format!(
                "Invalid log format: {}",
                logging.format
            )));
        }

        Ok(())
    }

    fn validate_dispatch_config(dispatch: &DispatchConfig) -> AppResult<()> {
        for (alias, target) in &dispatch.aliases {
            if !Self::is_valid_method_name(alias) {
                return Err(AppError::Validation(format!("Invalid alias name: {:?}", alias)));
            }

            if !Self::is_valid_method_name(target) {
                return Err(AppError::Validation(format!(
                    "Invalid alias target for {}: {:?}",
                    alias, target
                )));
            }

            if alias == target {
                return Err(AppError::Validation(format!(
                    "Alias {} must not point to itself",
                    alias
                )));
            }
        }

        Ok(())
    }
}
