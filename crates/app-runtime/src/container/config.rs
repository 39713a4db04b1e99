//! # Runtime Configuration
//!
//! Unified configuration for logging and module selection.
//!
//! ## Environment Overrides
//!
//! - `APP_LOG_LEVEL`: `trace`, `debug`, `info`, `warn` or `error`
//! - `APP_LOG_TARGET`, `APP_LOG_THREAD_IDS`: `1`/`true` or `0`/`false`
//! - `APP_MODULE_<NAME>`: enable or disable one module, e.g.
//!   `APP_MODULE_STATUS_LOGGER=0` disables the `status-logger` module

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Prefix of per-module enable flags.
const MODULE_ENV_PREFIX: &str = "APP_MODULE_";

/// Accepted log levels.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Module selection.
    pub modules: ModuleConfig,
}

impl RuntimeConfig {
    /// Load from process environment variables on top of the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Load from an explicit set of `(key, value)` pairs on top of the defaults.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "APP_LOG_LEVEL" => config.logging.level = value.to_lowercase(),
                "APP_LOG_TARGET" => {
                    if let Some(flag) = parse_flag(key, value) {
                        config.logging.with_target = flag;
                    }
                }
                "APP_LOG_THREAD_IDS" => {
                    if let Some(flag) = parse_flag(key, value) {
                        config.logging.with_thread_ids = flag;
                    }
                }
                _ => {
                    let Some(module) = key.strip_prefix(MODULE_ENV_PREFIX) else {
                        continue;
                    };
                    if let Some(flag) = parse_flag(key, value) {
                        let name = module.to_lowercase().replace('_', "-");
                        config.modules.enabled.insert(name, flag);
                    }
                }
            }
        }

        config
    }

    /// Validate configuration before startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.logging.level.clone()));
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => {
            warn!("{} must be 1/true or 0/false, ignoring {:?}", key, value);
            None
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Log level is not one of the accepted names.
    #[error("Invalid log level {0:?}: expected one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Maximum level emitted.
    pub level: String,
    /// Include the event target (module path).
    pub with_target: bool,
    /// Include thread ids.
    pub with_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: true,
            with_thread_ids: false,
        }
    }
}

/// Which modules take part in the composition.
///
/// Modules are enabled unless explicitly disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Map of module name to enabled status.
    pub enabled: HashMap<String, bool>,
}

impl ModuleConfig {
    /// Check if a module is enabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.get(name).copied().unwrap_or(true)
    }

    /// Enable a module.
    pub fn enable(&mut self, name: impl Into<String>) {
        self.enabled.insert(name.into(), true);
    }

    /// Disable a module.
    pub fn disable(&mut self, name: impl Into<String>) {
        self.enabled.insert(name.into(), false);
    }
}
