//! Configuration module for the chat client
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PETHOTEL_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use pethotel::config::ClientConfig;
//!
//! let config = ClientConfig::default();
//! assert_eq!(config.api.base_url, "http://localhost:5000");
//!
//! let toml = r#"
//! [api]
//! base_url = "http://pethotel.local:8080"
//! "#;
//! let config: ClientConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.api.base_url, "http://pethotel.local:8080");
//! assert_eq!(config.api.max_attempts, 3);
//! ```

pub mod api;
pub mod error;
pub mod logging;
pub mod storage;
pub mod ui;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;
pub use ui::UiConfig;

// Re-export HealthCheckConfig from health module
pub use crate::health::HealthCheckConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Unified configuration for the chat client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Analytics API endpoint and retry settings
    pub api: ApiConfig,
    /// Health polling
    pub health_check: HealthCheckConfig,
    /// Persisted local state
    pub storage: StorageConfig,
    /// Prompt limits
    pub ui: UiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports PETHOTEL_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("PETHOTEL_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(attempts) = std::env::var("PETHOTEL_MAX_ATTEMPTS") {
            if let Ok(n) = attempts.parse() {
                self.api.max_attempts = n;
            }
        }
        if let Ok(timeout) = std::env::var("PETHOTEL_REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.api.request_timeout_ms = ms;
            }
        }

        if let Ok(level) = std::env::var("PETHOTEL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PETHOTEL_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(health) = std::env::var("PETHOTEL_HEALTH_CHECK") {
            self.health_check.enabled = health.to_lowercase() == "true";
        }
        if let Ok(dir) = std::env::var("PETHOTEL_STATE_DIR") {
            self.storage.dir = PathBuf::from(dir);
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(validation("api.base_url", "URL cannot be empty"));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(validation(
                "api.base_url",
                "URL must start with http:// or https://",
            ));
        }
        if self.api.max_attempts == 0 {
            return Err(validation("api.max_attempts", "must be at least 1"));
        }
        if self.api.request_timeout_ms == 0 {
            return Err(validation("api.request_timeout_ms", "must be non-zero"));
        }
        if self.health_check.timeout_ms == 0 {
            return Err(validation("health_check.timeout_ms", "must be non-zero"));
        }
        if self.health_check.interval_seconds == 0 {
            return Err(validation("health_check.interval_seconds", "must be non-zero"));
        }
        if self.storage.stats_key.is_empty() || self.storage.theme_key.is_empty() {
            return Err(validation("storage", "keys cannot be empty"));
        }
        if self.storage.stats_key == self.storage.theme_key {
            return Err(validation(
                "storage.theme_key",
                "must differ from storage.stats_key",
            ));
        }
        let ui = &self.ui;
        if !(ui.warn_input_chars <= ui.danger_input_chars
            && ui.danger_input_chars <= ui.max_input_chars)
        {
            return Err(validation(
                "ui",
                "expected warn_input_chars <= danger_input_chars <= max_input_chars",
            ));
        }

        Ok(())
    }
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
