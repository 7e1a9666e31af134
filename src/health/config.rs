//! Configuration for health checking.

use serde::{Deserialize, Serialize};

/// Configuration for API health polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Whether periodic polling runs; when off the client assumes the API is up
    pub enabled: bool,
    /// Seconds between health checks
    pub interval_seconds: u64,
    /// Timeout for each health check request, no retries
    pub timeout_ms: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 30,
            timeout_ms: 5000,
        }
    }
}
