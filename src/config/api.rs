//! Analytics API connection settings

use serde::{Deserialize, Serialize};

/// Where the analytics API lives and how hard to try reaching it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-attempt timeout for chat and report requests
    pub request_timeout_ms: u64,
    /// Total attempts per request, including the first
    pub max_attempts: u32,
    /// Backoff unit; attempt `i` waits `retry_delay_ms * (i - 1)`
    pub retry_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 10_000,
            max_attempts: 3,
            retry_delay_ms: 1000,
        }
    }
}
