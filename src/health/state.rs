//! Connection status derived from health checks.

use crate::transport::TransportError;
use serde::Serialize;

/// Result of a single health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthCheckResult {
    /// API answered 2xx
    Connected { latency_ms: u64 },
    /// Network error, timeout or non-2xx
    Disconnected { error: TransportError },
}

/// Whether the API is reachable, and how fast it last answered.
///
/// Only health check results change this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub online: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl ConnectionStatus {
    pub fn connected(latency_ms: u64) -> Self {
        Self {
            online: true,
            latency_ms: Some(latency_ms),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            online: false,
            latency_ms: None,
        }
    }

    pub fn from_result(result: &HealthCheckResult) -> Self {
        match result {
            HealthCheckResult::Connected { latency_ms } => Self::connected(*latency_ms),
            HealthCheckResult::Disconnected { .. } => Self::disconnected(),
        }
    }

    /// Replace the status with `result`. Returns true if `online` flipped.
    pub fn apply(&mut self, result: &HealthCheckResult) -> bool {
        let next = Self::from_result(result);
        let changed = next.online != self.online;
        if changed {
            match result {
                HealthCheckResult::Connected { latency_ms } => {
                    tracing::info!(latency_ms, "API is online");
                }
                HealthCheckResult::Disconnected { error } => {
                    tracing::warn!(error = %error, "API is offline");
                }
            }
        }
        *self = next;
        changed
    }

    pub fn label(&self) -> &'static str {
        if self.online {
            "Online"
        } else {
            "Offline"
        }
    }

    /// `"42ms"`, or `"--ms"` when offline.
    pub fn latency_label(&self) -> String {
        match (self.online, self.latency_ms) {
            (true, Some(ms)) => format!("{}ms", ms),
            _ => "--ms".to_string(),
        }
    }
}
