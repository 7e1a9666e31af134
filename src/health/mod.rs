//! API health monitoring.
//!
//! A ticker task emits [`AppEvent::HealthTick`] once at startup and then on a
//! fixed interval; the event loop answers each tick with
//! [`HealthMonitor::check_health`] and folds the result into the
//! [`ConnectionStatus`] that gates sending.

mod config;
mod state;


pub use config::*;
pub use state::*;

use crate::api::AnalyticsApi;
use crate::app::AppEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Runs liveness probes against the analytics API.
pub struct HealthMonitor {
    api: Arc<dyn AnalyticsApi>,
    config: HealthCheckConfig,
}

impl HealthMonitor {
    pub fn new(api: Arc<dyn AnalyticsApi>, config: HealthCheckConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &HealthCheckConfig {
        &self.config
    }

    /// Probe the API once.
    ///
    /// Never fails: every error maps to [`HealthCheckResult::Disconnected`].
    pub async fn check_health(&self) -> HealthCheckResult {
        let start = Instant::now();

        match self
            .api
            .health(Duration::from_millis(self.config.timeout_ms))
            .await
        {
            Ok(()) => {
                let latency_ms = start.elapsed().as_millis() as u64;
                tracing::debug!(latency_ms, "Health check succeeded");
                HealthCheckResult::Connected { latency_ms }
            }
            Err(error) => {
                tracing::debug!(error = %error, "Health check failed");
                HealthCheckResult::Disconnected { error }
            }
        }
    }

    /// Start the ticker task.
    ///
    /// The first tick fires immediately. Stops when `cancel_token` fires or
    /// the event channel closes.
    pub fn start_ticker(
        &self,
        events: mpsc::Sender<AppEvent>,
        cancel_token: CancellationToken,
    ) -> JoinHandle<()> {
        spawn_ticker(
            Duration::from_secs(self.config.interval_seconds),
            events,
            cancel_token,
        )
    }
}

/// Emit `HealthTick` every `period` until cancelled.
pub fn spawn_ticker(
    period: Duration,
    events: mpsc::Sender<AppEvent>,
    cancel_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tracing::debug!(interval_seconds = period.as_secs(), "Health ticker started");

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::debug!("Health ticker shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if events.send(AppEvent::HealthTick).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}
