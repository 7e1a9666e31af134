//! Session state owned by the event loop.

use crate::config::{ClientConfig, UiConfig};
use crate::health::ConnectionStatus;
use crate::stats::StatsTracker;
use crate::storage::Storage;
use crate::ui::ThemeStore;
use std::sync::Arc;

/// Everything the handlers mutate. Only the dispatcher holds it.
#[derive(Debug)]
pub struct AppContext {
    pub connection: ConnectionStatus,
    pub stats: StatsTracker,
    pub theme: ThemeStore,
    pub ui: UiConfig,
}

impl AppContext {
    /// Restore statistics and theme from `storage`.
    ///
    /// With health polling disabled there is nothing to flip the status, so
    /// the API is assumed reachable.
    pub fn new(config: &ClientConfig, storage: Arc<dyn Storage>) -> Self {
        let connection = if config.health_check.enabled {
            ConnectionStatus::disconnected()
        } else {
            ConnectionStatus {
                online: true,
                latency_ms: None,
            }
        };

        Self {
            connection,
            stats: StatsTracker::restore(storage.clone(), config.storage.stats_key.clone()),
            theme: ThemeStore::load(storage, config.storage.theme_key.clone()),
            ui: config.ui.clone(),
        }
    }
}
