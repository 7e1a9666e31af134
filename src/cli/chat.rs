//! Chat command implementation

use crate::api::AnalyticsApi;
use crate::app::{spawn_line_reader, App, AppContext};
use crate::cli::ChatArgs;
use crate::config::ClientConfig;
use crate::conversation::ConversationEngine;
use crate::health::HealthMonitor;
use crate::storage::Storage;
use crate::ui::Renderer;
use std::io::{self, BufReader};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const EVENT_QUEUE: usize = 64;

/// Cancel the session on Ctrl+C.
async fn shutdown_signal(cancel_token: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
                return;
            }
            tracing::info!("Received SIGINT, shutting down...");
            cancel_token.cancel();
        }
        _ = cancel_token.cancelled() => {}
    }
}

/// Handle `pethotel-chat chat`, the default command
pub async fn run_chat(
    args: &ChatArgs,
    mut config: ClientConfig,
    api: Arc<dyn AnalyticsApi>,
    storage: Arc<dyn Storage>,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.no_health_check {
        config.health_check.enabled = false;
    }

    tracing::info!(base_url = %api.base_url(), "Starting chat session");

    let ctx = AppContext::new(&config, storage);
    let monitor = HealthMonitor::new(api.clone(), config.health_check.clone());
    let cancel_token = CancellationToken::new();
    let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE);

    let health_handle = if config.health_check.enabled {
        Some(monitor.start_ticker(events_tx.clone(), cancel_token.clone()))
    } else {
        tracing::info!("Health checking disabled");
        None
    };

    spawn_line_reader(BufReader::new(io::stdin()), events_tx);
    let signal_handle = tokio::spawn(shutdown_signal(cancel_token.clone()));

    let engine =
        ConversationEngine::new(api).with_content_logging(config.logging.enable_content_logging);
    let app = App::new(ctx, engine, monitor, Renderer::new(io::stdout()));
    app.run(events_rx, cancel_token.clone()).await?;

    if let Some(handle) = health_handle {
        handle.await?;
    }
    signal_handle.await?;

    tracing::info!("Chat session ended");
    Ok(())
}
