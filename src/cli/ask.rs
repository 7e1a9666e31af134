//! Ask command implementation

use crate::api::AnalyticsApi;
use crate::app::AppContext;
use crate::cli::AskArgs;
use crate::config::ClientConfig;
use crate::conversation::{ConversationEngine, SendOutcome, SkipReason};
use crate::health::HealthMonitor;
use crate::storage::Storage;
use crate::ui::{InputGauge, Renderer};
use std::io::Write;
use std::sync::Arc;

/// Handle `pethotel-chat ask` command
///
/// The answer is drawn to `out`. Only unusable input or an unreachable API
/// make this fail; a question the server cannot map is still an answer.
pub async fn handle_ask<W: Write>(
    args: &AskArgs,
    config: &ClientConfig,
    api: Arc<dyn AnalyticsApi>,
    storage: Arc<dyn Storage>,
    out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let gauge = InputGauge::measure(args.question.trim(), &config.ui);
    if gauge.chars > gauge.max {
        return Err(format!(
            "Question is too long ({}/{} characters)",
            gauge.chars, gauge.max
        )
        .into());
    }

    let mut ctx = AppContext::new(config, storage);
    if config.health_check.enabled && !args.no_health_check {
        let monitor = HealthMonitor::new(api.clone(), config.health_check.clone());
        let result = monitor.check_health().await;
        ctx.connection.apply(&result);
    } else {
        ctx.connection.online = true;
    }

    let engine = ConversationEngine::new(api.clone())
        .with_content_logging(config.logging.enable_content_logging);
    let outcome = engine.send(&mut ctx, &args.question).await;

    match outcome {
        SendOutcome::Skipped(SkipReason::EmptyQuestion) => Err("Question cannot be empty".into()),
        SendOutcome::Skipped(SkipReason::Offline) => {
            Err(format!("API is offline: {}", api.base_url()).into())
        }
        outcome => {
            let mut renderer = if args.plain {
                Renderer::plain(out)
            } else {
                Renderer::new(out)
            };
            renderer.render_all(outcome.replies(), ctx.theme.current())?;
            Ok(())
        }
    }
}
