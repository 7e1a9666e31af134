//! Health command implementation

use crate::api::AnalyticsApi;
use crate::cli::output::{format_health_json, format_health_pretty, HealthView};
use crate::cli::HealthArgs;
use crate::health::{HealthCheckConfig, HealthMonitor};
use std::sync::Arc;

/// Handle `pethotel-chat health` command
pub async fn handle_health(
    args: &HealthArgs,
    api: Arc<dyn AnalyticsApi>,
    config: &HealthCheckConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let base_url = api.base_url().to_string();
    let monitor = HealthMonitor::new(api, config.clone());
    let result = monitor.check_health().await;
    let view = HealthView::new(&base_url, &result);

    if args.json {
        Ok(format_health_json(&view)?)
    } else {
        Ok(format_health_pretty(&view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedApi;
    use crate::transport::TransportError;

    #[tokio::test]
    async fn test_health_online_pretty() {
        let api = Arc::new(ScriptedApi::new());
        let output = handle_health(&HealthArgs::default(), api, &HealthCheckConfig::default())
            .await
            .unwrap();
        assert!(output.contains("Online"));
        assert!(output.contains("http://scripted.test"));
    }

    #[tokio::test]
    async fn test_health_offline_json() {
        let api = Arc::new(ScriptedApi::new().with_health(Err(TransportError::HttpStatus(500))));
        let output = handle_health(
            &HealthArgs { json: true },
            api,
            &HealthCheckConfig::default(),
        )
        .await
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["status"]["online"], false);
        assert_eq!(parsed["error"], "HTTP 500");
    }
}
