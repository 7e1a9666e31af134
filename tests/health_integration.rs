//! Integration tests for the health monitor with mock HTTP servers.

mod common;

use pethotel::api::AnalyticsApi;
use pethotel::app::AppEvent;
use pethotel::health::{ConnectionStatus, HealthCheckConfig, HealthCheckResult, HealthMonitor};
use pethotel::transport::TransportError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn monitor(server: &MockServer) -> HealthMonitor {
    let api: Arc<dyn AnalyticsApi> = Arc::new(common::http_api(server));
    HealthMonitor::new(
        api,
        HealthCheckConfig {
            timeout_ms: common::SHORT_TIMEOUT_MS,
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn test_healthy_api_is_connected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = monitor(&mock_server).check_health().await;

    assert!(matches!(result, HealthCheckResult::Connected { .. }));
    let mut status = ConnectionStatus::default();
    assert!(status.apply(&result));
    assert!(status.online);
}

#[tokio::test]
async fn test_error_status_is_disconnected_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = monitor(&mock_server).check_health().await;

    assert_eq!(
        result,
        HealthCheckResult::Disconnected {
            error: TransportError::HttpStatus(503)
        }
    );
}

#[tokio::test]
async fn test_slow_health_is_a_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(Duration::from_millis(common::SHORT_TIMEOUT_MS * 5)),
        )
        .mount(&mock_server)
        .await;

    let result = monitor(&mock_server).check_health().await;

    assert_eq!(
        result,
        HealthCheckResult::Disconnected {
            error: TransportError::Timeout(common::SHORT_TIMEOUT_MS)
        }
    );
}

#[tokio::test]
async fn test_ticker_emits_first_tick_immediately_and_stops_on_cancel() {
    let mock_server = MockServer::start().await;
    let monitor = monitor(&mock_server);
    let (tx, mut rx) = mpsc::channel(4);
    let cancel = CancellationToken::new();

    let handle = monitor.start_ticker(tx, cancel.clone());

    let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap();
    assert_eq!(first, Some(AppEvent::HealthTick));

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();
}
