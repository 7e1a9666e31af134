//! Shared test utilities for pethotel integration tests.

#![allow(dead_code)]

use pethotel::api::HttpAnalyticsApi;
use pethotel::config::{ApiConfig, ClientConfig};
use pethotel::transport::HttpTransport;
use wiremock::MockServer;

// =============================================================================
// Well-Known Test Constants
// =============================================================================

/// Backoff unit small enough to keep retry tests fast
pub const FAST_RETRY_MS: u64 = 10;

/// Per-attempt timeout used against delayed mock responses
pub const SHORT_TIMEOUT_MS: u64 = 200;

// =============================================================================
// Builders
// =============================================================================

/// API settings pointing at `server` with fast retries.
pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        request_timeout_ms: SHORT_TIMEOUT_MS,
        max_attempts: 3,
        retry_delay_ms: FAST_RETRY_MS,
    }
}

/// Full client config pointing at `server`.
pub fn client_config(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.api = api_config(server);
    config.health_check.timeout_ms = SHORT_TIMEOUT_MS;
    config
}

pub fn transport(server: &MockServer) -> HttpTransport {
    HttpTransport::new(&api_config(server))
}

pub fn http_api(server: &MockServer) -> HttpAnalyticsApi {
    HttpAnalyticsApi::new(transport(server))
}

// =============================================================================
// Response Fixtures
// =============================================================================

pub fn chat_success(display: &str, query: &str, user_question: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "sucesso",
        "pergunta_da_query": display,
        "query": query,
        "pergunta_do_usuario": user_question
    })
}

pub fn report(query_type: &str, results: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "status": "sucesso",
        "tipo_query": query_type,
        "resultado": results
    })
}
