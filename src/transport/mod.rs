//! HTTP transport for the analytics API.
//!
//! Two layers sit on top of a pooled `reqwest::Client`:
//!
//! - [`HttpTransport::fetch_with_timeout`] issues one request under a
//!   [`TimeoutGuard`] and hands back the raw response, whatever its status.
//! - [`HttpTransport::fetch_with_retry`] repeats timeout-guarded requests,
//!   treating non-2xx statuses as failures, with linear backoff between
//!   attempts.

mod error;
mod retry;
mod timeout;

pub use error::TransportError;
pub use retry::RetryPolicy;
pub use timeout::{run_with_timeout, TimeoutGuard};

use crate::config::ApiConfig;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    /// POST with a JSON body.
    pub fn post_json<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, TransportError> {
        let body = serde_json::to_value(body)
            .map_err(|e| TransportError::MalformedResponse(format!("unserializable body: {}", e)))?;
        Ok(Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        })
    }
}

/// Timeout- and retry-aware HTTP client bound to one base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    retry: RetryPolicy,
}

impl HttpTransport {
    /// Create a transport with a fresh connection pool.
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create a transport reusing an existing client (for testing).
    pub fn with_client(config: &ApiConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
            retry: RetryPolicy::new(
                config.max_attempts,
                Duration::from_millis(config.retry_delay_ms),
            ),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue one request; fail with `Timeout` if nothing arrives within `timeout`.
    ///
    /// Non-2xx responses are returned as-is.
    pub async fn fetch_with_timeout(
        &self,
        request: &ApiRequest,
        timeout: Duration,
    ) -> Result<Response, TransportError> {
        let url = self.url(&request.path);
        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let timeout_ms = timeout.as_millis() as u64;
        run_with_timeout(
            async move {
                builder
                    .send()
                    .await
                    .map_err(|e| TransportError::from_reqwest(e, timeout_ms))
            },
            timeout,
        )
        .await
    }

    /// Issue the request up to `max_attempts` times until a 2xx arrives.
    pub async fn fetch_with_retry(
        &self,
        request: &ApiRequest,
        max_attempts: u32,
    ) -> Result<Response, TransportError> {
        let policy = self.retry.with_max_attempts(max_attempts);
        policy
            .run(move |attempt| self.attempt(request, attempt))
            .await
    }

    /// Retry with the configured attempt cap.
    pub async fn fetch(&self, request: &ApiRequest) -> Result<Response, TransportError> {
        self.fetch_with_retry(request, self.retry.max_attempts).await
    }

    async fn attempt(&self, request: &ApiRequest, attempt: u32) -> Result<Response, TransportError> {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            attempt,
            "Sending request"
        );
        let response = self.fetch_with_timeout(request, self.request_timeout).await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(TransportError::HttpStatus(status.as_u16()))
        }
    }
}

/// Read a response body as text.
pub async fn read_body(response: Response) -> Result<String, TransportError> {
    response
        .text()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))
}

/// Decode a JSON body into `T`.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn api_config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let transport = HttpTransport::new(&api_config("http://localhost:5000/"));
        assert_eq!(transport.base_url(), "http://localhost:5000");
        assert_eq!(transport.url("/chat"), "http://localhost:5000/chat");
    }

    #[test]
    fn test_policy_from_config() {
        let config = ApiConfig {
            max_attempts: 5,
            retry_delay_ms: 250,
            request_timeout_ms: 7000,
            ..Default::default()
        };
        let transport = HttpTransport::new(&config);
        assert_eq!(transport.retry_policy().max_attempts, 5);
        assert_eq!(transport.retry_policy().base_delay, Duration::from_millis(250));
        assert_eq!(transport.request_timeout(), Duration::from_millis(7000));
    }

    #[test]
    fn test_post_json_request() {
        let request =
            ApiRequest::post_json("/chat", &serde_json::json!({"pergunta": "oi"})).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/chat");
        assert_eq!(request.body, Some(serde_json::json!({"pergunta": "oi"})));
    }

    #[test]
    fn test_decode_json_malformed() {
        #[derive(Debug, Deserialize)]
        struct Probe {
            #[allow(dead_code)]
            status: String,
        }

        let err = decode_json::<Probe>("not json").unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }
}
