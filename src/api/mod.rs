//! Client for the PetHotel analytics API.
//!
//! [`AnalyticsApi`] is the seam the rest of the crate talks to; the HTTP
//! implementation sits on [`HttpTransport`]. Endpoints:
//!
//! - `GET /health` (2xx means healthy, body ignored)
//! - `POST /chat` with `{"pergunta": ...}`
//! - `POST /execute-query` with `{"tipo_query": ...}`
//! - `GET /perguntas` (supported questions)

pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use types::{
    ChatOutcome, ChatReply, ChatRequest, ExecuteQueryReply, ExecuteQueryRequest, QueryResult,
    QueryType, QuestionCatalog, STATUS_SUCCESS,
};

use crate::transport::{decode_json, read_body, ApiRequest, HttpTransport, TransportError};
use async_trait::async_trait;
use std::time::Duration;

/// Operations the chat client needs from the analytics server.
///
/// Object-safe; used as `Arc<dyn AnalyticsApi>`.
#[async_trait]
pub trait AnalyticsApi: Send + Sync + 'static {
    /// Base URL, for display.
    fn base_url(&self) -> &str;

    /// One timeout-guarded liveness probe, no retry. `Ok` only on 2xx.
    async fn health(&self, timeout: Duration) -> Result<(), TransportError>;

    /// Post a question and return the raw response body.
    ///
    /// The body is left undecoded so callers can time the round trip
    /// separately from parsing; see [`ChatOutcome::parse`].
    async fn send_chat(&self, question: &str) -> Result<String, TransportError>;

    /// Run a canned report.
    async fn execute_query(&self, query_type: QueryType)
        -> Result<ExecuteQueryReply, TransportError>;

    /// Supported questions and report labels.
    async fn list_questions(&self) -> Result<QuestionCatalog, TransportError>;
}

/// [`AnalyticsApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAnalyticsApi {
    transport: HttpTransport,
}

impl HttpAnalyticsApi {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

#[async_trait]
impl AnalyticsApi for HttpAnalyticsApi {
    fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    async fn health(&self, timeout: Duration) -> Result<(), TransportError> {
        let response = self
            .transport
            .fetch_with_timeout(&ApiRequest::get("/health"), timeout)
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(TransportError::HttpStatus(response.status().as_u16()))
        }
    }

    async fn send_chat(&self, question: &str) -> Result<String, TransportError> {
        let request = ApiRequest::post_json(
            "/chat",
            &ChatRequest {
                question: question.to_string(),
            },
        )?;
        let response = self.transport.fetch(&request).await?;
        read_body(response).await
    }

    async fn execute_query(
        &self,
        query_type: QueryType,
    ) -> Result<ExecuteQueryReply, TransportError> {
        let request = ApiRequest::post_json("/execute-query", &ExecuteQueryRequest { query_type })?;
        let response = self.transport.fetch(&request).await?;
        let body = read_body(response).await?;
        decode_json(&body)
    }

    async fn list_questions(&self) -> Result<QuestionCatalog, TransportError> {
        let response = self.transport.fetch(&ApiRequest::get("/perguntas")).await?;
        let body = read_body(response).await?;
        decode_json(&body)
    }
}
