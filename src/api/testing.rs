//! Scripted [`AnalyticsApi`] for unit tests.

use super::{AnalyticsApi, ExecuteQueryReply, QueryType, QuestionCatalog};
use crate::transport::TransportError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Answers each call from a queue of canned results.
///
/// Health defaults to `Ok`; chat and reports default to a network error
/// once their scripts run out.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    health: Mutex<VecDeque<Result<(), TransportError>>>,
    health_delay: Duration,
    chat: Mutex<VecDeque<Result<String, TransportError>>>,
    reports: Mutex<VecDeque<Result<ExecuteQueryReply, TransportError>>>,
    catalog: Option<QuestionCatalog>,
    chat_calls: Mutex<Vec<String>>,
    report_calls: Mutex<Vec<QueryType>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_health(self, result: Result<(), TransportError>) -> Self {
        self.health.lock().unwrap().push_back(result);
        self
    }

    pub fn with_health_delay(mut self, delay: Duration) -> Self {
        self.health_delay = delay;
        self
    }

    pub fn with_chat(self, body: serde_json::Value) -> Self {
        self.chat.lock().unwrap().push_back(Ok(body.to_string()));
        self
    }

    pub fn with_raw_chat(self, body: &str) -> Self {
        self.chat.lock().unwrap().push_back(Ok(body.to_string()));
        self
    }

    pub fn with_chat_error(self, error: TransportError) -> Self {
        self.chat.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_report(self, body: serde_json::Value) -> Self {
        let reply = serde_json::from_value(body).expect("report fixture must decode");
        self.reports.lock().unwrap().push_back(Ok(reply));
        self
    }

    pub fn with_report_error(self, error: TransportError) -> Self {
        self.reports.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_catalog(mut self, catalog: QuestionCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn chat_calls(&self) -> Vec<String> {
        self.chat_calls.lock().unwrap().clone()
    }

    pub fn report_calls(&self) -> Vec<QueryType> {
        self.report_calls.lock().unwrap().clone()
    }
}

fn unscripted() -> TransportError {
    TransportError::Network("no scripted response".to_string())
}

#[async_trait]
impl AnalyticsApi for ScriptedApi {
    fn base_url(&self) -> &str {
        "http://scripted.test"
    }

    async fn health(&self, timeout: Duration) -> Result<(), TransportError> {
        if !self.health_delay.is_zero() {
            if self.health_delay >= timeout {
                tokio::time::sleep(timeout).await;
                return Err(TransportError::Timeout(timeout.as_millis() as u64));
            }
            tokio::time::sleep(self.health_delay).await;
        }
        self.health.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn send_chat(&self, question: &str) -> Result<String, TransportError> {
        self.chat_calls.lock().unwrap().push(question.to_string());
        let next = self.chat.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(unscripted()))
    }

    async fn execute_query(
        &self,
        query_type: QueryType,
    ) -> Result<ExecuteQueryReply, TransportError> {
        self.report_calls.lock().unwrap().push(query_type);
        let next = self.reports.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(unscripted()))
    }

    async fn list_questions(&self) -> Result<QuestionCatalog, TransportError> {
        self.catalog.clone().ok_or_else(unscripted)
    }
}
