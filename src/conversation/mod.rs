//! Question/answer flow against the chat endpoint.
//!
//! [`ConversationEngine::send`] posts a question, records its latency and
//! folds the outcome into the session statistics. A successful answer that
//! carries a query triggers a follow-up report fetch whose failures are
//! logged and never reach the user.

mod classifier;

pub use classifier::classify;

use crate::api::{AnalyticsApi, ChatOutcome, QueryType};
use crate::app::AppContext;
use crate::format::format_results;
use crate::logging::{generate_request_id, preview};
use crate::ui::{Reply, Toast};
use chrono::Local;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::Instrument;

pub const MSG_SUCCESS_INTRO: &str = "Perfeito! Encontrei as informações que você procura. 🎯";
pub const MSG_QUERY_INTRO: &str = "Aqui está a consulta SQL correspondente:";
pub const MSG_NOT_UNDERSTOOD: &str = "Hmm, não consegui entender sua pergunta. 🤔";
pub const MSG_REPHRASE: &str = "Tente reformular sua pergunta ou use uma das opções sugeridas.";
pub const MSG_CONNECTION_ERROR: &str =
    "Desculpe, ocorreu um erro ao processar sua pergunta. Verifique se a API está funcionando.";
pub const TOAST_SUCCESS: &str = "Pergunta processada com sucesso! ✅";
pub const TOAST_NOT_UNDERSTOOD: &str = "Não foi possível processar a pergunta 😕";
pub const TOAST_CONNECTION_ERROR: &str = "Erro de conexão com a API 🔌";

/// Example questions offered when the server cannot map a question.
pub const SUGGESTIONS: [&str; 3] = [
    "Vendas por tipo de pagamento 💳",
    "Produtos mais vendidos 📦",
    "Custo das estadias por pet 🏨",
];

/// Why a send did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyQuestion,
    Offline,
}

/// What a call to [`ConversationEngine::send`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// No request was sent
    Skipped(SkipReason),
    /// The server answered; success or not, counters were updated
    Delivered(Vec<Reply>),
    /// The request itself failed; no counter changed
    Failed(Vec<Reply>),
}

impl SendOutcome {
    pub fn replies(&self) -> &[Reply] {
        match self {
            SendOutcome::Skipped(_) => &[],
            SendOutcome::Delivered(replies) | SendOutcome::Failed(replies) => replies,
        }
    }

    pub fn into_replies(self) -> Vec<Reply> {
        match self {
            SendOutcome::Skipped(_) => Vec::new(),
            SendOutcome::Delivered(replies) | SendOutcome::Failed(replies) => replies,
        }
    }
}

pub struct ConversationEngine {
    api: Arc<dyn AnalyticsApi>,
    log_content: bool,
}

impl ConversationEngine {
    pub fn new(api: Arc<dyn AnalyticsApi>) -> Self {
        Self {
            api,
            log_content: false,
        }
    }

    /// Include question text in log records.
    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.log_content = enabled;
        self
    }

    pub fn api(&self) -> &Arc<dyn AnalyticsApi> {
        &self.api
    }

    /// Send `question` if it is non-blank and the API is online.
    pub async fn send(&self, ctx: &mut AppContext, question: &str) -> SendOutcome {
        let question = question.trim();
        if question.is_empty() {
            return SendOutcome::Skipped(SkipReason::EmptyQuestion);
        }
        if !ctx.connection.online {
            tracing::debug!("Skipping send while offline");
            return SendOutcome::Skipped(SkipReason::Offline);
        }

        let request_id = generate_request_id();
        let span = tracing::info_span!("send", request_id = %request_id);
        self.deliver(ctx, question).instrument(span).await
    }

    async fn deliver(&self, ctx: &mut AppContext, question: &str) -> SendOutcome {
        let mut replies = vec![Reply::User(question.to_string())];
        if self.log_content {
            tracing::info!(question = %preview(question, 40), "Sending question");
        } else {
            tracing::info!(chars = question.chars().count(), "Sending question");
        }

        let started = Instant::now();
        let result = self.api.send_chat(question).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(body) => {
                ctx.stats.record_completed_send(latency_ms);
                ChatOutcome::parse(&body)
            }
            Err(e) => Err(e),
        };

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, latency_ms, "Chat request failed");
                replies.push(Reply::assistant_error(MSG_CONNECTION_ERROR));
                replies.push(Reply::Toast(Toast::error(TOAST_CONNECTION_ERROR)));
                return SendOutcome::Failed(replies);
            }
        };

        match outcome {
            ChatOutcome::Success {
                display_question,
                query,
                user_question,
            } => {
                replies.push(Reply::assistant(success_text(
                    &display_question,
                    query.is_some(),
                )));
                ctx.stats.record_answered();

                if let Some(query) = query {
                    replies.push(Reply::QueryDisplay(query));
                    ctx.stats.record_executed_query();
                    let basis = user_question.as_deref().unwrap_or(question);
                    if let Some(report) = self.follow_up(basis).await {
                        replies.push(Reply::assistant(report));
                    }
                }

                replies.push(Reply::Toast(Toast::success(TOAST_SUCCESS)));
                tracing::info!(latency_ms, "Question answered");
            }
            ChatOutcome::Failure { message } => {
                replies.push(Reply::assistant_error(failure_text(message.as_deref())));
                replies.push(Reply::Toast(Toast::warning(TOAST_NOT_UNDERSTOOD)));
                tracing::info!(latency_ms, "Question not understood");
            }
        }

        ctx.stats.record_question(question, Local::now());
        if let Err(e) = ctx.stats.persist() {
            tracing::warn!(error = %e, "Could not save statistics");
        }

        SendOutcome::Delivered(replies)
    }

    /// Fetch and format the report matching `question`, if any.
    ///
    /// Returns `None` for unclassifiable questions and on any failure.
    pub async fn follow_up(&self, question: &str) -> Option<String> {
        let query_type = classify(question)?;
        self.fetch_report(query_type).await
    }

    async fn fetch_report(&self, query_type: QueryType) -> Option<String> {
        let reply = match self.api.execute_query(query_type).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(query_type = %query_type, error = %e, "Report query failed");
                return None;
            }
        };

        if !reply.is_success() {
            tracing::warn!(query_type = %query_type, status = %reply.status, "Report query rejected");
            return None;
        }

        match reply.results {
            Some(results) => Some(format_results(&results, Some(query_type)).render()),
            None => {
                tracing::debug!(query_type = %query_type, "Report reply carried no results");
                None
            }
        }
    }
}

fn success_text(display_question: &str, has_query: bool) -> String {
    let mut text = format!("{}\n\n**{}**\n\n", MSG_SUCCESS_INTRO, display_question);
    if has_query {
        text.push_str(MSG_QUERY_INTRO);
    }
    text.trim_end().to_string()
}

fn failure_text(message: Option<&str>) -> String {
    let message = message.filter(|m| !m.trim().is_empty()).unwrap_or(MSG_REPHRASE);
    let mut text = format!(
        "{}\n\n{}\n\n**Perguntas que posso responder:**",
        MSG_NOT_UNDERSTOOD, message
    );
    for suggestion in SUGGESTIONS {
        text.push_str("\n• ");
        text.push_str(suggestion);
    }
    text
}
