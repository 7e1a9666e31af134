//! Wire types for the analytics API.
//!
//! Field names on the wire are Portuguese (`pergunta`, `tipo_query`,
//! `resultado`, ...); the Rust side uses English names with serde renames.

use crate::transport::{decode_json, TransportError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// `status` value the server uses for a successful answer
pub const STATUS_SUCCESS: &str = "sucesso";

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(rename = "pergunta")]
    pub question: String,
}

/// Raw body returned by `POST /chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "pergunta_da_query", default)]
    pub query_question: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(rename = "pergunta_do_usuario", default)]
    pub user_question: Option<String>,
    #[serde(rename = "mensagem", default)]
    pub message: Option<String>,
}

/// A chat reply interpreted through its status discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Success {
        /// Canonical phrasing of the matched question
        display_question: String,
        /// SQL the server mapped the question to; triggers a report fetch
        query: Option<String>,
        /// The question as the server received it
        user_question: Option<String>,
    },
    Failure {
        message: Option<String>,
    },
}

impl ChatOutcome {
    /// Decode a `/chat` response body.
    pub fn parse(body: &str) -> Result<Self, TransportError> {
        decode_json::<ChatReply>(body).map(Self::from)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChatOutcome::Success { .. })
    }
}

impl From<ChatReply> for ChatOutcome {
    fn from(reply: ChatReply) -> Self {
        if reply.status == STATUS_SUCCESS {
            let display_question = reply
                .query_question
                .or_else(|| reply.user_question.clone())
                .unwrap_or_default();
            ChatOutcome::Success {
                display_question,
                query: reply.query.filter(|q| !q.trim().is_empty()),
                user_question: reply.user_question,
            }
        } else {
            ChatOutcome::Failure {
                message: reply.message,
            }
        }
    }
}

/// Canned reports the server can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryType {
    #[serde(rename = "vendas_por_pagamento")]
    SalesByPaymentMethod,
    #[serde(rename = "produtos_mais_vendidos")]
    TopSellingProducts,
    #[serde(rename = "estadias_por_pet")]
    StaysCostByPet,
}

impl QueryType {
    pub const ALL: [QueryType; 3] = [
        QueryType::SalesByPaymentMethod,
        QueryType::TopSellingProducts,
        QueryType::StaysCostByPet,
    ];

    /// Label used on the wire.
    pub fn label(self) -> &'static str {
        match self {
            QueryType::SalesByPaymentMethod => "vendas_por_pagamento",
            QueryType::TopSellingProducts => "produtos_mais_vendidos",
            QueryType::StaysCostByPet => "estadias_por_pet",
        }
    }

    /// Inverse of [`QueryType::label`].
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of `POST /execute-query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteQueryRequest {
    #[serde(rename = "tipo_query")]
    pub query_type: QueryType,
}

/// Label → number mapping in the order the server sent it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct QueryResult {
    entries: Vec<(String, Number)>,
}

impl QueryResult {
    pub fn new(entries: Vec<(String, Number)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, Number)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Map<String, Value>> for QueryResult {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let entries = map
            .into_iter()
            .map(|(label, value)| match value {
                Value::Number(n) => Ok((label, n)),
                other => Err(format!("value for '{}' is not a number: {}", label, other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }
}

/// Raw body returned by `POST /execute-query`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExecuteQueryReply {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "tipo_query", default)]
    pub query_type: Option<String>,
    #[serde(rename = "resultado", default)]
    pub results: Option<QueryResult>,
}

impl ExecuteQueryReply {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Body of `GET /perguntas`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCatalog {
    #[serde(rename = "perguntas_disponiveis", default)]
    pub questions: Vec<String>,
    #[serde(rename = "tipos_query_disponiveis", default)]
    pub query_types: Vec<String>,
}
