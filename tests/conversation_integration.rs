//! End-to-end conversation flow against a mock analytics API.

mod common;

use pethotel::api::{AnalyticsApi, QueryType};
use pethotel::app::AppContext;
use pethotel::conversation::{ConversationEngine, SendOutcome, MSG_CONNECTION_ERROR};
use pethotel::health::ConnectionStatus;
use pethotel::stats::StatsTracker;
use pethotel::storage::{FileStorage, Storage};
use pethotel::ui::Reply;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup(server: &MockServer, dir: &TempDir) -> (ConversationEngine, AppContext, Arc<dyn Storage>) {
    let config = common::client_config(server);
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(dir.path()));
    let api: Arc<dyn AnalyticsApi> = Arc::new(common::http_api(server));
    let mut ctx = AppContext::new(&config, storage.clone());
    ctx.connection = ConnectionStatus::connected(5);
    (ConversationEngine::new(api), ctx, storage)
}

fn texts(replies: &[Reply]) -> String {
    replies
        .iter()
        .filter_map(|r| match r {
            Reply::Assistant { text, .. } => Some(text.as_str()),
            Reply::QueryDisplay(sql) => Some(sql.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_answer_with_report_preview() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(serde_json::json!({"pergunta": "vendas por pagamento"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::chat_success(
            "Quais são as vendas por tipo de pagamento?",
            "SELECT forma_pagamento, SUM(valor) FROM vendas GROUP BY forma_pagamento",
            "vendas por pagamento",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/execute-query"))
        .and(body_json(serde_json::json!({"tipo_query": "vendas_por_pagamento"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::report(
            "vendas_por_pagamento",
            serde_json::json!({
                "Pix": 1520.5,
                "Cartão": 980,
                "Dinheiro": 310.25,
                "Boleto": 120,
                "Vale": 50,
                "Cheque": 10,
                "Crédito loja": 5
            }),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (engine, mut ctx, _) = setup(&mock_server, &dir);
    let outcome = engine.send(&mut ctx, "vendas por pagamento").await;

    assert!(matches!(outcome, SendOutcome::Delivered(_)));
    let transcript = texts(outcome.replies());
    assert!(transcript.contains("**Quais são as vendas por tipo de pagamento?**"));
    assert!(transcript.contains("SELECT forma_pagamento"));
    // Server order preserved, first five shown
    let pix = transcript.find("💳 **Pix:** R$ 1520.50").unwrap();
    let cartao = transcript.find("💳 **Cartão:** R$ 980.00").unwrap();
    assert!(pix < cartao);
    assert!(transcript.contains("💳 **Vale:** R$ 50.00"));
    assert!(!transcript.contains("Cheque"));
    assert!(transcript.contains("*... e mais 2 itens.*"));

    let snap = ctx.stats.snapshot();
    assert_eq!(snap.question_count, 1);
    assert_eq!(snap.answered_questions, 1);
    assert_eq!(snap.executed_queries, 1);
}

#[tokio::test]
async fn test_stats_survive_restart() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "erro",
            "mensagem": "Não entendi"
        })))
        .mount(&mock_server)
        .await;

    let (engine, mut ctx, storage) = setup(&mock_server, &dir);
    engine.send(&mut ctx, "primeira").await;
    engine.send(&mut ctx, "segunda").await;

    let restored = StatsTracker::restore(storage, "chatStats");
    let snap = restored.snapshot();
    assert_eq!(snap.question_count, 2);
    assert_eq!(snap.answered_questions, 0);
    assert_eq!(snap.response_times.len(), 2);
    // Last query is session-only
    assert_eq!(snap.last_query, None);
}

#[tokio::test]
async fn test_exhausted_retries_show_connection_error() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&mock_server)
        .await;

    let (engine, mut ctx, storage) = setup(&mock_server, &dir);
    let outcome = engine.send(&mut ctx, "produtos mais vendidos").await;

    assert!(matches!(outcome, SendOutcome::Failed(_)));
    assert!(texts(outcome.replies()).contains(MSG_CONNECTION_ERROR));
    assert_eq!(ctx.stats.snapshot().question_count, 0);
    assert_eq!(storage.get("chatStats").unwrap(), None);
}

#[tokio::test]
async fn test_report_failure_does_not_break_answer() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::chat_success(
            "Custo das estadias por pet",
            "SELECT pet, SUM(custo) FROM estadias GROUP BY pet",
            "estadias por pet",
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/execute-query"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let (engine, mut ctx, _) = setup(&mock_server, &dir);
    let outcome = engine.send(&mut ctx, "estadias por pet").await;

    assert!(matches!(outcome, SendOutcome::Delivered(_)));
    assert!(!texts(outcome.replies()).contains("Resultados"));
    assert_eq!(ctx.stats.snapshot().executed_queries, 1);
}

#[tokio::test]
async fn test_list_questions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/perguntas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "perguntas_disponiveis": [
                "Quais são as vendas por tipo de pagamento?",
                "Quais os produtos mais vendidos?",
                "Qual o custo das estadias por pet?"
            ],
            "tipos_query_disponiveis": [
                "vendas_por_pagamento",
                "produtos_mais_vendidos",
                "estadias_por_pet"
            ]
        })))
        .mount(&mock_server)
        .await;

    let catalog = common::http_api(&mock_server).list_questions().await.unwrap();

    assert_eq!(catalog.questions.len(), 3);
    let types: Vec<_> = catalog
        .query_types
        .iter()
        .filter_map(|label| QueryType::from_label(label))
        .collect();
    assert_eq!(types, QueryType::ALL.to_vec());
}
