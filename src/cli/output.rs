//! Output formatting helpers for CLI commands

use crate::api::QuestionCatalog;
use crate::health::{ConnectionStatus, HealthCheckResult};
use crate::stats::StatsSnapshot;
use crate::ui::render::stats_table;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;

/// View model for a health probe
#[derive(Debug, Clone, Serialize)]
pub struct HealthView {
    pub base_url: String,
    pub status: ConnectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthView {
    pub fn new(base_url: &str, result: &HealthCheckResult) -> Self {
        let error = match result {
            HealthCheckResult::Connected { .. } => None,
            HealthCheckResult::Disconnected { error } => Some(error.to_string()),
        };
        Self {
            base_url: base_url.to_string(),
            status: ConnectionStatus::from_result(result),
            error,
        }
    }
}

/// Format a health probe as pretty text
pub fn format_health_pretty(view: &HealthView) -> String {
    let (icon, label) = if view.status.online {
        ("●".green(), view.status.label().green())
    } else {
        ("●".red(), view.status.label().red())
    };

    let mut output = format!(
        "{} {} ({})\nAPI: {}",
        icon,
        label,
        view.status.latency_label(),
        view.base_url
    );
    if let Some(ref error) = view.error {
        output.push_str(&format!("\nError: {}", error));
    }
    output
}

/// Format a health probe as JSON
pub fn format_health_json(view: &HealthView) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}

/// Format saved statistics as a table
pub fn format_stats_table(snapshot: &StatsSnapshot) -> String {
    stats_table(snapshot, None).to_string()
}

/// Format saved statistics as JSON
pub fn format_stats_json(snapshot: &StatsSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "stats": snapshot }))
}

/// Format the question catalog as a table
pub fn format_questions_table(catalog: &QuestionCatalog) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Pergunta"]);

    for (i, question) in catalog.questions.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(question)]);
    }

    let mut output = table.to_string();
    if !catalog.query_types.is_empty() {
        output.push_str(&format!(
            "\n{} {}",
            "Relatórios:".bold(),
            catalog.query_types.join(", ")
        ));
    }
    output
}

/// Format the question catalog as JSON
pub fn format_questions_json(catalog: &QuestionCatalog) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(catalog)
}
