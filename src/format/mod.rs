//! Preview rendering for report results.
//!
//! Only the first [`PREVIEW_LIMIT`] entries are shown, in the order the
//! server sent them, followed by a note with the number left out.

use crate::api::{QueryResult, QueryType};
use serde_json::Number;

/// Entries shown before truncating
pub const PREVIEW_LIMIT: usize = 5;

/// Shown instead of entries when the result set is empty
pub const NO_RESULTS: &str = "Nenhum resultado encontrado.";

const HEADER: &str = "**📊 Resultados:**";

/// Rendered lines of a result preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPreview {
    /// One line per shown entry
    pub lines: Vec<String>,
    /// Entries beyond the preview limit
    pub remaining: usize,
    /// Whether the result set had no entries at all
    pub empty: bool,
}

impl ResultPreview {
    /// Truncation note, if entries were left out.
    pub fn trailer(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("*... e mais {} itens.*", self.remaining))
    }

    /// Markdown-lite text for the chat transcript.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n\n", HEADER);
        if self.empty {
            out.push_str(NO_RESULTS);
            return out;
        }
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        if let Some(trailer) = self.trailer() {
            out.push('\n');
            out.push_str(&trailer);
        }
        out.trim_end().to_string()
    }
}

/// Build the preview for `results` of `query_type`.
///
/// An unknown report type (`None`) still counts entries and produces the
/// truncation note, but yields no entry lines.
pub fn format_results(results: &QueryResult, query_type: Option<QueryType>) -> ResultPreview {
    let entries = results.entries();
    let lines = entries
        .iter()
        .take(PREVIEW_LIMIT)
        .filter_map(|(label, value)| {
            query_type.map(|query_type| format_entry(query_type, label, value))
        })
        .collect();

    ResultPreview {
        lines,
        remaining: entries.len().saturating_sub(PREVIEW_LIMIT),
        empty: entries.is_empty(),
    }
}

fn format_entry(query_type: QueryType, label: &str, value: &Number) -> String {
    match query_type {
        QueryType::SalesByPaymentMethod => {
            format!("💳 **{}:** {}", label, currency(value))
        }
        QueryType::TopSellingProducts => {
            format!("📦 **{}:** {} unidades", label, units(value))
        }
        QueryType::StaysCostByPet => {
            format!("🐾 **{}:** {}", label, currency(value))
        }
    }
}

fn currency(value: &Number) -> String {
    format!("R$ {:.2}", value.as_f64().unwrap_or_default())
}

fn units(value: &Number) -> String {
    if let Some(n) = value.as_i64() {
        n.to_string()
    } else if let Some(n) = value.as_u64() {
        n.to_string()
    } else {
        format!("{}", value.as_f64().unwrap_or_default().round() as i64)
    }
}
