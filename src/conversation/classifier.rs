//! Keyword classifier mapping a question to a canned report.

use crate::api::QueryType;

/// Each rule fires when every keyword occurs in the lower-cased question.
/// Rules are checked in order; the first match wins.
const RULES: [(&[&str], QueryType); 3] = [
    (&["vendas", "pagamento"], QueryType::SalesByPaymentMethod),
    (&["produtos", "vendidos"], QueryType::TopSellingProducts),
    (&["estadias", "pet"], QueryType::StaysCostByPet),
];

/// Report to fetch for `question`, if any.
pub fn classify(question: &str) -> Option<QueryType> {
    let lowered = question.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().all(|k| lowered.contains(k)))
        .map(|&(_, query_type)| query_type)
}
