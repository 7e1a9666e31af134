//! Usage statistics for the chat session.
//!
//! Counters survive restarts through a [`Storage`] key holding
//! `{questionCount, answeredQuestions, executedQueries, responseTimes}`.
//! A missing or unreadable record restores to all zeros.

mod window;

pub use window::{ResponseWindow, DEFAULT_WINDOW};

use crate::storage::{Storage, StorageError};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// On-disk shape of the statistics record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedStats {
    pub question_count: u64,
    pub answered_questions: u64,
    pub executed_queries: u64,
    pub response_times: Vec<u64>,
}

/// The most recent question sent, kept for the current session only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastQuery {
    pub text: String,
    pub at: DateTime<Local>,
}

impl LastQuery {
    /// `HH:MM - <first 20 chars>...`
    pub fn summary(&self) -> String {
        format!(
            "{} - {}",
            self.at.format("%H:%M"),
            crate::logging::preview(&self.text, 20)
        )
    }
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub question_count: u64,
    pub answered_questions: u64,
    pub executed_queries: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_response_ms: Option<u64>,
    pub response_times: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_query: Option<String>,
}

/// Running counters plus the latency window, bound to a storage key.
pub struct StatsTracker {
    question_count: u64,
    answered_questions: u64,
    executed_queries: u64,
    window: ResponseWindow,
    last_query: Option<LastQuery>,
    storage: Arc<dyn Storage>,
    key: String,
}

impl std::fmt::Debug for StatsTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsTracker")
            .field("question_count", &self.question_count)
            .field("answered_questions", &self.answered_questions)
            .field("executed_queries", &self.executed_queries)
            .field("window", &self.window)
            .field("key", &self.key)
            .finish()
    }
}

impl StatsTracker {
    /// Load counters from `storage[key]`, falling back to zeros.
    pub fn restore(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let persisted = match storage.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedStats>(&raw) {
                Ok(stats) => stats,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Stored statistics are corrupt, starting from zero");
                    PersistedStats::default()
                }
            },
            Ok(None) => PersistedStats::default(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Could not read stored statistics, starting from zero");
                PersistedStats::default()
            }
        };

        Self {
            question_count: persisted.question_count,
            answered_questions: persisted.answered_questions,
            executed_queries: persisted.executed_queries,
            window: ResponseWindow::from_samples(persisted.response_times, DEFAULT_WINDOW),
            last_query: None,
            storage,
            key,
        }
    }

    /// Append a round-trip latency to the rolling window.
    pub fn record_completed_send(&mut self, latency_ms: u64) {
        self.window.push(latency_ms);
    }

    pub fn record_answered(&mut self) {
        self.answered_questions += 1;
    }

    pub fn record_executed_query(&mut self) {
        self.executed_queries += 1;
    }

    /// Count a question and remember it as the last query.
    pub fn record_question(&mut self, text: &str, at: DateTime<Local>) {
        self.question_count += 1;
        self.last_query = Some(LastQuery {
            text: text.to_string(),
            at,
        });
    }

    pub fn last_query(&self) -> Option<&LastQuery> {
        self.last_query.as_ref()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            question_count: self.question_count,
            answered_questions: self.answered_questions,
            executed_queries: self.executed_queries,
            average_response_ms: self.window.mean(),
            response_times: self.window.to_vec(),
            last_query: self.last_query.as_ref().map(LastQuery::summary),
        }
    }

    fn persisted(&self) -> PersistedStats {
        PersistedStats {
            question_count: self.question_count,
            answered_questions: self.answered_questions,
            executed_queries: self.executed_queries,
            response_times: self.window.to_vec(),
        }
    }

    /// Write the counters and window to storage.
    pub fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.persisted())?;
        self.storage.set(&self.key, &json)
    }

    /// Zero everything and drop the stored record.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.question_count = 0;
        self.answered_questions = 0;
        self.executed_queries = 0;
        self.window.clear();
        self.last_query = None;
        self.storage.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;

    fn memory() -> Arc<dyn Storage> {
        Arc::new(MemoryStorage::new())
    }

    #[test]
    fn test_restore_missing_is_zero() {
        let stats = StatsTracker::restore(memory(), "chatStats");
        let snap = stats.snapshot();
        assert_eq!(snap.question_count, 0);
        assert_eq!(snap.answered_questions, 0);
        assert_eq!(snap.executed_queries, 0);
        assert!(snap.response_times.is_empty());
        assert_eq!(snap.average_response_ms, None);
        assert_eq!(snap.last_query, None);
    }

    #[test]
    fn test_restore_corrupt_is_zero() {
        let storage = memory();
        storage.set("chatStats", "{not json").unwrap();

        let stats = StatsTracker::restore(storage, "chatStats");
        assert_eq!(stats.snapshot().question_count, 0);
    }

    #[test]
    fn test_restore_wrong_types_is_zero() {
        let storage = memory();
        storage
            .set("chatStats", r#"{"questionCount":"many","responseTimes":[1,2]}"#)
            .unwrap();

        let snap = StatsTracker::restore(storage, "chatStats").snapshot();
        assert_eq!(snap.question_count, 0);
        assert!(snap.response_times.is_empty());
    }

    #[test]
    fn test_restore_partial_record_defaults_missing_fields() {
        let storage = memory();
        storage.set("chatStats", r#"{"questionCount":4}"#).unwrap();

        let snap = StatsTracker::restore(storage, "chatStats").snapshot();
        assert_eq!(snap.question_count, 4);
        assert_eq!(snap.answered_questions, 0);
    }

    #[test]
    fn test_restore_trims_oversized_window() {
        let storage = memory();
        let times: Vec<u64> = (1..=12).collect();
        let record = serde_json::json!({"questionCount": 12, "responseTimes": times});
        storage.set("chatStats", &record.to_string()).unwrap();

        let snap = StatsTracker::restore(storage, "chatStats").snapshot();
        assert_eq!(snap.response_times, (3..=12).collect::<Vec<u64>>());
    }

    #[test]
    fn test_persist_then_restore() {
        let storage = memory();
        let mut stats = StatsTracker::restore(Arc::clone(&storage), "chatStats");
        stats.record_completed_send(120);
        stats.record_completed_send(80);
        stats.record_answered();
        stats.record_executed_query();
        stats.record_question("produtos mais vendidos", Local::now());
        stats.persist().unwrap();

        let raw = storage.get("chatStats").unwrap().unwrap();
        let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted["questionCount"], 1);
        assert_eq!(persisted["answeredQuestions"], 1);
        assert_eq!(persisted["executedQueries"], 1);
        assert_eq!(persisted["responseTimes"], serde_json::json!([120, 80]));

        let restored = StatsTracker::restore(storage, "chatStats");
        let snap = restored.snapshot();
        assert_eq!(snap.question_count, 1);
        assert_eq!(snap.average_response_ms, Some(100));
        // Last query is session-only
        assert_eq!(snap.last_query, None);
    }

    #[test]
    fn test_last_query_summary_truncates() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 7, 0).unwrap();
        let short = LastQuery {
            text: "oi".to_string(),
            at,
        };
        assert_eq!(short.summary(), "09:07 - oi");

        let long = LastQuery {
            text: "Quais os produtos mais vendidos em termos de quantidade?".to_string(),
            at,
        };
        assert_eq!(long.summary(), "09:07 - Quais os produtos ma...");
    }

    #[test]
    fn test_reset_clears_storage() {
        let storage = memory();
        let mut stats = StatsTracker::restore(Arc::clone(&storage), "chatStats");
        stats.record_question("oi", Local::now());
        stats.record_completed_send(10);
        stats.persist().unwrap();

        stats.reset().unwrap();
        assert_eq!(stats.snapshot().question_count, 0);
        assert!(stats.snapshot().response_times.is_empty());
        assert_eq!(storage.get("chatStats").unwrap(), None);
    }
}
