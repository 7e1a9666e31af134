//! Local state storage settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where usage statistics and the theme preference are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub stats_key: String,
    pub theme_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".pethotel-chat"),
            stats_key: "chatStats".to_string(),
            theme_key: "theme".to_string(),
        }
    }
}
