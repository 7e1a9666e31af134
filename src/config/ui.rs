//! Chat input settings

use serde::{Deserialize, Serialize};

/// Input length limits for the chat prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Hard cap; longer input cannot be sent
    pub max_input_chars: usize,
    /// Counter turns to the warning color above this
    pub warn_input_chars: usize,
    /// Counter turns to the error color above this
    pub danger_input_chars: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 500,
            warn_input_chars: 400,
            danger_input_chars: 450,
        }
    }
}
