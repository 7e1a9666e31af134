//! Character counter for the chat prompt.

use crate::config::UiConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterLevel {
    Normal,
    Warning,
    Danger,
}

/// Length of the current input measured against the prompt limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputGauge {
    pub chars: usize,
    pub max: usize,
    pub level: CounterLevel,
    /// False when the input is empty or over the limit
    pub can_send: bool,
}

impl InputGauge {
    pub fn measure(text: &str, limits: &UiConfig) -> Self {
        let chars = text.chars().count();
        let level = if chars > limits.danger_input_chars {
            CounterLevel::Danger
        } else if chars > limits.warn_input_chars {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        };

        Self {
            chars,
            max: limits.max_input_chars,
            level,
            can_send: chars > 0 && chars <= limits.max_input_chars,
        }
    }

    /// `"N/MAX"`
    pub fn label(&self) -> String {
        format!("{}/{}", self.chars, self.max)
    }
}
