//! Everything the event loop can ask the renderer to draw.

use super::{InputGauge, Toast};
use crate::health::ConnectionStatus;
use crate::stats::StatsSnapshot;
use crate::ui::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Echo of the user's question
    User(String),
    /// Assistant message in markdown-lite
    Assistant { text: String, is_error: bool },
    /// SQL the server mapped the question to, shown verbatim
    QueryDisplay(String),
    Toast(Toast),
    /// Connection status line
    Status(ConnectionStatus),
    /// Usage statistics panel
    Stats {
        snapshot: StatsSnapshot,
        connection: ConnectionStatus,
    },
    InputCounter(InputGauge),
    /// Questions the server can answer
    Questions(Vec<String>),
    ThemeChanged(Theme),
    Help,
    /// A request is in flight
    Loading,
}

impl Reply {
    pub fn assistant(text: impl Into<String>) -> Self {
        Reply::Assistant {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn assistant_error(text: impl Into<String>) -> Self {
        Reply::Assistant {
            text: text.into(),
            is_error: true,
        }
    }
}
