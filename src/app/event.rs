//! Events flowing into the dispatcher.

/// One unit of work for the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Prompt text changed; refresh the character counter
    InputChanged(String),
    /// User submitted a question
    SendRequested(String),
    /// Time to probe the API
    HealthTick,
    ToggleTheme,
    ShowStats,
    ListQuestions,
    Help,
    ClearStats,
    Quit,
}

impl AppEvent {
    /// Map one line of prompt input to events.
    ///
    /// Slash commands map to their event. Anything else is a question,
    /// preceded by an `InputChanged` so the counter reflects it. Unknown
    /// commands show the help.
    pub fn from_line(line: &str) -> Vec<AppEvent> {
        let trimmed = line.trim();
        if let Some(command) = trimmed.strip_prefix('/') {
            let event = match command.to_lowercase().as_str() {
                "tema" => AppEvent::ToggleTheme,
                "stats" => AppEvent::ShowStats,
                "perguntas" => AppEvent::ListQuestions,
                "limpar" => AppEvent::ClearStats,
                "sair" => AppEvent::Quit,
                _ => AppEvent::Help,
            };
            return vec![event];
        }

        vec![
            AppEvent::InputChanged(line.to_string()),
            AppEvent::SendRequested(line.to_string()),
        ]
    }
}
