//! Interactive chat session.
//!
//! A single dispatcher owns the [`AppContext`] and drains an mpsc queue of
//! [`AppEvent`]s fed by the prompt reader and the health ticker. Handlers
//! return [`Reply`] values; only the dispatcher draws them.

mod context;
mod event;
mod reader;


pub use context::AppContext;
pub use event::AppEvent;
pub use reader::spawn_line_reader;

use crate::conversation::ConversationEngine;
use crate::health::HealthMonitor;
use crate::ui::{CounterLevel, InputGauge, Renderer, Reply, Toast};
use std::io::{self, Write};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub const WELCOME: &str = "Bem-vindo ao PetHotel AI! 🐾";

pub struct App<W: Write> {
    ctx: AppContext,
    engine: ConversationEngine,
    monitor: HealthMonitor,
    renderer: Renderer<W>,
    checked_once: bool,
}

impl<W: Write> App<W> {
    pub fn new(
        ctx: AppContext,
        engine: ConversationEngine,
        monitor: HealthMonitor,
        renderer: Renderer<W>,
    ) -> Self {
        Self {
            ctx,
            engine,
            monitor,
            renderer,
            checked_once: false,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn into_renderer(self) -> Renderer<W> {
        self.renderer
    }

    /// Drain `events` until `/sair`, EOF, or cancellation.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<AppEvent>,
        cancel_token: CancellationToken,
    ) -> io::Result<Self> {
        self.draw(&[Reply::Toast(Toast::info(WELCOME)), Reply::Help])?;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::debug!("Session cancelled");
                    break;
                }
                event = events.recv() => {
                    let Some(event) = event else { break };
                    if !self.dispatch(event).await? {
                        break;
                    }
                }
            }
        }

        cancel_token.cancel();
        Ok(self)
    }

    /// Handle one event and draw the result. Returns false on quit.
    pub async fn dispatch(&mut self, event: AppEvent) -> io::Result<bool> {
        tracing::trace!(?event, "Dispatching event");
        if event == AppEvent::Quit {
            return Ok(false);
        }
        if let AppEvent::SendRequested(question) = &event {
            if self.ready_to_send(question) {
                self.draw(&[Reply::Loading])?;
            }
        }

        let replies = self.handle(event).await;
        self.draw(&replies)?;
        Ok(true)
    }

    fn ready_to_send(&self, question: &str) -> bool {
        let gauge = InputGauge::measure(question.trim(), &self.ctx.ui);
        gauge.can_send && self.ctx.connection.online
    }

    fn draw(&mut self, replies: &[Reply]) -> io::Result<()> {
        self.renderer.render_all(replies, self.ctx.theme.current())
    }

    /// Replies for `event`, mutating the context as needed.
    pub async fn handle(&mut self, event: AppEvent) -> Vec<Reply> {
        match event {
            AppEvent::InputChanged(text) => {
                let gauge = InputGauge::measure(&text, &self.ctx.ui);
                if gauge.level == CounterLevel::Normal && gauge.can_send {
                    Vec::new()
                } else {
                    vec![Reply::InputCounter(gauge)]
                }
            }
            AppEvent::SendRequested(question) => self.send(&question).await,
            AppEvent::HealthTick => self.health_tick().await,
            AppEvent::ToggleTheme => match self.ctx.theme.toggle() {
                Ok(theme) => vec![Reply::ThemeChanged(theme)],
                Err(e) => {
                    tracing::warn!(error = %e, "Could not save theme preference");
                    vec![Reply::ThemeChanged(self.ctx.theme.current())]
                }
            },
            AppEvent::ShowStats => vec![Reply::Stats {
                snapshot: self.ctx.stats.snapshot(),
                connection: self.ctx.connection,
            }],
            AppEvent::ListQuestions => match self.engine.api().list_questions().await {
                Ok(catalog) => vec![Reply::Questions(catalog.questions)],
                Err(e) => {
                    tracing::warn!(error = %e, "Could not list questions");
                    vec![Reply::Toast(Toast::error(
                        "Não foi possível carregar as perguntas 🔌",
                    ))]
                }
            },
            AppEvent::Help => vec![Reply::Help],
            AppEvent::ClearStats => match self.ctx.stats.reset() {
                Ok(()) => vec![Reply::Toast(Toast::success("Estatísticas zeradas"))],
                Err(e) => {
                    tracing::warn!(error = %e, "Could not clear statistics");
                    vec![Reply::Toast(Toast::error("Não foi possível zerar as estatísticas"))]
                }
            },
            AppEvent::Quit => Vec::new(),
        }
    }

    async fn send(&mut self, question: &str) -> Vec<Reply> {
        let gauge = InputGauge::measure(question.trim(), &self.ctx.ui);
        if gauge.chars > gauge.max {
            return vec![
                Reply::InputCounter(gauge),
                Reply::Toast(Toast::warning(format!(
                    "A pergunta excede o limite de {} caracteres",
                    gauge.max
                ))),
            ];
        }

        self.engine
            .send(&mut self.ctx, question)
            .await
            .into_replies()
    }

    async fn health_tick(&mut self) -> Vec<Reply> {
        let result = self.monitor.check_health().await;
        let flipped = self.ctx.connection.apply(&result);
        let first = !self.checked_once;
        self.checked_once = true;
        if flipped || first {
            vec![Reply::Status(self.ctx.connection)]
        } else {
            Vec::new()
        }
    }
}
