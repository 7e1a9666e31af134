//! Draws [`Reply`] values to a terminal stream.

use super::{markdown, CounterLevel, Palette, Reply, Theme, Toast, ToastKind};
use crate::health::ConnectionStatus;
use crate::stats::StatsSnapshot;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::io::{self, Write};

/// Chat commands shown by `/ajuda`
pub const COMMANDS: [(&str, &str); 6] = [
    ("/perguntas", "lista as perguntas suportadas"),
    ("/stats", "mostra as estatísticas de uso"),
    ("/tema", "alterna entre tema claro e escuro"),
    ("/limpar", "zera as estatísticas salvas"),
    ("/ajuda", "mostra esta ajuda"),
    ("/sair", "encerra o chat"),
];

/// Writes replies to `out` using the active theme's palette.
pub struct Renderer<W: Write> {
    out: W,
    styled: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, styled: true }
    }

    /// Assistant text with markdown markers dropped instead of styled.
    pub fn plain(out: W) -> Self {
        Self { out, styled: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render_all(&mut self, replies: &[Reply], theme: Theme) -> io::Result<()> {
        for reply in replies {
            self.render(reply, theme)?;
        }
        self.out.flush()
    }

    pub fn render(&mut self, reply: &Reply, theme: Theme) -> io::Result<()> {
        let palette = theme.palette();
        match reply {
            Reply::User(text) => {
                writeln!(self.out, "{} {}", "Você:".color(palette.user).bold(), text)?;
            }
            Reply::Assistant { text, is_error } => {
                self.assistant(text, *is_error, &palette)?;
            }
            Reply::QueryDisplay(sql) => {
                for line in sql.lines() {
                    writeln!(self.out, "    {}", line.color(palette.query))?;
                }
            }
            Reply::Toast(toast) => {
                writeln!(self.out, "{}", toast_line(toast, &palette))?;
            }
            Reply::Status(status) => {
                writeln!(self.out, "{}", status_line(status, &palette))?;
            }
            Reply::Stats {
                snapshot,
                connection,
            } => {
                writeln!(self.out, "{}", stats_table(snapshot, Some(connection)))?;
            }
            Reply::InputCounter(gauge) => {
                let color = match gauge.level {
                    CounterLevel::Normal => palette.muted,
                    CounterLevel::Warning => palette.warning,
                    CounterLevel::Danger => palette.error,
                };
                let mut line = gauge.label().color(color).to_string();
                if !gauge.can_send {
                    line.push_str(&format!(" {}", "(envio desabilitado)".color(palette.muted)));
                }
                writeln!(self.out, "{}", line)?;
            }
            Reply::Questions(questions) => {
                writeln!(
                    self.out,
                    "{}",
                    "Perguntas que posso responder:".color(palette.accent).bold()
                )?;
                for question in questions {
                    writeln!(self.out, "  • {}", question)?;
                }
            }
            Reply::ThemeChanged(theme) => {
                let label = match theme {
                    Theme::Light => "Tema claro ativado",
                    Theme::Dark => "Tema escuro ativado",
                };
                writeln!(self.out, "{}", label.color(palette.accent))?;
            }
            Reply::Help => {
                writeln!(self.out, "{}", "Comandos:".color(palette.accent).bold())?;
                for (command, description) in COMMANDS {
                    writeln!(self.out, "  {:<12} {}", command.color(palette.accent), description)?;
                }
            }
            Reply::Loading => {
                writeln!(self.out, "{}", "⏳ Processando...".color(palette.muted))?;
            }
        }
        Ok(())
    }

    fn assistant(&mut self, text: &str, is_error: bool, palette: &Palette) -> io::Result<()> {
        writeln!(self.out, "{}", "PetHotel AI:".color(palette.accent).bold())?;
        let body = if self.styled {
            markdown::render(text, palette.assistant)
        } else {
            markdown::strip(text)
        };
        for line in body.lines() {
            if is_error {
                writeln!(self.out, "{} {}", "│".color(palette.error), line)?;
            } else {
                writeln!(self.out, "  {}", line)?;
            }
        }
        Ok(())
    }
}

fn toast_line(toast: &Toast, palette: &Palette) -> String {
    let color = match toast.kind {
        ToastKind::Success => palette.success,
        ToastKind::Error => palette.error,
        ToastKind::Warning => palette.warning,
        ToastKind::Info => palette.muted,
    };
    format!("{} {}", toast.kind.icon(), toast.message.color(color))
}

/// `● Online (42ms)` / `● Offline (--ms)`
pub fn status_line(status: &ConnectionStatus, palette: &Palette) -> String {
    let color = if status.online {
        palette.success
    } else {
        palette.error
    };
    format!(
        "{} {} ({})",
        "●".color(color),
        status.label().color(color),
        status.latency_label()
    )
}

/// Statistics as a two-column table. Connection rows only when known.
pub fn stats_table(snapshot: &StatsSnapshot, connection: Option<&ConnectionStatus>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Métrica", "Valor"]);

    let average = snapshot
        .average_response_ms
        .map(|ms| format!("{}ms", ms))
        .unwrap_or_else(|| "--".to_string());

    if let Some(connection) = connection {
        table.add_row(vec![Cell::new("API"), Cell::new(connection.label())]);
        table.add_row(vec![Cell::new("Latência"), Cell::new(connection.latency_label())]);
    }
    table.add_row(vec![
        Cell::new("Perguntas feitas"),
        Cell::new(snapshot.question_count),
    ]);
    table.add_row(vec![
        Cell::new("Perguntas respondidas"),
        Cell::new(snapshot.answered_questions),
    ]);
    table.add_row(vec![
        Cell::new("Consultas executadas"),
        Cell::new(snapshot.executed_queries),
    ]);
    table.add_row(vec![Cell::new("Tempo médio de resposta"), Cell::new(average)]);
    table.add_row(vec![
        Cell::new("Última consulta"),
        Cell::new(snapshot.last_query.as_deref().unwrap_or("--")),
    ]);

    table
}
