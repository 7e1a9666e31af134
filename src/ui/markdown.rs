//! Markdown-lite: `**bold**` and `*italic*` within a line.

use colored::{Color, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    Plain(&'a str),
    Bold(&'a str),
    Italic(&'a str),
}

/// Split one line into styled spans. Markers never span lines; an
/// unmatched marker is kept as plain text.
pub fn parse_spans(line: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = line[cursor..].find('*') {
        let start = cursor + offset;
        let marker = if line[start..].starts_with("**") { "**" } else { "*" };
        let body_start = start + marker.len();

        match line[body_start..].find(marker) {
            Some(len) if len > 0 => {
                if start > plain_start {
                    spans.push(Span::Plain(&line[plain_start..start]));
                }
                let body = &line[body_start..body_start + len];
                spans.push(if marker == "**" {
                    Span::Bold(body)
                } else {
                    Span::Italic(body)
                });
                cursor = body_start + len + marker.len();
                plain_start = cursor;
            }
            _ => cursor = body_start,
        }
    }
    if plain_start < line.len() {
        spans.push(Span::Plain(&line[plain_start..]));
    }

    spans
}

/// Render with terminal styling, tinting text with `color`.
pub fn render(text: &str, color: Color) -> String {
    text.lines()
        .map(|line| {
            parse_spans(line)
                .into_iter()
                .map(|span| match span {
                    Span::Plain(s) => s.color(color).to_string(),
                    Span::Bold(s) => s.color(color).bold().to_string(),
                    Span::Italic(s) => s.color(color).italic().to_string(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop the markers, keeping the text.
pub fn strip(text: &str) -> String {
    text.lines()
        .map(|line| {
            parse_spans(line)
                .into_iter()
                .map(|span| match span {
                    Span::Plain(s) | Span::Bold(s) | Span::Italic(s) => s,
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
