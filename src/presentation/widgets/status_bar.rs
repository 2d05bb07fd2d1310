//! Bottom line with key hints and a short status message.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusBar {
    hints: Vec<(&'static str, &'static str)>,
    message: String,
    level: StatusLevel,
}

impl StatusBar {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hints: Vec::new(),
            message: String::new(),
            level: StatusLevel::Info,
        }
    }

    /// Adds a `key: action` hint on the left.
    #[must_use]
    pub fn hint(mut self, key: &'static str, action: &'static str) -> Self {
        self.hints.push((key, action));
        self
    }

    /// Sets the right-aligned message.
    #[must_use]
    pub fn message(mut self, content: impl Into<String>) -> Self {
        self.message = content.into();
        self
    }

    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }

    fn hint_spans(&self) -> Vec<Span<'static>> {
        let key_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Gray)
            .add_modifier(Modifier::BOLD);
        let action_style = Style::default().fg(Color::Gray);

        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (key, action) in &self.hints {
            spans.push(Span::styled(format!(" {key} "), key_style));
            spans.push(Span::styled(format!(" {action}"), action_style));
            spans.push(Span::raw("  "));
        }
        spans
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width as usize;
        let mut spans = self.hint_spans();
        let hints_width: usize = spans.iter().map(|span| span.content.width()).sum();

        let message_width = self.message.width();
        if !self.message.is_empty() && hints_width + message_width < width {
            spans.push(Span::raw(" ".repeat(width - hints_width - message_width)));
            spans.push(Span::styled(
                self.message.clone(),
                Style::default()
                    .fg(self.level.color())
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(bar: &StatusBar, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_hints_and_message() {
        let bar = StatusBar::new()
            .hint("o", "Go online")
            .hint("q", "Quit")
            .message("Offline")
            .level(StatusLevel::Warning);

        let line = rendered(&bar, 60);
        assert!(line.starts_with(" o  Go online"));
        assert!(line.trim_end().ends_with("Offline"));
    }

    #[test]
    fn test_message_dropped_when_narrow() {
        let bar = StatusBar::new().hint("q", "Quit").message("a long status message");
        assert!(!rendered(&bar, 12).contains("status"));
    }
}
