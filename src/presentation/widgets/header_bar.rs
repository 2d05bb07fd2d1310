use crate::domain::ConnectionStatus;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

trait ConnectionStatusExt {
    fn indicator(self) -> &'static str;
    fn style(self) -> Style;
}

impl ConnectionStatusExt for ConnectionStatus {
    fn indicator(self) -> &'static str {
        match self {
            Self::Online => "●",
            Self::Connecting | Self::Degraded => "◐",
            Self::Offline => "○",
        }
    }

    fn style(self) -> Style {
        let (bg, fg) = match self {
            Self::Online => (Color::Green, Color::Black),
            Self::Connecting => (Color::Yellow, Color::Black),
            Self::Degraded => (Color::LightRed, Color::Black),
            Self::Offline => (Color::DarkGray, Color::White),
        };
        Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
    }
}

/// Top line: app name, version, driver, dispatch status.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    driver: Option<&'a str>,
    connection_status: ConnectionStatus,
    pending: Option<usize>,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(app_name: &'a str, version: &'a str) -> Self {
        Self {
            app_name,
            version,
            driver: None,
            connection_status: ConnectionStatus::default(),
            pending: None,
        }
    }

    #[must_use]
    pub const fn driver(mut self, name: &'a str) -> Self {
        self.driver = Some(name);
        self
    }

    #[must_use]
    pub const fn connection_status(mut self, status: ConnectionStatus) -> Self {
        self.connection_status = status;
        self
    }

    /// Open requests seen by the last successful poll.
    #[must_use]
    pub const fn pending(mut self, pending: Option<usize>) -> Self {
        self.pending = pending;
        self
    }

    fn status_text(&self) -> String {
        let indicator = self.connection_status.indicator();
        let label = self.connection_status.label().to_uppercase();
        match self.pending {
            Some(count) if self.connection_status == ConnectionStatus::Online => {
                format!(" {indicator} {label} · {count} open ")
            }
            _ => format!(" {indicator} {label} "),
        }
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_char(' ').set_style(Style::default());
        }

        let mut left_spans = vec![
            Span::styled(
                format!(" {} ", self.app_name.to_uppercase()),
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" v{} ", self.version),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if let Some(driver) = self.driver {
            left_spans.push(Span::styled(
                driver.to_string(),
                Style::default().fg(Color::White),
            ));
        }

        let left_line = Line::from(left_spans);
        let left_width = u16::try_from(left_line.width()).unwrap_or(u16::MAX);
        let left_area = Rect::new(area.x, area.y, left_width.min(area.width), 1);
        Paragraph::new(left_line).render(left_area, buf);

        let status = self.status_text();
        let status_width = u16::try_from(status.width()).unwrap_or(u16::MAX);
        if status_width < area.width.saturating_sub(left_width) {
            let right_x = area.right().saturating_sub(status_width);
            let right_area = Rect::new(right_x, area.y, status_width, 1);
            Paragraph::new(Line::from(Span::styled(
                status,
                self.connection_status.style(),
            )))
            .render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_status_indicator() {
        assert_eq!(ConnectionStatus::Online.indicator(), "●");
        assert_eq!(ConnectionStatus::Offline.indicator(), "○");
    }

    #[test]
    fn test_pending_count_only_when_online() {
        let online = HeaderBar::new("taptap", "0.1.0")
            .connection_status(ConnectionStatus::Online)
            .pending(Some(2));
        assert_eq!(online.status_text(), " ● ONLINE · 2 open ");

        let degraded = HeaderBar::new("taptap", "0.1.0")
            .connection_status(ConnectionStatus::Degraded)
            .pending(Some(2));
        assert_eq!(degraded.status_text(), " ◐ ONLINE (NO SIGNAL) ");
    }

    #[test]
    fn test_render_shows_driver() {
        let header = HeaderBar::new("taptap", "0.1.0").driver("Jean Driver");
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        header.render(area, &mut buf);

        let rendered: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(rendered.contains("TAPTAP"));
        assert!(rendered.contains("Jean Driver"));
        assert!(rendered.contains("OFFLINE"));
    }
}
