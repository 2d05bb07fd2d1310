use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::utils::centered_fixed;
use crate::domain::{Notification, NotificationLevel};

const fn level_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Info => Color::Cyan,
        NotificationLevel::Success => Color::Green,
        NotificationLevel::Warn => Color::Yellow,
        NotificationLevel::Error => Color::Red,
    }
}

/// Toasts sit in the top-right corner; blocking notices are centered and
/// carry an acknowledge hint.
pub struct NotificationPopup<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationPopup<'a> {
    #[must_use]
    pub const fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }

    fn render_toast(&self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.notification.title);
        let message = &self.notification.message;

        let max_popup_width = 60.min(area.width.saturating_sub(2));
        let width = u16::try_from(message.width())
            .unwrap_or(u16::MAX)
            .max(u16::try_from(title.width()).unwrap_or(0))
            .saturating_add(4)
            .min(max_popup_width);

        let inner_width = width.saturating_sub(2).max(1);
        let content_width = u16::try_from(message.width()).unwrap_or(0);
        let lines = content_width.div_ceil(inner_width);
        let height = lines.saturating_add(2).clamp(3, 10);

        let x = area.width.saturating_sub(width).saturating_sub(2);
        let popup_area = Rect::new(x, 2, width, height);

        let intersection = area.intersection(popup_area);
        if intersection.area() == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(level_color(self.notification.level)));

        let para = Paragraph::new(message.as_str())
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().add_modifier(Modifier::BOLD));

        Clear.render(intersection, buf);
        para.render(intersection, buf);
    }

    fn render_blocking(&self, area: Rect, buf: &mut Buffer) {
        let color = level_color(self.notification.level);
        let message_width = u16::try_from(self.notification.message.width()).unwrap_or(u16::MAX);
        let width = message_width.saturating_add(6).clamp(36, 64);
        let lines = message_width.div_ceil(width.saturating_sub(4).max(1));
        let popup_area = centered_fixed(width, lines.saturating_add(6), area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(color))
            .title(Line::from(format!(" {} ", self.notification.title)).centered());

        let text = vec![
            Line::raw(""),
            Line::raw(self.notification.message.as_str()),
            Line::raw(""),
            Line::from(Span::styled(
                "Enter: OK",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Clear.render(popup_area, buf);
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(popup_area, buf);
    }
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.notification.blocking {
            self.render_blocking(area, buf);
        } else {
            self.render_toast(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_blocking_notice_shows_ack_hint() {
        let notice = Notification::new(
            NotificationLevel::Warn,
            "Ride taken",
            "Another driver accepted this ride",
        )
        .blocking();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        NotificationPopup::new(&notice).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("Another driver accepted this ride"));
        assert!(text.contains("Enter: OK"));
    }

    #[test]
    fn test_toast_has_no_ack_hint() {
        let toast = Notification::new(NotificationLevel::Success, "Online", "Waiting for rides");
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        NotificationPopup::new(&toast).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("Waiting for rides"));
        assert!(!text.contains("Enter: OK"));
    }
}
