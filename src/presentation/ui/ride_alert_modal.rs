//! Modal shown for the ride request currently on display.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::utils::{centered_fixed, format_htg};
use crate::domain::entities::Ride;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct RideAlertModal<'a> {
    ride: &'a Ride,
    accepting: bool,
    frame: usize,
}

impl<'a> RideAlertModal<'a> {
    #[must_use]
    pub const fn new(ride: &'a Ride) -> Self {
        Self {
            ride,
            accepting: false,
            frame: 0,
        }
    }

    /// Replaces the key hints with a spinner while the accept is in flight.
    #[must_use]
    pub const fn accepting(mut self, accepting: bool, frame: usize) -> Self {
        self.accepting = accepting;
        self.frame = frame;
        self
    }

    fn detail<'b>(label: &'b str, value: String) -> Line<'b> {
        Line::from(vec![
            Span::styled(format!("{label:>12}  "), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    }
}

impl Widget for RideAlertModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_fixed(56, 13, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .title(Line::from(" NEW RIDE REQUEST ").centered());

        let ride = self.ride;
        let mut lines = vec![
            Line::raw(""),
            Self::detail(
                "Passenger",
                ride.passenger_name
                    .clone()
                    .unwrap_or_else(|| "Passenger".to_string()),
            ),
            Self::detail(
                "Pickup",
                ride.pickup_address
                    .clone()
                    .unwrap_or_else(|| "Unknown pickup".to_string()),
            ),
            Self::detail(
                "Destination",
                ride.destination_address
                    .clone()
                    .unwrap_or_else(|| "Unknown destination".to_string()),
            ),
            Self::detail("Vehicle", ride.vehicle_type.label().to_string()),
            Self::detail(
                "Fare",
                ride.estimated_price
                    .map_or_else(|| "--".to_string(), format_htg),
            ),
            Self::detail("Payment", ride.payment_method().to_string()),
            Line::raw(""),
        ];

        if self.accepting {
            lines.push(
                Line::from(Span::styled(
                    format!("{} Accepting...", SPINNER[self.frame % SPINNER.len()]),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                ))
                .alignment(Alignment::Center),
            );
        } else {
            lines.push(
                Line::from(vec![
                    Span::styled(
                        " a ",
                        Style::default()
                            .bg(Color::Green)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" Accept    "),
                    Span::styled(
                        " d ",
                        Style::default()
                            .bg(Color::DarkGray)
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" Dismiss"),
                ])
                .alignment(Alignment::Center),
            );
        }

        Clear.render(popup_area, buf);
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(popup_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RideStatus;

    fn render(modal: RideAlertModal<'_>) -> String {
        let area = Rect::new(0, 0, 70, 20);
        let mut buf = Buffer::empty(area);
        modal.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn request() -> Ride {
        let mut ride = Ride::new("17", RideStatus::Pending).with_prices(Some(350.0), None);
        ride.passenger_name = Some("Marie".to_string());
        ride.pickup_address = Some("Delmas 33".to_string());
        ride
    }

    #[test]
    fn test_shows_request_and_keys() {
        let ride = request();
        let text = render(RideAlertModal::new(&ride));

        assert!(text.contains("NEW RIDE REQUEST"));
        assert!(text.contains("Marie"));
        assert!(text.contains("Delmas 33"));
        assert!(text.contains("350.00 HTG"));
        assert!(text.contains("Accept"));
    }

    #[test]
    fn test_accepting_hides_keys() {
        let ride = request();
        let text = render(RideAlertModal::new(&ride).accepting(true, 1));

        assert!(text.contains("Accepting..."));
        assert!(!text.contains("Dismiss"));
    }
}
