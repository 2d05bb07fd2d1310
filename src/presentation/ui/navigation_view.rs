use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::application::dto::NavigationPlan;
use crate::domain::entities::{Coordinates, Ride};

/// Pickup and drop-off of the accepted ride, with keys to open the external map.
pub struct NavigationView<'a> {
    plan: &'a NavigationPlan,
    ride: Option<&'a Ride>,
}

impl<'a> NavigationView<'a> {
    #[must_use]
    pub const fn new(plan: &'a NavigationPlan, ride: Option<&'a Ride>) -> Self {
        Self { plan, ride }
    }

    fn stop_lines(
        heading: &'static str,
        address: &str,
        position: Coordinates,
        key: &'static str,
    ) -> Vec<Line<'static>> {
        let address = if address.trim().is_empty() {
            "Address not provided".to_string()
        } else {
            address.to_string()
        };
        let mut lines = vec![
            Line::from(Span::styled(
                heading,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(address),
        ];
        if position.is_known() {
            lines.push(Line::styled(
                position.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
            lines.push(Line::from(vec![
                Span::styled(format!(" {key} "), Style::default().bg(Color::Gray).fg(Color::Black)),
                Span::raw(" Open in maps"),
            ]));
        } else {
            lines.push(Line::styled(
                "Position unknown",
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines
    }
}

impl Widget for NavigationView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" Ride {} · {} ", self.plan.ride_id, self.plan.passenger_name));
        let inner = block.inner(area);
        block.render(area, buf);

        let [status_area, pickup_area, destination_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(5),
        ])
        .areas(inner);

        let status_line = match self.ride {
            Some(ride) => {
                let mut spans = vec![Span::styled(
                    ride.status.label().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
                if let Some(next) = ride.status.next_driver_step() {
                    spans.push(Span::raw("   "));
                    spans.push(Span::styled(
                        " n ",
                        Style::default().bg(Color::Cyan).fg(Color::Black),
                    ));
                    spans.push(Span::raw(format!(" Mark {}", next.as_str())));
                }
                Line::from(spans)
            }
            None => Line::styled(
                "This ride is no longer active.",
                Style::default().fg(Color::DarkGray),
            ),
        };
        Paragraph::new(vec![Line::raw(""), status_line]).render(status_area, buf);

        Paragraph::new(Self::stop_lines(
            "PICKUP",
            &self.plan.pickup_address,
            self.plan.pickup,
            "p",
        ))
        .wrap(Wrap { trim: true })
        .render(pickup_area, buf);

        Paragraph::new(Self::stop_lines(
            "DESTINATION",
            &self.plan.destination_address,
            self.plan.destination,
            "g",
        ))
        .wrap(Wrap { trim: true })
        .render(destination_area, buf);
    }
}
