use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::utils::{format_htg, truncate};
use crate::application::services::EarningsSummary;
use crate::domain::ConnectionStatus;
use crate::domain::entities::{ApprovalStatus, Ride, User};

/// Home view: profile, availability, the ride in progress and today's total.
pub struct DashboardView<'a> {
    user: &'a User,
    connection: ConnectionStatus,
    active_ride: Option<&'a Ride>,
    earnings: &'a EarningsSummary,
    busy: bool,
}

impl<'a> DashboardView<'a> {
    #[must_use]
    pub const fn new(
        user: &'a User,
        connection: ConnectionStatus,
        active_ride: Option<&'a Ride>,
        earnings: &'a EarningsSummary,
    ) -> Self {
        Self {
            user,
            connection,
            active_ride,
            earnings,
            busy: false,
        }
    }

    /// A ride status update is in flight.
    #[must_use]
    pub const fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    fn label(text: &str) -> Span<'static> {
        Span::styled(format!("{text:<10}"), Style::default().fg(Color::DarkGray))
    }

    fn profile_lines(&self) -> Vec<Line<'static>> {
        let user = self.user;
        let vehicle = [
            user.vehicle_brand.as_deref(),
            user.vehicle_model.as_deref(),
            user.vehicle_type.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

        let (status_text, status_color) = match &user.status {
            Some(ApprovalStatus::Approved) => ("approved".to_string(), Color::Green),
            Some(ApprovalStatus::Rejected) => ("rejected".to_string(), Color::Red),
            Some(ApprovalStatus::Pending) | None => ("pending review".to_string(), Color::Yellow),
            Some(ApprovalStatus::Other(other)) => (other.clone(), Color::Yellow),
        };

        vec![
            Line::from(Span::styled(
                user.display_name().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(vec![Self::label("Phone"), Span::raw(user.phone.clone())]),
            Line::from(vec![Self::label("City"), Span::raw(user.city.clone())]),
            Line::from(vec![
                Self::label("Vehicle"),
                Span::raw(if vehicle.is_empty() { "--".to_string() } else { vehicle }),
            ]),
            Line::from(vec![
                Self::label("Plate"),
                Span::raw(user.plate_number.clone().unwrap_or_else(|| "--".to_string())),
            ]),
            Line::from(vec![
                Self::label("Rating"),
                Span::raw(user.rating.map_or_else(|| "--".to_string(), |r| format!("{r:.1} ★"))),
            ]),
            Line::from(vec![Self::label("Rides"), Span::raw(user.total_rides.to_string())]),
            Line::from(vec![
                Self::label("Balance"),
                Span::raw(format_htg(user.wallet_balance.unwrap_or(0.0))),
            ]),
            Line::from(vec![
                Self::label("Account"),
                Span::styled(status_text, Style::default().fg(status_color)),
            ]),
        ]
    }

    fn availability_lines(&self) -> Vec<Line<'static>> {
        let (headline, color) = if self.connection.is_online() {
            ("ONLINE", Color::Green)
        } else {
            ("OFFLINE", Color::DarkGray)
        };

        let mut lines = vec![Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];

        let hint = match self.connection {
            ConnectionStatus::Offline if !self.user.is_approved() => {
                "Your account is waiting for approval."
            }
            ConnectionStatus::Offline => "Press o to start receiving rides.",
            ConnectionStatus::Connecting => "Looking for rides...",
            ConnectionStatus::Online => "Waiting for ride requests.",
            ConnectionStatus::Degraded => "Connection problem, retrying.",
        };
        lines.push(Line::styled(hint, Style::default().fg(Color::Gray)));
        lines
    }

    fn active_ride_lines(&self) -> Vec<Line<'static>> {
        let Some(ride) = self.active_ride else {
            return vec![Line::styled(
                "No ride in progress.",
                Style::default().fg(Color::DarkGray),
            )];
        };

        let mut lines = vec![
            Line::from(Span::styled(
                ride.status.label().to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Self::label("Passenger"),
                Span::raw(ride.passenger_name.clone().unwrap_or_else(|| "--".to_string())),
            ]),
            Line::from(vec![
                Self::label("Pickup"),
                Span::raw(truncate(ride.pickup_address.as_deref().unwrap_or("--"), 40)),
            ]),
            Line::from(vec![
                Self::label("To"),
                Span::raw(truncate(ride.destination_address.as_deref().unwrap_or("--"), 40)),
            ]),
            Line::from(vec![
                Self::label("Fare"),
                Span::raw(format!("{} ({})", format_htg(ride.amount()), ride.payment_method())),
            ]),
            Line::raw(""),
        ];

        if self.busy {
            lines.push(Line::styled(
                "Updating...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(next) = ride.status.next_driver_step() {
            lines.push(Line::from(vec![
                Span::styled(" n ", Style::default().bg(Color::Cyan).fg(Color::Black)),
                Span::raw(format!(" Mark {}   ", next.as_str())),
                Span::styled(" m ", Style::default().bg(Color::Gray).fg(Color::Black)),
                Span::raw(" Navigate   "),
                Span::styled(" x ", Style::default().bg(Color::Red).fg(Color::White)),
                Span::raw(" Cancel"),
            ]));
        }
        lines
    }
}

impl Widget for DashboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [profile_area, right_area] =
            Layout::horizontal([Constraint::Length(38), Constraint::Min(30)]).areas(area);
        let [availability_area, ride_area, earnings_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(9),
            Constraint::Length(3),
        ])
        .areas(right_area);

        Paragraph::new(self.profile_lines())
            .block(Block::default().borders(Borders::ALL).title(" Driver "))
            .wrap(Wrap { trim: true })
            .render(profile_area, buf);

        let availability_color = if self.connection.is_online() {
            Color::Green
        } else {
            Color::DarkGray
        };
        Paragraph::new(self.availability_lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(availability_color))
                    .title(" Availability "),
            )
            .render(availability_area, buf);

        Paragraph::new(self.active_ride_lines())
            .block(Block::default().borders(Borders::ALL).title(" Current ride "))
            .render(ride_area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Today  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_htg(self.earnings.today),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   {} completed rides", self.earnings.rides),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title(" Earnings "))
        .render(earnings_area, buf);
    }
}
