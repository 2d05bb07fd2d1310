use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use super::utils::{format_htg, format_timestamp, truncate};
use crate::application::services::EarningsSummary;
use crate::domain::entities::{Ride, WalletSnapshot};

const HISTORY_ROWS: usize = 50;

pub struct EarningsView<'a> {
    summary: &'a EarningsSummary,
    history: &'a [Ride],
    wallet: Option<&'a WalletSnapshot>,
}

impl<'a> EarningsView<'a> {
    #[must_use]
    pub const fn new(
        summary: &'a EarningsSummary,
        history: &'a [Ride],
        wallet: Option<&'a WalletSnapshot>,
    ) -> Self {
        Self {
            summary,
            history,
            wallet,
        }
    }

    fn summary_lines(&self) -> Vec<Line<'static>> {
        let row = |label: &str, amount: f64| {
            Line::from(vec![
                Span::styled(format!("{label:<14}"), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format_htg(amount),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        };

        let mut lines = vec![
            row("Today", self.summary.today),
            row("Last 7 days", self.summary.last_7_days),
            row("This month", self.summary.this_month),
            row("All time", self.summary.total),
            Line::from(vec![
                Span::styled(format!("{:<14}", "Rides"), Style::default().fg(Color::DarkGray)),
                Span::raw(self.summary.rides.to_string()),
            ]),
            Line::raw(""),
        ];

        match self.wallet {
            Some(wallet) => {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<14}", "Wallet"), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{:.2} {}", wallet.balance(), wallet.currency),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                if let Some(pending) = wallet.pending_withdrawals.filter(|p| *p > 0.0) {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{:<14}", "Pending payout"),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::raw(format!("{pending:.2} {}", wallet.currency)),
                    ]));
                }
            }
            None => lines.push(Line::styled(
                "Wallet loading...",
                Style::default().fg(Color::DarkGray),
            )),
        }
        lines
    }
}

impl Widget for EarningsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [summary_area, history_area] =
            Layout::horizontal([Constraint::Length(40), Constraint::Min(30)]).areas(area);

        Paragraph::new(self.summary_lines())
            .block(Block::default().borders(Borders::ALL).title(" Earnings "))
            .render(summary_area, buf);

        let header = Row::new(["Date", "Destination", "Payment", "Amount"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self.history.iter().take(HISTORY_ROWS).map(|ride| {
            Row::new([
                Cell::from(format_timestamp(ride.settled_at())),
                Cell::from(truncate(
                    ride.destination_address.as_deref().unwrap_or("--"),
                    28,
                )),
                Cell::from(ride.payment_method().to_string()),
                Cell::from(format_htg(ride.amount())),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Min(16),
                Constraint::Length(9),
                Constraint::Length(16),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Completed rides "),
        );
        Widget::render(table, history_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RideStatus;

    #[test]
    fn test_renders_totals_history_and_wallet() {
        let mut ride = Ride::new("1", RideStatus::Completed).with_prices(Some(300.0), Some(320.0));
        ride.destination_address = Some("Pétion-Ville".to_string());
        let history = vec![ride];
        let summary = EarningsSummary {
            today: 320.0,
            last_7_days: 320.0,
            this_month: 320.0,
            total: 320.0,
            rides: 1,
        };
        let wallet = WalletSnapshot::new(1500.0);

        let area = Rect::new(0, 0, 100, 16);
        let mut buf = Buffer::empty(area);
        EarningsView::new(&summary, &history, Some(&wallet)).render(area, &mut buf);
        let text: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");

        assert!(text.contains("320.00 HTG"));
        assert!(text.contains("Pétion-Ville"));
        assert!(text.contains("1500.00 HTG"));
    }
}
