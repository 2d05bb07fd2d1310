//! Ride alert preferences.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::entities::{DriverSettings, NOTIFICATION_SOUNDS, NotificationSound};

/// Row 0 toggles the sound, rows 1..=5 pick a tone, the last row toggles vibration.
const ROWS: usize = NOTIFICATION_SOUNDS.len() + 2;
const VIBRATION_ROW: usize = ROWS - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    /// Settings changed; `preview` is set when a tone was picked.
    Changed {
        settings: DriverSettings,
        preview: Option<NotificationSound>,
    },
    Close,
}

#[derive(Debug, Clone)]
pub struct SettingsForm {
    settings: DriverSettings,
    cursor: usize,
}

impl SettingsForm {
    #[must_use]
    pub const fn new(settings: DriverSettings) -> Self {
        Self {
            settings,
            cursor: 0,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> DriverSettings {
        self.settings
    }

    pub const fn set_settings(&mut self, settings: DriverSettings) {
        self.settings = settings;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SettingsAction {
        match key.code {
            KeyCode::Esc => SettingsAction::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(ROWS - 1);
                SettingsAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1) % ROWS;
                SettingsAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            _ => SettingsAction::None,
        }
    }

    fn activate(&mut self) -> SettingsAction {
        let preview = match self.cursor {
            0 => {
                self.settings.ride_sound_enabled = !self.settings.ride_sound_enabled;
                None
            }
            VIBRATION_ROW => {
                self.settings.vibration_enabled = !self.settings.vibration_enabled;
                None
            }
            row => {
                self.settings.select_sound(row - 1);
                Some(self.settings.sound())
            }
        };
        SettingsAction::Changed {
            settings: self.settings,
            preview,
        }
    }
}

impl Widget for &SettingsForm {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let checkbox = |on: bool| if on { "[x]" } else { "[ ]" };
        let row_style = |row: usize| {
            if row == self.cursor {
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {} Ride sound ", checkbox(self.settings.ride_sound_enabled)),
                row_style(0),
            )),
            Line::raw(""),
        ];

        let sound_dimmed = !self.settings.ride_sound_enabled;
        for sound in NOTIFICATION_SOUNDS {
            let selected = sound.index == self.settings.ride_sound_index;
            let marker = if selected { "(•)" } else { "( )" };
            let mut style = row_style(sound.index + 1);
            if sound_dimmed && sound.index + 1 != self.cursor {
                style = style.fg(Color::DarkGray);
            }
            lines.push(Line::from(Span::styled(
                format!("   {marker} {} ", sound.label),
                style,
            )));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!(" {} Vibration ", checkbox(self.settings.vibration_enabled)),
            row_style(VIBRATION_ROW),
        )));
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Enter: toggle / pick and preview   Esc: back",
            Style::default().fg(Color::DarkGray),
        ));

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Ride alerts "),
            )
            .render(area, buf);
    }
}
