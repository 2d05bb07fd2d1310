//! Login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::dto::LoginRequest;
use crate::domain::entities::UserType;
use crate::presentation::widgets::TextInput;

/// Account types offered on the sign-in form. Passengers have no console.
const ACCOUNT_TYPES: [UserType; 4] = [
    UserType::Driver,
    UserType::Admin,
    UserType::Subadmin,
    UserType::Superadmin,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Input,
    Validating,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Identifier,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit,
    DeleteToken,
}

pub struct LoginScreen {
    identifier_input: TextInput,
    password_input: TextInput,
    focus: Field,
    account_type: usize,
    state: LoginState,
    error_message: Option<String>,
    persist_token: bool,
}

impl LoginScreen {
    #[must_use]
    pub fn new() -> Self {
        let mut identifier_input =
            TextInput::new(" Phone or email ").placeholder("+509 3712 3456 or you@example.com");
        identifier_input.set_focused(true);
        let password_input = TextInput::new(" Password ").password();

        Self {
            identifier_input,
            password_input,
            focus: Field::Identifier,
            account_type: 0,
            state: LoginState::Input,
            error_message: None,
            persist_token: true,
        }
    }

    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    #[must_use]
    pub const fn should_persist(&self) -> bool {
        self.persist_token
    }

    #[must_use]
    pub const fn account_type(&self) -> UserType {
        ACCOUNT_TYPES[self.account_type]
    }

    /// Builds the request from the form, or `None` while a field is empty.
    #[must_use]
    pub fn request(&self) -> Option<LoginRequest> {
        let identifier = self.identifier_input.value().trim();
        let password = self.password_input.value();
        if identifier.is_empty() || password.is_empty() {
            return None;
        }

        let request = LoginRequest::new(identifier, password).as_user_type(self.account_type());
        Some(if self.persist_token {
            request
        } else {
            request.without_persistence()
        })
    }

    pub fn set_validating(&mut self) {
        self.state = LoginState::Validating;
        self.error_message = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error;
        self.error_message = Some(message.into());
        self.password_input.clear();
        self.set_focus(Field::Password);
    }

    pub fn reset(&mut self) {
        self.state = LoginState::Input;
        self.error_message = None;
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        self.identifier_input
            .set_focused(field == Field::Identifier);
        self.password_input.set_focused(field == Field::Password);
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            Field::Identifier => &mut self.identifier_input,
            Field::Password => &mut self.password_input,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.state == LoginState::Validating {
            return LoginAction::None;
        }

        if self.state == LoginState::Error {
            self.reset();
        }

        match key.code {
            KeyCode::Enter => match self.focus {
                Field::Identifier => self.set_focus(Field::Password),
                Field::Password => {
                    if self.request().is_some() {
                        return LoginAction::Submit;
                    }
                }
            },
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::ALT) => {
                return LoginAction::DeleteToken;
            }
            KeyCode::Up | KeyCode::BackTab => self.set_focus(Field::Identifier),
            KeyCode::Down => self.set_focus(Field::Password),
            KeyCode::Tab => {
                self.persist_token = !self.persist_token;
            }
            KeyCode::F(2) => {
                self.account_type = (self.account_type + 1) % ACCOUNT_TYPES.len();
            }
            _ => {
                self.focused_input().handle_key(key);
            }
        }

        LoginAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(16),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(54),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" TapTapGo Driver ");

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [
            title_area,
            _,
            identifier_area,
            password_area,
            account_area,
            persist_area,
            _,
            status_area,
        ] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(inner);

        Paragraph::new("Sign in to start receiving rides")
            .style(Style::default().fg(Color::White))
            .render(title_area, buf);

        (&self.identifier_input).render(identifier_area, buf);
        (&self.password_input).render(password_area, buf);

        Paragraph::new(Line::from(vec![
            Span::raw("Account: "),
            Span::styled(
                self.account_type().as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" (F2 to change)", Style::default().fg(Color::DarkGray)),
        ]))
        .render(account_area, buf);

        let checkbox = if self.persist_token { "[x]" } else { "[ ]" };
        Paragraph::new(Line::from(vec![
            Span::styled(checkbox, Style::default().fg(Color::Yellow)),
            Span::raw(" Remember me (Tab to toggle)"),
        ]))
        .render(persist_area, buf);

        let status = match self.state {
            LoginState::Input => Line::from(vec![
                Span::styled("Enter: Login", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Esc: Quit", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Alt+D: Forget Session", Style::default().fg(Color::DarkGray)),
            ]),
            LoginState::Validating => Line::from(Span::styled(
                "Signing in...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            LoginState::Error => {
                let msg = self.error_message.as_deref().unwrap_or("Unknown error");
                Line::from(Span::styled(
                    format!("Error: {msg}"),
                    Style::default().fg(Color::Red),
                ))
            }
        };
        Paragraph::new(status)
            .wrap(ratatui::widgets::Wrap { trim: true })
            .render(status_area, buf);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_initial_state() {
        let screen = LoginScreen::new();
        assert_eq!(screen.state(), LoginState::Input);
        assert!(screen.request().is_none());
        assert!(screen.should_persist());
        assert_eq!(screen.account_type(), UserType::Driver);
    }

    #[test]
    fn test_enter_moves_to_password_then_submits() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "+50937123456");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);

        type_text(&mut screen, "secret");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::Submit);

        let request = screen.request().unwrap();
        assert_eq!(request.phone_or_email, "+50937123456");
        assert_eq!(request.password.as_str(), "secret");
        assert_eq!(request.user_type, UserType::Driver);
        assert!(request.persist_token);
    }

    #[test]
    fn test_submit_requires_both_fields() {
        let mut screen = LoginScreen::new();
        screen.handle_key(key(KeyCode::Down));
        type_text(&mut screen, "secret");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
    }

    #[test]
    fn test_toggle_persist() {
        let mut screen = LoginScreen::new();
        screen.handle_key(key(KeyCode::Tab));
        assert!(!screen.should_persist());

        type_text(&mut screen, "jean@example.com");
        screen.handle_key(key(KeyCode::Down));
        type_text(&mut screen, "pw");
        assert!(!screen.request().unwrap().persist_token);
    }

    #[test]
    fn test_account_type_cycles() {
        let mut screen = LoginScreen::new();
        screen.handle_key(key(KeyCode::F(2)));
        assert_eq!(screen.account_type(), UserType::Admin);
        for _ in 0..3 {
            screen.handle_key(key(KeyCode::F(2)));
        }
        assert_eq!(screen.account_type(), UserType::Driver);
    }

    #[test]
    fn test_error_clears_password() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "jean@example.com");
        screen.handle_key(key(KeyCode::Down));
        type_text(&mut screen, "wrong");
        screen.set_error("Invalid credentials");

        assert_eq!(screen.state(), LoginState::Error);
        assert!(screen.request().is_none());

        screen.handle_key(key(KeyCode::Char('x')));
        assert_eq!(screen.state(), LoginState::Input);
    }

    #[test]
    fn test_delete_token_action() {
        let mut screen = LoginScreen::new();
        let event = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::ALT);
        assert_eq!(screen.handle_key(event), LoginAction::DeleteToken);
    }
}
