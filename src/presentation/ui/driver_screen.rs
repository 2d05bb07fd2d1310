use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, StatefulWidget, Widget},
};

use super::dashboard_view::DashboardView;
use super::earnings_view::EarningsView;
use super::navigation_view::NavigationView;
use super::ride_alert_modal::RideAlertModal;
use super::settings_view::{SettingsAction, SettingsForm};
use super::utils::centered_fixed;
use crate::application::dto::NavigationPlan;
use crate::application::services::EarningsSummary;
use crate::domain::ConnectionStatus;
use crate::domain::entities::{
    DriverSettings, NotificationSound, Ride, RideStatus, User, WalletSnapshot,
};
use crate::presentation::widgets::{HeaderBar, StatusBar, StatusLevel, TextInput};
use crate::{NAME, VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverView {
    Dashboard,
    Navigation,
    Earnings,
    Settings,
}

/// The ride request modal as the tracker currently shows it.
#[derive(Debug, Clone)]
struct AlertDisplay {
    ride: Ride,
    accepting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DriverKeyResult {
    Consumed,
    Quit,
    Logout,
    ToggleOnline,
    Refresh,
    AcceptRequest,
    DismissRequest,
    AdvanceRide {
        ride: Ride,
        status: RideStatus,
    },
    CancelRide {
        ride: Ride,
        reason: Option<String>,
    },
    OpenPickupMap(NavigationPlan),
    OpenDestinationMap(NavigationPlan),
    LoadWallet,
    SettingsChanged {
        settings: DriverSettings,
        preview: Option<NotificationSound>,
    },
}

pub struct DriverScreenState {
    user: User,
    connection: ConnectionStatus,
    pending: Option<usize>,
    active_ride: Option<Ride>,
    history: Vec<Ride>,
    earnings: EarningsSummary,
    wallet: Option<WalletSnapshot>,
    view: DriverView,
    navigation: Option<NavigationPlan>,
    settings: SettingsForm,
    cancel_prompt: Option<TextInput>,
    alert: Option<AlertDisplay>,
    ride_update_in_flight: bool,
    frame: usize,
    status_message: Option<(String, StatusLevel)>,
}

impl DriverScreenState {
    #[must_use]
    pub fn new(user: User, settings: DriverSettings) -> Self {
        Self {
            user,
            connection: ConnectionStatus::Offline,
            pending: None,
            active_ride: None,
            history: Vec::new(),
            earnings: EarningsSummary::default(),
            wallet: None,
            view: DriverView::Dashboard,
            navigation: None,
            settings: SettingsForm::new(settings),
            cancel_prompt: None,
            alert: None,
            ride_update_in_flight: false,
            frame: 0,
            status_message: None,
        }
    }

    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    pub fn set_user(&mut self, user: User) {
        self.user = user;
    }

    #[must_use]
    pub const fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn set_connection(&mut self, connection: ConnectionStatus) {
        self.connection = connection;
        if !connection.is_online() {
            self.pending = None;
        }
    }

    /// Records a poll outcome; `pending` is `None` for a failed poll.
    pub fn on_poll(&mut self, pending: Option<usize>) {
        self.connection = self.connection.after_poll(pending.is_some());
        if pending.is_some() {
            self.pending = pending;
        }
    }

    #[must_use]
    pub const fn view(&self) -> DriverView {
        self.view
    }

    #[must_use]
    pub const fn active_ride(&self) -> Option<&Ride> {
        self.active_ride.as_ref()
    }

    pub fn set_active_ride(&mut self, ride: Option<Ride>) {
        self.active_ride = ride.filter(Ride::is_active);
    }

    pub fn set_history(&mut self, history: Vec<Ride>, earnings: EarningsSummary) {
        self.history = history;
        self.earnings = earnings;
    }

    pub fn set_wallet(&mut self, wallet: WalletSnapshot) {
        self.wallet = Some(wallet);
    }

    /// Enters the navigation view for a freshly accepted ride.
    pub fn start_navigation(&mut self, plan: NavigationPlan) {
        self.navigation = Some(plan);
        self.view = DriverView::Navigation;
    }

    pub const fn set_ride_update_in_flight(&mut self, in_flight: bool) {
        self.ride_update_in_flight = in_flight;
    }

    /// Mirrors the tracker's modal; `None` hides it.
    pub fn sync_alert(&mut self, displayed: Option<&Ride>, accepting: bool) {
        self.alert = displayed.map(|ride| AlertDisplay {
            ride: ride.clone(),
            accepting,
        });
    }

    #[must_use]
    pub const fn alert_visible(&self) -> bool {
        self.alert.is_some()
    }

    pub fn set_status_message(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status_message = Some((message.into(), level));
    }

    pub const fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DriverKeyResult {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return DriverKeyResult::Quit;
        }

        if let Some(alert) = &self.alert {
            return match key.code {
                KeyCode::Char('a') if !alert.accepting => DriverKeyResult::AcceptRequest,
                KeyCode::Char('d') | KeyCode::Esc if !alert.accepting => {
                    DriverKeyResult::DismissRequest
                }
                _ => DriverKeyResult::Consumed,
            };
        }

        if self.cancel_prompt.is_some() {
            return self.handle_cancel_prompt_key(key);
        }

        if self.view == DriverView::Settings {
            return match self.settings.handle_key(key) {
                SettingsAction::None => DriverKeyResult::Consumed,
                SettingsAction::Close => {
                    self.view = DriverView::Dashboard;
                    DriverKeyResult::Consumed
                }
                SettingsAction::Changed { settings, preview } => {
                    DriverKeyResult::SettingsChanged { settings, preview }
                }
            };
        }

        if let Some(result) = self.handle_global_key(key) {
            return result;
        }

        match self.view {
            DriverView::Dashboard => self.handle_ride_key(key),
            DriverView::Navigation => self.handle_navigation_key(key),
            DriverView::Earnings | DriverView::Settings => {
                if key.code == KeyCode::Esc {
                    self.view = DriverView::Dashboard;
                }
                DriverKeyResult::Consumed
            }
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> Option<DriverKeyResult> {
        match key.code {
            KeyCode::Char('q') => Some(DriverKeyResult::Quit),
            KeyCode::Char('L') => Some(DriverKeyResult::Logout),
            KeyCode::Char('o') => Some(DriverKeyResult::ToggleOnline),
            KeyCode::Char('r') => Some(DriverKeyResult::Refresh),
            KeyCode::Char('1') => {
                self.view = DriverView::Dashboard;
                Some(DriverKeyResult::Consumed)
            }
            KeyCode::Char('2') => {
                self.open_navigation();
                Some(DriverKeyResult::Consumed)
            }
            KeyCode::Char('3') => {
                self.view = DriverView::Earnings;
                Some(DriverKeyResult::LoadWallet)
            }
            KeyCode::Char('4') => {
                self.view = DriverView::Settings;
                Some(DriverKeyResult::Consumed)
            }
            _ => None,
        }
    }

    fn open_navigation(&mut self) {
        let current = self
            .navigation
            .as_ref()
            .zip(self.active_ride.as_ref())
            .is_some_and(|(plan, ride)| plan.ride_id == ride.id);
        if !current && let Some(ride) = &self.active_ride {
            self.navigation = Some(NavigationPlan::from_ride(ride));
        }
        if self.navigation.is_some() {
            self.view = DriverView::Navigation;
        }
    }

    fn handle_ride_key(&mut self, key: KeyEvent) -> DriverKeyResult {
        if self.ride_update_in_flight {
            return DriverKeyResult::Consumed;
        }
        let Some(ride) = &self.active_ride else {
            return DriverKeyResult::Consumed;
        };

        match key.code {
            KeyCode::Char('n') => ride.status.next_driver_step().map_or(
                DriverKeyResult::Consumed,
                |status| DriverKeyResult::AdvanceRide {
                    ride: ride.clone(),
                    status,
                },
            ),
            KeyCode::Char('x') => {
                let mut prompt = TextInput::new(" Reason (optional) ");
                prompt.set_focused(true);
                self.cancel_prompt = Some(prompt);
                DriverKeyResult::Consumed
            }
            KeyCode::Char('m') => {
                self.open_navigation();
                DriverKeyResult::Consumed
            }
            _ => DriverKeyResult::Consumed,
        }
    }

    fn handle_navigation_key(&mut self, key: KeyEvent) -> DriverKeyResult {
        let Some(plan) = &self.navigation else {
            self.view = DriverView::Dashboard;
            return DriverKeyResult::Consumed;
        };

        match key.code {
            KeyCode::Char('p') if plan.pickup.is_known() => {
                DriverKeyResult::OpenPickupMap(plan.clone())
            }
            KeyCode::Char('g') if plan.destination.is_known() => {
                DriverKeyResult::OpenDestinationMap(plan.clone())
            }
            KeyCode::Esc => {
                self.view = DriverView::Dashboard;
                DriverKeyResult::Consumed
            }
            _ => self.handle_ride_key(key),
        }
    }

    fn handle_cancel_prompt_key(&mut self, key: KeyEvent) -> DriverKeyResult {
        let Some(prompt) = &mut self.cancel_prompt else {
            return DriverKeyResult::Consumed;
        };

        match key.code {
            KeyCode::Esc => {
                self.cancel_prompt = None;
                DriverKeyResult::Consumed
            }
            KeyCode::Enter => {
                let reason = prompt.value().trim().to_string();
                self.cancel_prompt = None;
                self.active_ride
                    .clone()
                    .map_or(DriverKeyResult::Consumed, |ride| DriverKeyResult::CancelRide {
                        ride,
                        reason: (!reason.is_empty()).then_some(reason),
                    })
            }
            _ => {
                prompt.handle_key(key);
                DriverKeyResult::Consumed
            }
        }
    }

    /// Pushes persisted settings back into the form.
    pub const fn set_settings(&mut self, settings: DriverSettings) {
        self.settings.set_settings(settings);
    }

    fn status_bar(&self) -> StatusBar {
        let bar = if self.alert.is_some() {
            StatusBar::new().hint("a", "Accept").hint("d", "Dismiss")
        } else if self.cancel_prompt.is_some() {
            StatusBar::new().hint("Enter", "Cancel ride").hint("Esc", "Keep ride")
        } else {
            let toggle = if self.connection.is_online() {
                "Go offline"
            } else {
                "Go online"
            };
            match self.view {
                DriverView::Dashboard => StatusBar::new()
                    .hint("o", toggle)
                    .hint("3", "Earnings")
                    .hint("4", "Alerts")
                    .hint("r", "Refresh")
                    .hint("q", "Quit"),
                DriverView::Navigation => StatusBar::new()
                    .hint("p", "Pickup map")
                    .hint("g", "Destination map")
                    .hint("Esc", "Back"),
                DriverView::Earnings | DriverView::Settings => {
                    StatusBar::new().hint("Esc", "Back").hint("q", "Quit")
                }
            }
        };

        match &self.status_message {
            Some((message, level)) => bar.message(message.clone()).level(*level),
            None => bar,
        }
    }
}

pub struct DriverScreen;

impl DriverScreen {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DriverScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl StatefulWidget for DriverScreen {
    type State = DriverScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [header_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        HeaderBar::new(NAME, VERSION)
            .driver(state.user.display_name())
            .connection_status(state.connection)
            .pending(state.pending)
            .render(header_area, buf);

        render_content(state, content_area, buf);
        (&state.status_bar()).render(footer_area, buf);

        if let Some(prompt) = &state.cancel_prompt {
            render_cancel_prompt(prompt, content_area, buf);
        }

        if let Some(alert) = &state.alert {
            RideAlertModal::new(&alert.ride)
                .accepting(alert.accepting, state.frame)
                .render(content_area, buf);
        }
    }
}

fn render_content(state: &DriverScreenState, area: Rect, buf: &mut Buffer) {
    match state.view {
        DriverView::Dashboard => {
            DashboardView::new(
                &state.user,
                state.connection,
                state.active_ride.as_ref(),
                &state.earnings,
            )
            .busy(state.ride_update_in_flight)
            .render(area, buf);
        }
        DriverView::Navigation => {
            if let Some(plan) = &state.navigation {
                let ride = state
                    .active_ride
                    .as_ref()
                    .filter(|ride| ride.id == plan.ride_id);
                NavigationView::new(plan, ride).render(area, buf);
            }
        }
        DriverView::Earnings => {
            EarningsView::new(&state.earnings, &state.history, state.wallet.as_ref())
                .render(area, buf);
        }
        DriverView::Settings => {
            let width = area.width.min(48);
            (&state.settings).render(Rect { width, ..area }, buf);
        }
    }
}

fn render_cancel_prompt(prompt: &TextInput, area: Rect, buf: &mut Buffer) {
    let popup = centered_fixed(50, 5, area);
    Clear.render(popup, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Cancel this ride? ");
    let inner = block.inner(popup);
    block.render(popup, buf);
    prompt.render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ApprovalStatus, UserType};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> DriverScreenState {
        let user = User::new("42", "Jean Driver", UserType::Driver)
            .with_status(ApprovalStatus::Approved);
        DriverScreenState::new(user, DriverSettings::default())
    }

    fn active(status: RideStatus) -> Ride {
        Ride::new("7", status)
            .with_driver("42")
            .with_pickup(18.54, -72.34)
    }

    #[test]
    fn test_modal_captures_keys() {
        let mut state = state();
        let request = Ride::new("9", RideStatus::Pending);
        state.sync_alert(Some(&request), false);

        assert_eq!(state.handle_key(key(KeyCode::Char('o'))), DriverKeyResult::Consumed);
        assert_eq!(state.handle_key(key(KeyCode::Char('a'))), DriverKeyResult::AcceptRequest);
        assert_eq!(state.handle_key(key(KeyCode::Esc)), DriverKeyResult::DismissRequest);
    }

    #[test]
    fn test_accept_in_flight_ignores_keys() {
        let mut state = state();
        let request = Ride::new("9", RideStatus::Pending);
        state.sync_alert(Some(&request), true);

        assert_eq!(state.handle_key(key(KeyCode::Char('a'))), DriverKeyResult::Consumed);
        assert_eq!(state.handle_key(key(KeyCode::Char('d'))), DriverKeyResult::Consumed);
    }

    #[test]
    fn test_next_step_follows_status() {
        let mut state = state();
        state.set_active_ride(Some(active(RideStatus::Started)));

        assert_eq!(
            state.handle_key(key(KeyCode::Char('n'))),
            DriverKeyResult::AdvanceRide {
                ride: active(RideStatus::Started),
                status: RideStatus::Completed,
            }
        );
    }

    #[test]
    fn test_non_active_ride_is_not_kept() {
        let mut state = state();
        state.set_active_ride(Some(active(RideStatus::Completed)));
        assert!(state.active_ride().is_none());
    }

    #[test]
    fn test_cancel_prompt_with_and_without_reason() {
        let mut state = state();
        state.set_active_ride(Some(active(RideStatus::Accepted)));

        state.handle_key(key(KeyCode::Char('x')));
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), DriverKeyResult::Consumed);
        let result = state.handle_key(key(KeyCode::Enter));
        assert_eq!(
            result,
            DriverKeyResult::CancelRide {
                ride: active(RideStatus::Accepted),
                reason: Some("q".to_string()),
            }
        );

        state.handle_key(key(KeyCode::Char('x')));
        let result = state.handle_key(key(KeyCode::Enter));
        assert!(matches!(result, DriverKeyResult::CancelRide { reason: None, .. }));
    }

    #[test]
    fn test_navigation_opens_maps() {
        let mut state = state();
        let ride = active(RideStatus::Accepted);
        state.set_active_ride(Some(ride.clone()));
        state.start_navigation(NavigationPlan::from_ride(&ride));

        assert!(matches!(
            state.handle_key(key(KeyCode::Char('p'))),
            DriverKeyResult::OpenPickupMap(_)
        ));
        // Destination position unknown.
        assert_eq!(state.handle_key(key(KeyCode::Char('g'))), DriverKeyResult::Consumed);

        state.handle_key(key(KeyCode::Esc));
        assert_eq!(state.view(), DriverView::Dashboard);
    }

    #[test]
    fn test_earnings_view_requests_wallet() {
        let mut state = state();
        assert_eq!(state.handle_key(key(KeyCode::Char('3'))), DriverKeyResult::LoadWallet);
        assert_eq!(state.view(), DriverView::Earnings);
    }

    #[test]
    fn test_settings_view_owns_keys() {
        let mut state = state();
        state.handle_key(key(KeyCode::Char('4')));

        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), DriverKeyResult::Consumed);
        assert!(matches!(
            state.handle_key(key(KeyCode::Enter)),
            DriverKeyResult::SettingsChanged { .. }
        ));
        state.handle_key(key(KeyCode::Esc));
        assert_eq!(state.view(), DriverView::Dashboard);
    }

    #[test]
    fn test_poll_outcome_updates_connection() {
        let mut state = state();
        state.set_connection(ConnectionStatus::Connecting);
        state.on_poll(Some(3));
        assert_eq!(state.connection(), ConnectionStatus::Online);

        state.on_poll(None);
        assert_eq!(state.connection(), ConnectionStatus::Degraded);

        state.set_connection(ConnectionStatus::Offline);
        state.on_poll(Some(1));
        assert_eq!(state.connection(), ConnectionStatus::Offline);
    }
}
