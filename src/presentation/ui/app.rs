//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use parking_lot::RwLock;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::{Instant, interval, interval_at};
use tracing::{debug, error, info, warn};

use super::driver_screen::{DriverKeyResult, DriverScreen, DriverScreenState};
use super::login_screen::{LoginAction, LoginScreen};
use super::notification_popup::NotificationPopup;
use super::utils::format_htg;
use crate::application::dto::{LoginRequest, NavigationPlan, TokenSource};
use crate::application::services::{
    AlertPlayer, EarningsSummary, NotificationManager, RideAlertEvent, RideAlertPoller,
    RideAlertTracker, SharedRideAlerts,
};
use crate::application::use_cases::{
    AcceptOutcome, AcceptRideUseCase, AvailabilityUseCase, LoginUseCase, ProfileUseCase,
    ResolveTokenUseCase, RideProgress, RideStatusUseCase, WalletUseCase, accept_failure_message,
    require_role,
};
use crate::domain::entities::{
    AuthToken, DriverSettings, Ride, RideStatus, User, UserType, WalletSnapshot,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    AlertPort, AuthPort, MapLauncherPort, ProfilePort, RidePort, TokenStoragePort, WalletPort,
};
use crate::domain::{ConnectionStatus, NotificationLevel};
use crate::infrastructure::config::StorageManager;
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::widgets::StatusLevel;

const UI_TICK_RATE: Duration = Duration::from_millis(250);
const SUPERSEDED_MESSAGE: &str = "Another driver accepted this ride.";

/// Backend and device adapters the console runs against.
pub struct AppPorts {
    pub auth: Arc<dyn AuthPort>,
    pub rides: Arc<dyn RidePort>,
    pub profile: Arc<dyn ProfilePort>,
    pub wallet: Arc<dyn WalletPort>,
    pub token_storage: Arc<dyn TokenStoragePort>,
    pub alerts: Arc<dyn AlertPort>,
    pub map_launcher: Arc<dyn MapLauncherPort>,
}

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub poll_interval_ms: u64,
    pub map_url_base: String,
    pub dashboard_refresh: Duration,
    pub profile_refresh: Duration,
    pub notification_duration: Duration,
}

#[derive(Debug)]
enum Action {
    LoginFinished(Result<User, ApiError>),
    DashboardLoaded {
        active: Option<Ride>,
        history: Vec<Ride>,
    },
    ProfileRefreshed(User),
    AvailabilityChanged(Result<User, ApiError>),
    AcceptFinished(Result<AcceptOutcome, ApiError>),
    RideUpdated(Result<RideProgress, ApiError>),
    WalletLoaded(WalletSnapshot),
    LoadFailed {
        what: &'static str,
        error: ApiError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Login,
    Driving,
    Exiting,
}

enum CurrentScreen {
    Login(LoginScreen),
    Driver(Box<DriverScreenState>),
}

pub struct App {
    state: AppState,
    screen: CurrentScreen,
    auth: Arc<dyn AuthPort>,
    map_launcher: Arc<dyn MapLauncherPort>,
    login_use_case: Arc<LoginUseCase>,
    resolve_token_use_case: ResolveTokenUseCase,
    availability: Arc<AvailabilityUseCase>,
    accept_ride: Arc<AcceptRideUseCase>,
    ride_status: Arc<RideStatusUseCase>,
    profile: Arc<ProfileUseCase>,
    wallet: Arc<WalletUseCase>,
    tracker: SharedRideAlerts,
    poller: RideAlertPoller,
    player: AlertPlayer,
    settings: Arc<RwLock<DriverSettings>>,
    storage: StorageManager,
    notifications: NotificationManager,
    options: AppOptions,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    alert_tx: mpsc::UnboundedSender<RideAlertEvent>,
    alert_rx: mpsc::UnboundedReceiver<RideAlertEvent>,
    availability_in_flight: bool,
}

impl App {
    #[must_use]
    pub fn new(ports: AppPorts, options: AppOptions, storage: StorageManager) -> Self {
        let settings = storage.load_settings().unwrap_or_else(|e| {
            warn!(error = %e, "Could not load driver settings, using defaults");
            DriverSettings::default()
        });
        let settings = Arc::new(RwLock::new(settings));

        let tracker = RideAlertTracker::shared();
        let player = AlertPlayer::new(ports.alerts);
        let poller = RideAlertPoller::new(
            options.poll_interval_ms,
            Arc::clone(&ports.rides),
            Arc::clone(&tracker),
            player.clone(),
            Arc::clone(&settings),
        );

        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (alert_tx, alert_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::Login,
            screen: CurrentScreen::Login(LoginScreen::new()),
            login_use_case: Arc::new(LoginUseCase::new(
                Arc::clone(&ports.auth),
                Arc::clone(&ports.token_storage),
            )),
            resolve_token_use_case: ResolveTokenUseCase::new(ports.token_storage),
            auth: ports.auth,
            availability: Arc::new(AvailabilityUseCase::new(Arc::clone(&ports.profile))),
            accept_ride: Arc::new(AcceptRideUseCase::new(
                Arc::clone(&ports.rides),
                Arc::clone(&ports.map_launcher),
                Arc::clone(&tracker),
                options.map_url_base.clone(),
            )),
            ride_status: Arc::new(RideStatusUseCase::new(ports.rides)),
            profile: Arc::new(ProfileUseCase::new(ports.profile)),
            wallet: Arc::new(WalletUseCase::new(ports.wallet)),
            map_launcher: ports.map_launcher,
            tracker,
            poller,
            player,
            settings,
            storage,
            notifications: NotificationManager::new(options.notification_duration),
            options,
            action_tx,
            action_rx,
            alert_tx,
            alert_rx,
            availability_in_flight: false,
        }
    }

    /// # Errors
    /// Returns error if the terminal cannot be drawn.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        cli_token: Option<String>,
    ) -> color_eyre::Result<()> {
        match self.resolve_token_use_case.execute(cli_token).await {
            Ok(Some(resolved)) => {
                info!(source = %resolved.source, "Found existing token");
                self.attempt_restore(resolved.token, resolved.source).await;
            }
            Ok(None) => debug!("No stored session"),
            Err(e) => warn!(error = %e, "Token resolution failed"),
        }

        self.run_event_loop(terminal).await?;

        self.poller.stop();
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut ui_tick = interval(UI_TICK_RATE);
        let mut dashboard_refresh = interval_at(
            Instant::now() + self.options.dashboard_refresh,
            self.options.dashboard_refresh,
        );
        let mut profile_refresh = interval_at(
            Instant::now() + self.options.profile_refresh,
            self.options.profile_refresh,
        );

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            tokio::select! {
                biased;

                Some(event) = self.alert_rx.recv() => {
                    self.handle_alert_event(event);
                }

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event).await == EventResult::Exit {
                        self.state = AppState::Exiting;
                    }
                }

                _ = ui_tick.tick() => {
                    self.notifications.tick();
                    if let CurrentScreen::Driver(state) = &mut self.screen {
                        state.tick();
                    }
                }

                _ = dashboard_refresh.tick() => {
                    if self.poller.is_running() {
                        self.refresh_dashboard();
                    }
                }

                _ = profile_refresh.tick() => {
                    if self.state == AppState::Driving {
                        self.refresh_profile();
                    }
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    async fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if EventHandler::is_press(&key) => self.handle_key(key).await,
            _ => EventResult::Continue,
        }
    }

    async fn attempt_restore(&mut self, token: AuthToken, source: TokenSource) {
        debug!("Attempting automatic login");

        if let CurrentScreen::Login(ref mut login_screen) = self.screen {
            login_screen.set_validating();
        }

        match self.login_use_case.restore(token, source).await {
            Ok(response) => {
                info!(user = %response.user.display_name(), %source, "Session restored");
                self.start_session(response.user);
            }
            Err(e) => {
                error!(error = %e, "Automatic login failed");
                if let CurrentScreen::Login(ref mut login_screen) = self.screen {
                    if e.is_unauthorized() {
                        login_screen.set_error("Your session expired. Please sign in again.");
                    } else {
                        login_screen.set_error(login_error_message(&e));
                    }
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        match &mut self.screen {
            CurrentScreen::Login(screen) => {
                frame.render_widget(&*screen, frame.area());
            }
            CurrentScreen::Driver(state) => {
                {
                    let tracker = self.tracker.lock();
                    state.sync_alert(tracker.displayed(), tracker.is_accepting());
                }
                frame.render_stateful_widget(DriverScreen::new(), frame.area(), &mut **state);
            }
        }

        if let Some(notification) = self.notifications.current_notification() {
            frame.render_widget(NotificationPopup::new(notification), frame.area());
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if self.notifications.is_blocking() {
            if EventHandler::is_ack_event(&key) {
                self.notifications.acknowledge();
            }
            return EventResult::Continue;
        }

        let result = match &mut self.screen {
            CurrentScreen::Login(screen) => {
                if EventHandler::is_quit_event(&key) {
                    return EventResult::Exit;
                }
                match screen.handle_key(key) {
                    LoginAction::Submit => self.handle_login_submit(),
                    LoginAction::DeleteToken => self.handle_delete_token().await,
                    LoginAction::None => {}
                }
                return EventResult::Continue;
            }
            CurrentScreen::Driver(state) => state.handle_key(key),
        };

        match result {
            DriverKeyResult::Quit => return EventResult::Exit,
            DriverKeyResult::Logout => self.logout().await,
            DriverKeyResult::ToggleOnline => self.toggle_online(),
            DriverKeyResult::Refresh => {
                self.refresh_dashboard();
                self.refresh_profile();
            }
            DriverKeyResult::AcceptRequest => self.accept_displayed(),
            DriverKeyResult::DismissRequest => {
                if let Some(ride) = self.tracker.lock().dismiss() {
                    info!(ride_id = %ride.id, "Ride request dismissed");
                }
            }
            DriverKeyResult::AdvanceRide { ride, status } => {
                self.update_ride(ride, status, None);
            }
            DriverKeyResult::CancelRide { ride, reason } => {
                self.update_ride(ride, RideStatus::Cancelled, reason);
            }
            DriverKeyResult::OpenPickupMap(plan) => {
                self.open_map(plan.pickup_directions_url(&self.options.map_url_base));
            }
            DriverKeyResult::OpenDestinationMap(plan) => {
                self.open_map(plan.destination_directions_url(&self.options.map_url_base));
            }
            DriverKeyResult::LoadWallet => self.load_wallet(),
            DriverKeyResult::SettingsChanged { settings, preview } => {
                self.apply_settings(settings);
                if let Some(sound) = preview {
                    self.player.preview(sound);
                }
            }
            DriverKeyResult::Consumed => {}
        }

        EventResult::Continue
    }

    fn handle_login_submit(&mut self) {
        let CurrentScreen::Login(ref mut screen) = self.screen else {
            return;
        };
        let Some(request): Option<LoginRequest> = screen.request() else {
            return;
        };
        screen.set_validating();

        let login = Arc::clone(&self.login_use_case);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = login.execute(request).await.map(|response| {
                info!(
                    user = %response.user.display_name(),
                    persisted = response.token_persisted,
                    "Login successful"
                );
                response.user
            });
            let _ = tx.send(Action::LoginFinished(result));
        });
    }

    async fn handle_delete_token(&mut self) {
        match self.login_use_case.delete_token().await {
            Ok(()) => self
                .notifications
                .info("Session", "Saved session removed from this device."),
            Err(e) => self
                .notifications
                .error("Session", format!("Could not remove saved session: {e}")),
        }
    }

    fn start_session(&mut self, user: User) {
        if let Err(e) = require_role(&user, |role| role == UserType::Driver) {
            warn!(user_type = %user.user_type, "Account cannot open the driver console");
            self.auth.end_session();
            let message = if user.user_type.is_admin() {
                "Signed in as an administrator. Manage city pricing with `taptap-driver pricing`."
                    .to_string()
            } else {
                e.to_string()
            };
            if let CurrentScreen::Login(ref mut screen) = self.screen {
                screen.set_error(message);
            }
            return;
        }

        info!(user_id = %user.id, online = user.is_online, "Opening driver console");
        let resume_online = user.is_online && user.is_approved();
        let settings = *self.settings.read();
        self.state = AppState::Driving;
        self.screen = CurrentScreen::Driver(Box::new(DriverScreenState::new(user, settings)));

        if resume_online {
            self.go_online_locally();
        }
        self.refresh_dashboard();
    }

    fn go_online_locally(&mut self) {
        self.poller.start(self.alert_tx.clone());
        if let CurrentScreen::Driver(ref mut state) = self.screen {
            state.set_connection(ConnectionStatus::Connecting);
        }
    }

    fn go_offline_locally(&mut self) {
        self.poller.stop();
        if let CurrentScreen::Driver(ref mut state) = self.screen {
            state.set_connection(ConnectionStatus::Offline);
        }
    }

    async fn logout(&mut self) {
        info!("Logging out");
        self.poller.stop();
        self.auth.end_session();
        if let Err(e) = self.login_use_case.delete_token().await {
            warn!(error = %e, "Saved session could not be removed");
        }
        self.transition_to_login(None);
    }

    fn transition_to_login(&mut self, message: Option<&str>) {
        self.poller.stop();
        self.state = AppState::Login;
        self.availability_in_flight = false;
        let mut screen = LoginScreen::new();
        if let Some(message) = message {
            screen.set_error(message);
        }
        self.screen = CurrentScreen::Login(screen);
    }

    fn expire_session(&mut self) {
        warn!("Backend rejected the session token");
        self.auth.end_session();
        self.transition_to_login(Some("Your session expired. Please sign in again."));
    }

    fn current_user(&self) -> Option<User> {
        match &self.screen {
            CurrentScreen::Driver(state) => Some(state.user().clone()),
            CurrentScreen::Login(_) => None,
        }
    }

    fn toggle_online(&mut self) {
        if self.availability_in_flight {
            return;
        }
        let Some(user) = self.current_user() else {
            return;
        };
        let online = !self.poller.is_running();
        self.availability_in_flight = true;

        let availability = Arc::clone(&self.availability);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = availability.set_online(&user, online).await;
            let _ = tx.send(Action::AvailabilityChanged(result));
        });
    }

    fn refresh_dashboard(&self) {
        if self.state != AppState::Driving {
            return;
        }
        let ride_status = Arc::clone(&self.ride_status);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let (active, history) = tokio::join!(ride_status.active_ride(), ride_status.history());
            let action = match (active, history) {
                (Ok(active), Ok(history)) => Action::DashboardLoaded { active, history },
                (Err(error), _) | (_, Err(error)) => Action::LoadFailed {
                    what: "rides",
                    error,
                },
            };
            let _ = tx.send(action);
        });
    }

    fn refresh_profile(&self) {
        let profile = Arc::clone(&self.profile);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match profile.refresh().await {
                Ok(user) => Action::ProfileRefreshed(user),
                Err(error) => Action::LoadFailed {
                    what: "profile",
                    error,
                },
            };
            let _ = tx.send(action);
        });
    }

    fn load_wallet(&self) {
        self.refresh_dashboard();
        let wallet = Arc::clone(&self.wallet);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match wallet.balance().await {
                Ok(snapshot) => Action::WalletLoaded(snapshot),
                Err(error) => Action::LoadFailed {
                    what: "wallet",
                    error,
                },
            };
            let _ = tx.send(action);
        });
    }

    fn accept_displayed(&self) {
        let accept = Arc::clone(&self.accept_ride);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = accept.execute().await;
            let _ = tx.send(Action::AcceptFinished(result));
        });
    }

    fn update_ride(&mut self, ride: Ride, status: RideStatus, reason: Option<String>) {
        if let CurrentScreen::Driver(ref mut state) = self.screen {
            state.set_ride_update_in_flight(true);
        }
        let ride_status = Arc::clone(&self.ride_status);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = ride_status.update(&ride, status, reason.as_deref()).await;
            let _ = tx.send(Action::RideUpdated(result));
        });
    }

    fn open_map(&mut self, url: Option<String>) {
        let Some(url) = url else {
            return;
        };
        if let Err(e) = self.map_launcher.open_url(&url) {
            warn!(error = %e, "Could not open external map");
            self.notifications
                .warn("Maps", "No map application could be opened.");
        }
    }

    fn apply_settings(&mut self, settings: DriverSettings) {
        *self.settings.write() = settings;
        if let Err(e) = self.storage.save_settings(&settings) {
            error!(error = %e, "Failed to save driver settings");
            self.notifications
                .error("Settings", format!("Could not save settings: {e}"));
        }
        if let CurrentScreen::Driver(ref mut state) = self.screen {
            state.set_settings(settings);
        }
    }

    fn handle_alert_event(&mut self, event: RideAlertEvent) {
        let CurrentScreen::Driver(ref mut state) = self.screen else {
            return;
        };

        match event {
            RideAlertEvent::NewRequest(ride) => {
                info!(ride_id = %ride.id, "Showing ride request");
            }
            RideAlertEvent::Superseded(ride) => {
                info!(ride_id = %ride.id, "Displayed request taken by another driver");
                self.notifications
                    .block(NotificationLevel::Warn, "Ride taken", SUPERSEDED_MESSAGE);
            }
            RideAlertEvent::PollSucceeded { pending } => state.on_poll(Some(pending)),
            RideAlertEvent::PollFailed(reason) => {
                debug!(%reason, "Poll failed");
                state.on_poll(None);
                state.set_status_message("Connection problem", StatusLevel::Warning);
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::LoginFinished(Ok(user)) => {
                if self.state == AppState::Login {
                    self.start_session(user);
                }
            }
            Action::LoginFinished(Err(e)) => {
                error!(error = %e, "Login failed");
                if let CurrentScreen::Login(ref mut screen) = self.screen {
                    screen.set_error(login_error_message(&e));
                }
            }
            Action::DashboardLoaded { active, history } => {
                if let CurrentScreen::Driver(ref mut state) = self.screen {
                    let earnings = EarningsSummary::now(&history);
                    state.set_active_ride(active);
                    state.set_history(history, earnings);
                    state.set_status_message(
                        format!("Updated {}", chrono::Local::now().format("%H:%M")),
                        StatusLevel::Info,
                    );
                }
            }
            Action::ProfileRefreshed(user) => self.on_profile_refreshed(user),
            Action::AvailabilityChanged(result) => {
                self.availability_in_flight = false;
                self.on_availability_changed(result);
            }
            Action::AcceptFinished(result) => self.on_accept_finished(result),
            Action::RideUpdated(result) => self.on_ride_updated(result),
            Action::WalletLoaded(snapshot) => {
                if let CurrentScreen::Driver(ref mut state) = self.screen {
                    state.set_wallet(snapshot);
                }
            }
            Action::LoadFailed { what, error } => {
                if error.is_unauthorized() && self.state == AppState::Driving {
                    self.expire_session();
                    return;
                }
                warn!(what, error = %error, "Background load failed");
                if let CurrentScreen::Driver(ref mut state) = self.screen {
                    state.set_status_message(
                        format!("Could not load {what}"),
                        StatusLevel::Warning,
                    );
                }
            }
        }
    }

    fn on_profile_refreshed(&mut self, user: User) {
        let CurrentScreen::Driver(ref mut state) = self.screen else {
            return;
        };

        let previous = state.user().status.clone();
        if previous != user.status {
            if user.is_approved() {
                self.notifications
                    .success("Account approved", "You can now go online.");
            } else {
                let status = user
                    .status
                    .clone()
                    .map_or_else(|| "pending".to_string(), String::from);
                self.notifications.warn(
                    "Account status",
                    format!("Your account is {status}. Contact support if this is unexpected."),
                );
            }
        }

        let forced_offline = !user.is_online && self.poller.is_running();
        state.set_user(user);
        if forced_offline {
            info!("Backend reports driver offline, stopping alerts");
            self.go_offline_locally();
            self.notifications.info("Offline", "You were set offline.");
        }
    }

    fn on_availability_changed(&mut self, result: Result<User, ApiError>) {
        match result {
            Ok(user) => {
                let online = user.is_online;
                if let CurrentScreen::Driver(ref mut state) = self.screen {
                    state.set_user(user);
                }
                if online {
                    self.go_online_locally();
                    self.notifications
                        .success("Online", "You will be alerted about new ride requests.");
                } else {
                    self.go_offline_locally();
                    self.notifications.info("Offline", "Ride alerts are paused.");
                }
                self.refresh_dashboard();
            }
            Err(e) if e.is_unauthorized() => self.expire_session(),
            Err(ApiError::NotApproved) => {
                self.notifications.block(
                    NotificationLevel::Warn,
                    "Not approved yet",
                    "Your driver account must be approved before you can go online.",
                );
            }
            Err(e) => {
                error!(error = %e, "Availability change failed");
                self.notifications
                    .block(NotificationLevel::Error, "Availability", e.to_string());
            }
        }
    }

    fn on_accept_finished(&mut self, result: Result<AcceptOutcome, ApiError>) {
        match result {
            Ok(AcceptOutcome::Accepted(plan)) => {
                self.notifications
                    .success("Ride accepted", accepted_message(&plan));
                if let CurrentScreen::Driver(ref mut state) = self.screen {
                    state.start_navigation(plan);
                }
                self.refresh_dashboard();
            }
            Ok(AcceptOutcome::Ignored) => {}
            Err(e) if e.is_unauthorized() => self.expire_session(),
            Err(e) => {
                self.notifications.block(
                    NotificationLevel::Error,
                    "Could not accept",
                    accept_failure_message(&e),
                );
            }
        }
    }

    fn on_ride_updated(&mut self, result: Result<RideProgress, ApiError>) {
        if let CurrentScreen::Driver(ref mut state) = self.screen {
            state.set_ride_update_in_flight(false);
        }

        match result {
            Ok(progress) => {
                let status = progress.ride.status.clone();
                if let CurrentScreen::Driver(ref mut state) = self.screen {
                    state.set_active_ride(Some(progress.ride));
                }
                if let Some(summary) = progress.completion {
                    self.notifications.block(
                        NotificationLevel::Success,
                        "Ride completed",
                        format!(
                            "Collect {} ({}).",
                            format_htg(summary.amount),
                            summary.payment_method
                        ),
                    );
                } else if status == RideStatus::Cancelled {
                    self.notifications.info("Ride cancelled", "The ride was cancelled.");
                } else {
                    self.notifications
                        .success("Ride updated", status.label().to_string());
                }
                self.refresh_dashboard();
            }
            Err(e) if e.is_unauthorized() => self.expire_session(),
            Err(e) => {
                error!(error = %e, "Ride status update failed");
                self.notifications
                    .block(NotificationLevel::Error, "Update failed", e.to_string());
            }
        }
    }
}

fn accepted_message(plan: &NavigationPlan) -> String {
    if plan.pickup_address.is_empty() {
        format!("Head to {}.", plan.passenger_name)
    } else {
        format!("Pick up {} at {}.", plan.passenger_name, plan.pickup_address)
    }
}

fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Backend { detail, .. } => detail.clone(),
        ApiError::Unauthorized { message } => message.clone(),
        ApiError::NetworkError { message } => format!("Cannot reach the server: {message}"),
        ApiError::InvalidInput { reason } => reason.clone(),
        _ => error.to_string(),
    }
}
