//! UI screens.

mod app;
mod dashboard_view;
mod driver_screen;
mod earnings_view;
mod login_screen;
mod navigation_view;
mod notification_popup;
mod ride_alert_modal;
mod settings_view;
mod utils;

pub use app::{App, AppOptions, AppPorts};
pub use driver_screen::{DriverKeyResult, DriverScreen, DriverScreenState, DriverView};
pub use login_screen::{LoginAction, LoginScreen};
pub use notification_popup::NotificationPopup;
pub use utils::format_htg;
