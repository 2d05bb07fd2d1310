pub mod alert_player;
pub mod earnings;
pub mod notification_manager;
pub mod ride_alert;
pub mod ride_alert_poller;

pub use alert_player::{AlertPlayer, TONE_OFFSETS_MS};
pub use earnings::EarningsSummary;
pub use notification_manager::NotificationManager;
pub use ride_alert::{RideAlertEvent, RideAlertTracker, SharedRideAlerts};
pub use ride_alert_poller::{DEFAULT_POLL_INTERVAL_MS, RideAlertPoller};
