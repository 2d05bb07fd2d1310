//! Infrastructure layer with external service adapters.

/// TapTapGo REST backend client.
pub mod api;
/// Application configuration.
pub mod config;
pub mod map_launcher;
/// Desktop notifications and alert tones.
pub mod notifications;
/// Token storage adapters.
pub mod storage;

pub use api::{DEFAULT_API_URL, TapTapClient};
pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager};
pub use map_launcher::SystemMapLauncher;
pub use notifications::DesktopAlertService;
pub use storage::KeyringTokenStorage;
