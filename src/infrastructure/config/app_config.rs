//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::services::DEFAULT_POLL_INTERVAL_MS;
use crate::infrastructure::api::DEFAULT_API_URL;

pub(crate) const APP_NAME: &str = "taptap-driver";
pub(crate) const APP_QUALIFIER: &str = "ht";
pub(crate) const APP_ORGANIZATION: &str = "taptapgo";

const DEFAULT_MAP_URL_BASE: &str = "https://www.google.com/maps/dir/";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, from `config.toml` overlaid with CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Backend base URL, without the `/api` suffix.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Pending-ride poll cadence while online.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_true")]
    pub enable_desktop_notifications: bool,

    /// Directions URL prefix handed to the external map application.
    #[serde(default = "default_map_url_base")]
    pub map_url_base: String,

    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Toast duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Dashboard ride refresh while online.
    #[serde(default = "default_dashboard_refresh_secs")]
    pub dashboard_refresh_secs: u64,

    /// Profile refresh, to pick up approval changes.
    #[serde(default = "default_profile_refresh_secs")]
    pub profile_refresh_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
            dashboard_refresh_secs: default_dashboard_refresh_secs(),
            profile_refresh_secs: default_profile_refresh_secs(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

const fn default_request_timeout_secs() -> u64 {
    15
}

const fn default_true() -> bool {
    true
}

fn default_map_url_base() -> String {
    DEFAULT_MAP_URL_BASE.to_string()
}

const fn default_notification_duration() -> u64 {
    4
}

const fn default_dashboard_refresh_secs() -> u64 {
    12
}

const fn default_profile_refresh_secs() -> u64 {
    15
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = &args.api_url {
            self.api_url.clone_from(api_url);
        }
        if let Some(poll_interval_ms) = args.poll_interval_ms {
            self.poll_interval_ms = poll_interval_ms;
        }
        if let Some(notifications) = args.enable_desktop_notifications {
            self.enable_desktop_notifications = notifications;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("taptap-driver.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            api_url: default_api_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            enable_desktop_notifications: true,
            map_url_base: default_map_url_base(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let toml_content = r#"
            api_url = "https://backend.example.test"
            log_level = "debug"

            [ui]
            dashboard_refresh_secs = 30
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.api_url, "https://backend.example.test");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.poll_interval_ms, 3000);
        assert_eq!(config.ui.dashboard_refresh_secs, 30);
        assert_eq!(config.ui.profile_refresh_secs, 15);
        assert!(config.enable_desktop_notifications);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "taptap-driver",
            "--api-url",
            "http://127.0.0.1:9000",
            "--poll-interval-ms",
            "1500",
            "--log-level",
            "trace",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.api_url, "http://127.0.0.1:9000");
        assert_eq!(config.poll_interval_ms, 1500);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.map_url_base, "https://www.google.com/maps/dir/");
    }
}
