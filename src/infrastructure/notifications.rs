//! Desktop alert output with conditional compilation.

use std::io::Write;

use crate::domain::entities::NotificationSound;
use crate::domain::errors::AlertError;
use crate::domain::ports::AlertPort;

const APP_NAME: &str = "TapTap Driver";

/// Rings the terminal bell. Terminals without a bell ignore it.
fn ring_bell() -> Result<(), AlertError> {
    let mut out = std::io::stdout();
    out.write_all(b"\x07")
        .and_then(|()| out.flush())
        .map_err(|e| AlertError::Playback(e.to_string()))
}

/// Bell fallback for a notification that was asked to play a tone.
fn ring_for(sound: Option<NotificationSound>) {
    if sound.is_some()
        && let Err(e) = ring_bell()
    {
        tracing::debug!(error = %e, "Terminal bell failed");
    }
}

#[cfg(feature = "notify")]
mod notify_impl {
    use super::*;
    use notify_rust::Notification;

    /// Ride alerts through the desktop notification daemon.
    ///
    /// A notification plays its tone through the daemon's sound theme via
    /// the `sound-name` hint. Standalone tones and the "haptic" alert are
    /// the terminal bell, so repeats never stack extra popups.
    #[derive(Debug, Clone, Default)]
    pub struct DesktopAlertService {
        enabled: bool,
    }

    impl DesktopAlertService {
        #[must_use]
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }
    }

    pub(super) fn build_notification(
        title: &str,
        body: &str,
        sound: Option<NotificationSound>,
    ) -> Notification {
        let mut notification = Notification::new();
        notification.summary(title).body(body).appname(APP_NAME);
        if let Some(sound) = sound {
            notification.sound_name(sound.sound_name);
        }
        notification
    }

    impl AlertPort for DesktopAlertService {
        fn play_tone(&self, _sound: &NotificationSound) -> Result<(), AlertError> {
            ring_bell()
        }

        fn haptic(&self) {
            if let Err(e) = ring_bell() {
                tracing::debug!(error = %e, "Terminal bell failed");
            }
        }

        fn notify(&self, title: &str, body: &str, sound: Option<NotificationSound>) {
            if !self.enabled {
                ring_for(sound);
                return;
            }

            let title = title.to_string();
            let body = body.to_string();

            tokio::task::spawn_blocking(move || {
                if let Err(e) = build_notification(&title, &body, sound).show() {
                    tracing::warn!(error = %e, "Failed to show notification");
                }
            });
        }
    }
}

/// Terminal-only alerts when the notify feature is disabled.
#[cfg(not(feature = "notify"))]
mod stub_impl {
    use super::*;

    #[derive(Debug, Clone, Default)]
    pub struct DesktopAlertService {
        _enabled: bool,
    }

    impl DesktopAlertService {
        #[must_use]
        pub fn new(_enabled: bool) -> Self {
            Self { _enabled: false }
        }
    }

    impl AlertPort for DesktopAlertService {
        fn play_tone(&self, _sound: &NotificationSound) -> Result<(), AlertError> {
            ring_bell()
        }

        fn haptic(&self) {
            if let Err(e) = ring_bell() {
                tracing::debug!(error = %e, "Terminal bell failed");
            }
        }

        fn notify(&self, _title: &str, _body: &str, sound: Option<NotificationSound>) {
            ring_for(sound);
        }
    }
}

#[cfg(feature = "notify")]
pub use notify_impl::DesktopAlertService;
#[cfg(not(feature = "notify"))]
pub use stub_impl::DesktopAlertService;

#[cfg(all(test, feature = "notify", unix, not(target_os = "macos")))]
mod tests {
    use super::notify_impl::build_notification;
    use super::*;
    use notify_rust::Hint;

    #[test]
    fn test_ride_notification_carries_the_tone() {
        let sound = NotificationSound::at(2);
        let notification = build_notification("New ride request", "Airport", Some(sound));

        assert_eq!(notification.summary, "New ride request");
        assert_eq!(notification.body, "Airport");
        assert!(
            notification
                .hints
                .contains(&Hint::SoundName(sound.sound_name.to_string()))
        );
    }

    #[test]
    fn test_silent_notification_has_no_sound_hint() {
        let notification = build_notification("Ride accepted", "Head to pickup", None);

        assert!(
            !notification
                .hints
                .iter()
                .any(|hint| matches!(hint, Hint::SoundName(_)))
        );
    }
}
