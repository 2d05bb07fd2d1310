//! Sound and haptic output for new ride requests.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::entities::{DriverSettings, NotificationSound};
use crate::domain::ports::AlertPort;

/// Offsets at which the ride tone sounds. The first rides on the notification.
pub const TONE_OFFSETS_MS: [u64; 3] = [0, 700, 1400];

/// Fire-and-forget wrapper around an [`AlertPort`].
#[derive(Clone)]
pub struct AlertPlayer {
    port: Arc<dyn AlertPort>,
}

impl AlertPlayer {
    #[must_use]
    pub fn new(port: Arc<dyn AlertPort>) -> Self {
        Self { port }
    }

    /// Alerts the driver to a new request according to their settings.
    ///
    /// The notification carries the first tone; the rest are replayed on
    /// their own so a single request never posts more than one popup.
    pub fn ride_request(&self, settings: &DriverSettings, title: &str, body: &str) {
        if settings.vibration_enabled {
            self.port.haptic();
        }
        if settings.ride_sound_enabled {
            let sound = settings.sound();
            self.port.notify(title, body, Some(sound));
            self.repeat_tone(sound);
        } else {
            self.port.notify(title, body, None);
        }
    }

    /// Plays `sound` at the later [`TONE_OFFSETS_MS`] on spawned tasks.
    fn repeat_tone(&self, sound: NotificationSound) {
        for offset in TONE_OFFSETS_MS.into_iter().skip(1) {
            let port = Arc::clone(&self.port);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(offset)).await;
                if let Err(e) = port.play_tone(&sound) {
                    debug!(error = %e, sound = sound.sound_name, offset, "Ride tone not played");
                }
            });
        }
    }

    /// Single play used when the driver picks a sound in settings.
    pub fn preview(&self, sound: NotificationSound) {
        debug!(sound = sound.sound_name, "Previewing ride tone");
        self.port.notify("Ride alert sound", sound.label, Some(sound));
    }
}
