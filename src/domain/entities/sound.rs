//! Ride alert tone presets and driver alert preferences.

use serde::{Deserialize, Serialize};

/// One of the five preset ride alert tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSound {
    pub index: usize,
    pub label: &'static str,
    /// Freedesktop sound theme name played by the desktop notifier.
    pub sound_name: &'static str,
}

pub const NOTIFICATION_SOUNDS: [NotificationSound; 5] = [
    NotificationSound {
        index: 0,
        label: "Tone 1 (clear)",
        sound_name: "message-new-instant",
    },
    NotificationSound {
        index: 1,
        label: "Tone 2 (soft)",
        sound_name: "message-new-email",
    },
    NotificationSound {
        index: 2,
        label: "Tone 3 (notification)",
        sound_name: "dialog-information",
    },
    NotificationSound {
        index: 3,
        label: "Tone 4 (short)",
        sound_name: "bell",
    },
    NotificationSound {
        index: 4,
        label: "Tone 5 (alarm)",
        sound_name: "alarm-clock-elapsed",
    },
];

pub const DEFAULT_SOUND_INDEX: usize = 0;

impl NotificationSound {
    /// Returns the preset at `index`, clamped into range.
    #[must_use]
    pub const fn at(index: usize) -> Self {
        let clamped = if index >= NOTIFICATION_SOUNDS.len() {
            NOTIFICATION_SOUNDS.len() - 1
        } else {
            index
        };
        NOTIFICATION_SOUNDS[clamped]
    }
}

/// Driver-side alert preferences, persisted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSettings {
    #[serde(default = "default_true")]
    pub ride_sound_enabled: bool,
    #[serde(default, deserialize_with = "clamped_index")]
    pub ride_sound_index: usize,
    #[serde(default = "default_true")]
    pub vibration_enabled: bool,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            ride_sound_enabled: true,
            ride_sound_index: DEFAULT_SOUND_INDEX,
            vibration_enabled: true,
        }
    }
}

impl DriverSettings {
    #[must_use]
    pub const fn sound(&self) -> NotificationSound {
        NotificationSound::at(self.ride_sound_index)
    }

    pub const fn select_sound(&mut self, index: usize) {
        self.ride_sound_index = NotificationSound::at(index).index;
    }
}

const fn default_true() -> bool {
    true
}

fn clamped_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    let max = i64::try_from(NOTIFICATION_SOUNDS.len() - 1).unwrap_or(0);
    Ok(usize::try_from(raw.clamp(0, max)).unwrap_or(DEFAULT_SOUND_INDEX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_index_is_clamped() {
        assert_eq!(NotificationSound::at(2).index, 2);
        assert_eq!(NotificationSound::at(99).index, 4);
    }

    #[test]
    fn test_settings_default_when_missing() {
        let settings: DriverSettings = toml::from_str("").unwrap();
        assert_eq!(settings, DriverSettings::default());
    }

    #[test]
    fn test_out_of_range_index_is_clamped_on_load() {
        let settings: DriverSettings = toml::from_str("ride_sound_index = 12").unwrap();
        assert_eq!(settings.ride_sound_index, 4);

        let settings: DriverSettings = toml::from_str("ride_sound_index = -3").unwrap();
        assert_eq!(settings.ride_sound_index, 0);
    }

    #[test]
    fn test_select_sound_clamps() {
        let mut settings = DriverSettings::default();
        settings.select_sound(7);
        assert_eq!(settings.sound().index, 4);
    }
}
