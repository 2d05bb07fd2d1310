//! Local alert output port definition.

use crate::domain::entities::NotificationSound;
use crate::domain::errors::AlertError;

/// Port for attention-grabbing output on the driver's machine.
#[cfg_attr(test, mockall::automock)]
pub trait AlertPort: Send + Sync {
    /// Plays one tone of the given preset without posting a notification.
    ///
    /// # Errors
    ///
    /// Returns `AlertError` when the platform cannot play sound.
    fn play_tone(&self, sound: &NotificationSound) -> Result<(), AlertError>;

    /// Short physical alert. On a terminal this is the bell.
    fn haptic(&self);

    /// Shows a desktop notification, playing `sound` with it when given.
    fn notify(&self, title: &str, body: &str, sound: Option<NotificationSound>);
}
