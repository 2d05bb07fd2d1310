use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Notification, NotificationLevel};

/// Queue of toasts and blocking notices.
///
/// Blocking notices jump ahead of toasts and stay until acknowledged.
#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    default_duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}

impl NotificationManager {
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
        }
    }

    pub fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        let notification =
            Notification::new(level, title, message).with_duration(self.default_duration);
        self.queue.push_back(notification);
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, title, message);
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, title, message);
    }

    pub fn warn(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Warn, title, message);
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, title, message);
    }

    /// Queues a notice that must be acknowledged. It is shown before any
    /// pending toast but after earlier blocking notices.
    pub fn block(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        let notice = Notification::new(level, title, message).blocking();
        let position = self
            .queue
            .iter()
            .position(|queued| !queued.blocking)
            .unwrap_or(self.queue.len());
        if position == 0
            && let Some(front) = self.queue.front_mut()
        {
            front.displayed_at = None;
        }
        self.queue.insert(position, notice);
    }

    /// Acknowledges the blocking notice on screen. Returns whether there was one.
    pub fn acknowledge(&mut self) -> bool {
        if self.queue.front().is_some_and(|front| front.blocking) {
            self.queue.pop_front();
            if let Some(next) = self.queue.front_mut() {
                next.mark_displayed();
            }
            return true;
        }
        false
    }

    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.queue.front()
    }

    /// Whether input should go to the notice instead of the screen.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.queue.front().is_some_and(|front| front.blocking)
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_toasts_rotate_after_expiry() {
        let mut manager = NotificationManager::default();
        manager.info("1", "First");
        manager.info("2", "Second");

        manager.tick();
        manager.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());
        manager.tick();

        assert_eq!(manager.current_notification().unwrap().title, "2");
        let second = manager.current_notification().unwrap();
        assert!(second.displayed_at.unwrap().elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_blocking_notice_preempts_toasts_in_order() {
        let mut manager = NotificationManager::default();
        manager.info("toast", "Online");
        manager.tick();
        manager.block(NotificationLevel::Warn, "Ride taken", "first");
        manager.block(NotificationLevel::Error, "Accept failed", "second");

        assert!(manager.is_blocking());
        assert_eq!(manager.current_notification().unwrap().message, "first");

        assert!(manager.acknowledge());
        assert_eq!(manager.current_notification().unwrap().message, "second");

        assert!(manager.acknowledge());
        assert!(!manager.is_blocking());
        assert_eq!(manager.current_notification().unwrap().title, "toast");
        assert!(!manager.acknowledge());
    }

    #[test]
    fn test_blocking_notice_survives_ticks() {
        let mut manager = NotificationManager::new(Duration::from_nanos(1));
        manager.block(NotificationLevel::Warn, "Ride taken", "Too late");
        manager.tick();
        std::thread::sleep(Duration::from_millis(1));
        manager.tick();

        assert!(manager.is_blocking());
    }
}
