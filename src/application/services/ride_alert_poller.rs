//! Background poll loop feeding the ride alert tracker.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use super::alert_player::AlertPlayer;
use super::ride_alert::{RideAlertEvent, SharedRideAlerts};
use crate::domain::entities::DriverSettings;
use crate::domain::ports::RidePort;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

/// One start..stop span of the poll loop. The flag belongs to this span
/// only, so a later start never revives an earlier loop.
struct Activation {
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Polls for pending rides while the driver is online.
///
/// Each tick awaits its request before the next tick is taken, so polls
/// never overlap; a slow response delays the following tick instead.
pub struct RideAlertPoller {
    interval: Duration,
    rides: Arc<dyn RidePort>,
    tracker: SharedRideAlerts,
    player: AlertPlayer,
    settings: Arc<RwLock<DriverSettings>>,
    active: Mutex<Option<Activation>>,
}

impl RideAlertPoller {
    #[must_use]
    pub fn new(
        interval_ms: u64,
        rides: Arc<dyn RidePort>,
        tracker: SharedRideAlerts,
        player: AlertPlayer,
        settings: Arc<RwLock<DriverSettings>>,
    ) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms.max(1)),
            rides,
            tracker,
            player,
            settings,
            active: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active
            .lock()
            .as_ref()
            .is_some_and(|activation| activation.running.load(Ordering::SeqCst))
    }

    /// Starts polling from a fresh baseline. A running loop is replaced.
    pub fn start(&self, events: mpsc::UnboundedSender<RideAlertEvent>) {
        self.stop();
        self.tracker.lock().reset();
        let flag = Arc::new(AtomicBool::new(true));

        let interval_duration = self.interval;
        let rides = Arc::clone(&self.rides);
        let tracker = Arc::clone(&self.tracker);
        let player = self.player.clone();
        let settings = Arc::clone(&self.settings);
        let running = Arc::clone(&flag);

        info!(interval = ?interval_duration, "Ride alert polling started");

        let handle = tokio::spawn(async move {
            let mut ticker = interval(interval_duration);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            while running.load(Ordering::SeqCst) {
                ticker.tick().await;

                if !running.load(Ordering::SeqCst) {
                    break;
                }

                let outcome = match rides.list_rides(None).await {
                    Ok(list) => {
                        let pending = list.iter().filter(|ride| ride.is_open_request()).count();
                        let mut found = tracker.lock().observe(&list);
                        found.push(RideAlertEvent::PollSucceeded { pending });
                        found
                    }
                    Err(e) => {
                        warn!(error = %e, "Ride poll failed, waiting for next tick");
                        vec![RideAlertEvent::PollFailed(e.to_string())]
                    }
                };

                // Offline may have been requested while the request was in flight.
                if !running.load(Ordering::SeqCst) {
                    break;
                }

                for event in outcome {
                    if let RideAlertEvent::NewRequest(ride) = &event {
                        let current = *settings.read();
                        let body = ride
                            .pickup_address
                            .as_deref()
                            .unwrap_or("New pickup request");
                        player.ride_request(&current, "New ride request", body);
                    }
                    if events.send(event).is_err() {
                        debug!("Ride alert receiver dropped");
                        running.store(false, Ordering::SeqCst);
                        break;
                    }
                }
            }

            debug!("Ride alert loop stopped");
        });

        *self.active.lock() = Some(Activation {
            running: flag,
            handle,
        });
    }

    /// Stops polling and clears the tracker, closing any open modal.
    pub fn stop(&self) {
        let was_running = match self.active.lock().take() {
            Some(activation) => {
                activation.handle.abort();
                activation.running.swap(false, Ordering::SeqCst)
            }
            None => false,
        };
        self.tracker.lock().reset();
        if was_running {
            info!("Ride alert polling stopped");
        }
    }
}

impl Drop for RideAlertPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ride_alert::RideAlertTracker;
    use crate::domain::entities::{Ride, RideStatus};
    use crate::domain::errors::ApiError;
    use crate::domain::ports::mocks::{MockAlertPort, MockRidePort};
    use std::sync::atomic::AtomicUsize;

    const INTERVAL: u64 = DEFAULT_POLL_INTERVAL_MS;

    struct Harness {
        rides: Arc<MockRidePort>,
        tracker: SharedRideAlerts,
        poller: RideAlertPoller,
        haptics: Arc<AtomicUsize>,
        events: mpsc::UnboundedReceiver<RideAlertEvent>,
        tx: mpsc::UnboundedSender<RideAlertEvent>,
    }

    fn pending(id: &str) -> Ride {
        Ride::new(id, RideStatus::Pending)
    }

    fn harness() -> Harness {
        let haptics = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&haptics);
        let mut port = MockAlertPort::new();
        port.expect_haptic().returning(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        port.expect_play_tone().returning(|_| Ok(()));
        port.expect_notify().return_const(());

        let rides = Arc::new(MockRidePort::new());
        let tracker = RideAlertTracker::shared();
        let poller = RideAlertPoller::new(
            INTERVAL,
            rides.clone(),
            tracker.clone(),
            AlertPlayer::new(Arc::new(port)),
            Arc::new(RwLock::new(DriverSettings::default())),
        );
        let (tx, events) = mpsc::unbounded_channel();
        Harness {
            rides,
            tracker,
            poller,
            haptics,
            events,
            tx,
        }
    }

    impl Harness {
        fn start(&self) {
            self.poller.start(self.tx.clone());
        }

        fn drain(&mut self) -> Vec<RideAlertEvent> {
            let mut out = Vec::new();
            while let Ok(event) = self.events.try_recv() {
                out.push(event);
            }
            out
        }

        fn alerts(&mut self) -> Vec<RideAlertEvent> {
            self.drain()
                .into_iter()
                .filter(|event| {
                    matches!(
                        event,
                        RideAlertEvent::NewRequest(_) | RideAlertEvent::Superseded(_)
                    )
                })
                .collect()
        }
    }

    async fn next_tick() {
        tokio::time::sleep(Duration::from_millis(INTERVAL)).await;
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_baseline_poll_is_silent() {
        let mut h = harness();
        h.rides.push_rides(vec![pending("a"), pending("b")]);

        h.start();
        settle().await;

        assert!(h.alerts().is_empty());
        assert_eq!(h.haptics.load(Ordering::SeqCst), 0);
        assert!(h.tracker.lock().has_seen("a"));
        assert!(h.tracker.lock().has_seen("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_alert_per_new_request() {
        let mut h = harness();
        h.rides.push_rides(vec![pending("a")]);
        h.rides.push_rides(vec![pending("a"), pending("b"), pending("c")]);

        h.start();
        settle().await;
        next_tick().await;

        assert_eq!(h.alerts(), vec![RideAlertEvent::NewRequest(pending("b"))]);
        assert_eq!(h.haptics.load(Ordering::SeqCst), 1);

        // Same list keeps coming back.
        next_tick().await;
        next_tick().await;
        assert!(h.alerts().is_empty());
        assert_eq!(h.haptics.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_taken_request_closes_modal() {
        let mut h = harness();
        h.rides.push_rides(vec![]);
        h.rides.push_rides(vec![pending("a")]);
        h.rides.push_rides(vec![]);

        h.start();
        settle().await;
        next_tick().await;
        assert_eq!(h.alerts(), vec![RideAlertEvent::NewRequest(pending("a"))]);

        next_tick().await;
        assert_eq!(h.alerts(), vec![RideAlertEvent::Superseded(pending("a"))]);
        assert!(h.tracker.lock().displayed().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismissed_request_does_not_realert() {
        let mut h = harness();
        h.rides.push_rides(vec![]);
        h.rides.push_rides(vec![pending("a")]);

        h.start();
        settle().await;
        next_tick().await;
        assert_eq!(h.alerts().len(), 1);

        h.tracker.lock().dismiss();
        next_tick().await;
        next_tick().await;

        assert!(h.alerts().is_empty());
        assert_eq!(h.haptics.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_poll_is_skipped() {
        let mut h = harness();
        h.rides.push_rides(vec![]);
        h.rides.push_error(ApiError::network("connection reset"));
        h.rides.push_rides(vec![pending("a")]);

        h.start();
        settle().await;
        next_tick().await;
        assert!(
            h.drain()
                .iter()
                .any(|event| matches!(event, RideAlertEvent::PollFailed(_)))
        );

        next_tick().await;
        assert_eq!(h.alerts(), vec![RideAlertEvent::NewRequest(pending("a"))]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_polling() {
        let h = harness();
        h.rides.push_rides(vec![pending("a")]);

        h.start();
        settle().await;
        next_tick().await;
        let calls = h.rides.list_calls();
        assert_eq!(calls, 2);

        h.poller.stop();
        assert!(!h.poller.is_running());
        for _ in 0..5 {
            next_tick().await;
        }

        assert_eq!(h.rides.list_calls(), calls);
        assert!(!h.tracker.lock().is_baselined());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_rebaselines_from_current_backlog() {
        let mut h = harness();
        h.rides.push_rides(vec![]);

        h.start();
        settle().await;
        h.poller.stop();

        // Requests created while offline are backlog, not new.
        h.rides.push_rides(vec![pending("x"), pending("y")]);
        h.start();
        settle().await;
        next_tick().await;

        assert!(h.alerts().is_empty());
        assert!(h.tracker.lock().has_seen("x"));
        assert_eq!(h.haptics.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_runs_a_single_loop() {
        let mut h = harness();
        h.rides.push_rides(vec![]);

        h.start();
        settle().await;
        h.poller.stop();
        h.start();
        h.poller.stop();
        h.start();
        settle().await;
        assert!(h.poller.is_running());

        let before = h.rides.list_calls();
        for _ in 0..3 {
            next_tick().await;
        }
        assert_eq!(h.rides.list_calls(), before + 3);

        h.rides.push_rides(vec![pending("a")]);
        next_tick().await;
        assert_eq!(h.alerts(), vec![RideAlertEvent::NewRequest(pending("a"))]);
        assert_eq!(h.haptics.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_receiver_ends_only_that_activation() {
        let mut h = harness();
        h.rides.push_rides(vec![]);
        h.rides.push_rides(vec![pending("a")]);

        let (tx, rx) = mpsc::unbounded_channel();
        h.poller.start(tx);
        settle().await;
        drop(rx);
        next_tick().await;
        assert!(!h.poller.is_running());

        h.rides.push_rides(vec![pending("a"), pending("b")]);
        h.start();
        settle().await;
        next_tick().await;
        assert!(h.poller.is_running());
        assert!(h.alerts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_arriving_during_accept_is_shown_afterwards() {
        let mut h = harness();
        h.rides.push_rides(vec![]);
        h.rides.push_rides(vec![pending("a")]);

        h.start();
        settle().await;
        next_tick().await;
        assert_eq!(h.alerts(), vec![RideAlertEvent::NewRequest(pending("a"))]);
        assert!(h.tracker.lock().begin_accept().is_some());

        h.rides.push_rides(vec![pending("a"), pending("b")]);
        next_tick().await;
        assert_eq!(h.alerts(), vec![RideAlertEvent::NewRequest(pending("b"))]);
        assert_eq!(h.haptics.load(Ordering::SeqCst), 2);
        assert_eq!(
            h.tracker.lock().displayed().map(|r| r.id.clone()),
            Some("a".to_string())
        );

        // Someone else got "a" first.
        h.tracker.lock().finish_accept("a", false);
        h.rides.push_rides(vec![pending("b")]);
        next_tick().await;

        assert_eq!(h.alerts(), vec![RideAlertEvent::Superseded(pending("a"))]);
        assert_eq!(
            h.tracker.lock().displayed().map(|r| r.id.clone()),
            Some("b".to_string())
        );
        assert_eq!(h.haptics.load(Ordering::SeqCst), 2);
    }
}
