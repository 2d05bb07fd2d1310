//! Pending-ride detection and modal state.
//!
//! The tracker is the pure half of the alert loop: it is fed each poll's ride
//! list and decides which requests are new, which one the driver is looking
//! at, and whether that one was claimed by someone else in the meantime.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::entities::Ride;

/// Tracker shared between the poll task and the UI.
pub type SharedRideAlerts = Arc<Mutex<RideAlertTracker>>;

/// Something the driver must be told about.
#[derive(Debug, Clone, PartialEq)]
pub enum RideAlertEvent {
    /// A request nobody has seen before. It is displayed now, or as soon as
    /// the accept in flight ends.
    NewRequest(Ride),
    /// The displayed request stopped being pending before the driver acted.
    Superseded(Ride),
    /// A poll completed; `pending` open requests were listed.
    PollSucceeded { pending: usize },
    /// A poll failed and was skipped.
    PollFailed(String),
}

#[derive(Debug, Default)]
pub struct RideAlertTracker {
    seen: HashSet<String>,
    baselined: bool,
    displayed: Option<Ride>,
    /// Newest request that arrived while an accept was in flight.
    queued: Option<Ride>,
    accepting: bool,
}

impl RideAlertTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shared() -> SharedRideAlerts {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Folds one poll result into the state.
    ///
    /// The first call after [`reset`](Self::reset) only records what is
    /// already pending. Later calls report at most one `Superseded` followed
    /// by at most one `NewRequest`, however many unseen requests arrived.
    pub fn observe(&mut self, rides: &[Ride]) -> Vec<RideAlertEvent> {
        let pending: Vec<&Ride> = rides.iter().filter(|ride| ride.is_open_request()).collect();
        let is_pending = |candidate: &Ride| pending.iter().any(|ride| ride.id == candidate.id);
        let mut events = Vec::new();

        if let Some(dropped) = self.queued.take_if(|queued| !is_pending(&*queued)) {
            debug!(ride_id = %dropped.id, "Queued request is no longer pending");
        }

        if !self.accepting
            && let Some(current) = self.displayed.take_if(|current| !is_pending(&*current))
        {
            debug!(ride_id = %current.id, "Displayed request is no longer pending");
            events.push(RideAlertEvent::Superseded(current));
        }

        if !self.baselined {
            self.seen.extend(pending.iter().map(|ride| ride.id.clone()));
            self.baselined = true;
            debug!(baseline = self.seen.len(), "Recorded pending backlog without alerting");
            return events;
        }

        let mut first_new: Option<&Ride> = None;
        for &ride in &pending {
            if self.seen.insert(ride.id.clone()) && first_new.is_none() {
                first_new = Some(ride);
            }
        }

        if let Some(ride) = first_new {
            debug!(ride_id = %ride.id, queued = self.accepting, "New ride request");
            if self.accepting {
                self.queued = Some(ride.clone());
            } else {
                self.queued = None;
                self.displayed = Some(ride.clone());
            }
            events.push(RideAlertEvent::NewRequest(ride.clone()));
        }

        self.promote_queued();
        events
    }

    /// Shows the queued request once the modal is free.
    fn promote_queued(&mut self) {
        if self.accepting || self.displayed.is_some() {
            return;
        }
        if let Some(ride) = self.queued.take() {
            debug!(ride_id = %ride.id, "Showing request that arrived during an accept");
            self.displayed = Some(ride);
        }
    }

    #[must_use]
    pub const fn displayed(&self) -> Option<&Ride> {
        self.displayed.as_ref()
    }

    #[must_use]
    pub const fn is_baselined(&self) -> bool {
        self.baselined
    }

    #[must_use]
    pub const fn is_accepting(&self) -> bool {
        self.accepting
    }

    #[must_use]
    pub fn has_seen(&self, ride_id: &str) -> bool {
        self.seen.contains(ride_id)
    }

    #[must_use]
    pub const fn queued(&self) -> Option<&Ride> {
        self.queued.as_ref()
    }

    /// Closes the modal without telling the backend. The request stays seen.
    pub fn dismiss(&mut self) -> Option<Ride> {
        if self.accepting {
            return None;
        }
        let dismissed = self.displayed.take();
        self.promote_queued();
        dismissed
    }

    /// Marks an accept as in flight and returns the ride to accept.
    ///
    /// Returns `None` when nothing is displayed or an accept is already
    /// running.
    pub fn begin_accept(&mut self) -> Option<Ride> {
        if self.accepting {
            return None;
        }
        let ride = self.displayed.clone()?;
        self.accepting = true;
        Some(ride)
    }

    /// Ends an in-flight accept. A successful accept closes the modal and
    /// brings up any request queued behind it; a failed one keeps the modal
    /// until it is dismissed or superseded.
    pub fn finish_accept(&mut self, ride_id: &str, accepted: bool) {
        self.accepting = false;
        if accepted && self.displayed.as_ref().is_some_and(|ride| ride.id == ride_id) {
            self.displayed = None;
        }
        self.promote_queued();
    }

    /// Forgets everything; the next observation becomes a new baseline.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
