//! Accepting the ride shown in the alert modal.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::NavigationPlan;
use crate::application::services::SharedRideAlerts;
use crate::domain::errors::ApiError;
use crate::domain::ports::{MapLauncherPort, RidePort};

pub const ACTIVE_RIDE_MESSAGE: &str =
    "You already have a ride in progress. Open it from the dashboard to continue.";

/// Result of pressing accept.
#[derive(Debug, Clone, PartialEq)]
pub enum AcceptOutcome {
    Accepted(NavigationPlan),
    /// Nothing displayed, or an accept is already in flight.
    Ignored,
}

pub struct AcceptRideUseCase {
    rides: Arc<dyn RidePort>,
    launcher: Arc<dyn MapLauncherPort>,
    alerts: SharedRideAlerts,
    map_url_base: String,
}

impl AcceptRideUseCase {
    #[must_use]
    pub fn new(
        rides: Arc<dyn RidePort>,
        launcher: Arc<dyn MapLauncherPort>,
        alerts: SharedRideAlerts,
        map_url_base: impl Into<String>,
    ) -> Self {
        Self {
            rides,
            launcher,
            alerts,
            map_url_base: map_url_base.into(),
        }
    }

    /// Accepts the displayed request.
    ///
    /// On success the modal is closed and the external map is opened at the
    /// pickup when its position is known. On failure the modal stays open.
    ///
    /// # Errors
    /// Returns the backend error; see [`accept_failure_message`].
    pub async fn execute(&self) -> Result<AcceptOutcome, ApiError> {
        let Some(ride) = self.alerts.lock().begin_accept() else {
            debug!("Accept ignored");
            return Ok(AcceptOutcome::Ignored);
        };

        let result = self.rides.accept_ride(&ride.id).await;
        self.alerts.lock().finish_accept(&ride.id, result.is_ok());

        if let Err(e) = result {
            warn!(ride_id = %ride.id, error = %e, "Accept failed");
            return Err(e);
        }

        info!(ride_id = %ride.id, "Ride accepted");
        let plan = NavigationPlan::from_ride(&ride);
        if let Some(url) = plan.pickup_directions_url(&self.map_url_base)
            && let Err(e) = self.launcher.open_url(&url)
        {
            debug!(error = %e, "Could not open external map");
        }

        Ok(AcceptOutcome::Accepted(plan))
    }
}

/// Text shown to the driver when an accept fails.
#[must_use]
pub fn accept_failure_message(error: &ApiError) -> String {
    if error.is_active_ride_conflict() {
        return ACTIVE_RIDE_MESSAGE.to_string();
    }
    match error {
        ApiError::Backend { detail, .. } if !detail.trim().is_empty() => detail.clone(),
        ApiError::Backend { .. } => "Could not accept the ride".to_string(),
        other => other.to_string(),
    }
}
