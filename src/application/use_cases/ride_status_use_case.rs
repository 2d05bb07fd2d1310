//! Active ride progress and history.

use std::sync::Arc;

use tracing::info;

use crate::application::dto::CompletionSummary;
use crate::domain::entities::{Ride, RideStatus};
use crate::domain::errors::ApiError;
use crate::domain::ports::RidePort;

/// Ride after a status change, with the amount to collect on completion.
#[derive(Debug, Clone, PartialEq)]
pub struct RideProgress {
    pub ride: Ride,
    pub completion: Option<CompletionSummary>,
}

pub struct RideStatusUseCase {
    rides: Arc<dyn RidePort>,
}

impl RideStatusUseCase {
    #[must_use]
    pub const fn new(rides: Arc<dyn RidePort>) -> Self {
        Self { rides }
    }

    /// First accepted, arrived or started ride of the driver.
    ///
    /// # Errors
    /// Returns the backend error when the list cannot be fetched.
    pub async fn active_ride(&self) -> Result<Option<Ride>, ApiError> {
        let rides = self.rides.list_rides(None).await?;
        Ok(rides.into_iter().find(Ride::is_active))
    }

    /// Completed rides, newest first.
    ///
    /// # Errors
    /// Returns the backend error when the list cannot be fetched.
    pub async fn history(&self) -> Result<Vec<Ride>, ApiError> {
        let mut rides = self.rides.list_rides(Some(&RideStatus::Completed)).await?;
        rides.sort_by(|a, b| b.settled_at().cmp(&a.settled_at()));
        Ok(rides)
    }

    /// Moves `ride` to `status`.
    ///
    /// The backend does not always echo the ride; the local copy with the new
    /// status is used then.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn update(
        &self,
        ride: &Ride,
        status: RideStatus,
        reason: Option<&str>,
    ) -> Result<RideProgress, ApiError> {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        let echoed = self.rides.update_ride_status(&ride.id, &status, reason).await?;
        let mut updated = echoed.unwrap_or_else(|| ride.clone());
        if updated.status != status {
            updated.status = status.clone();
        }
        info!(ride_id = %ride.id, status = %updated.status, "Ride status updated");

        let completion = (status == RideStatus::Completed).then(|| {
            let mut priced = updated.clone();
            if priced.final_price.is_none() && priced.estimated_price.is_none() {
                priced.estimated_price = ride.estimated_price;
                priced.final_price = ride.final_price;
            }
            if priced.payment_method.is_none() {
                priced.payment_method.clone_from(&ride.payment_method);
            }
            CompletionSummary::from_ride(&priced)
        });

        Ok(RideProgress {
            ride: updated,
            completion,
        })
    }
}
