//! Ride backend port definition.

use async_trait::async_trait;

use crate::domain::entities::{Ride, RideStatus};
use crate::domain::errors::ApiError;

/// Port for the ride endpoints a driver uses.
#[async_trait]
pub trait RidePort: Send + Sync {
    /// Lists rides visible to the caller, optionally filtered by status.
    async fn list_rides(&self, status: Option<&RideStatus>) -> Result<Vec<Ride>, ApiError>;

    /// Claims a pending ride for the calling driver.
    async fn accept_ride(&self, ride_id: &str) -> Result<(), ApiError>;

    /// Moves a ride to a new status. Returns the updated ride when the
    /// backend echoes it.
    async fn update_ride_status(
        &self,
        ride_id: &str,
        status: &RideStatus,
        reason: Option<&str>,
    ) -> Result<Option<Ride>, ApiError>;
}
