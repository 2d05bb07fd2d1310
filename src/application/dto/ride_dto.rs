//! Ride flow DTOs.

use crate::domain::entities::{Coordinates, Ride};

const DEFAULT_PASSENGER_NAME: &str = "Pasaje";

/// Everything the navigation screen needs after an accept.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationPlan {
    pub ride_id: String,
    pub passenger_name: String,
    pub pickup: Coordinates,
    pub pickup_address: String,
    pub destination: Coordinates,
    pub destination_address: String,
}

impl NavigationPlan {
    /// Builds a plan from an accepted ride. Missing coordinates become zero.
    #[must_use]
    pub fn from_ride(ride: &Ride) -> Self {
        Self {
            ride_id: ride.id.clone(),
            passenger_name: ride
                .passenger_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PASSENGER_NAME.to_string()),
            pickup: Coordinates::new(
                ride.pickup_lat.unwrap_or_default(),
                ride.pickup_lng.unwrap_or_default(),
            ),
            pickup_address: ride.pickup_address.clone().unwrap_or_default(),
            destination: Coordinates::new(
                ride.destination_lat.unwrap_or_default(),
                ride.destination_lng.unwrap_or_default(),
            ),
            destination_address: ride.destination_address.clone().unwrap_or_default(),
        }
    }

    /// Directions URL to the pickup, when its position is known.
    #[must_use]
    pub fn pickup_directions_url(&self, map_url_base: &str) -> Option<String> {
        directions_url(map_url_base, self.pickup)
    }

    /// Directions URL to the drop-off, when its position is known.
    #[must_use]
    pub fn destination_directions_url(&self, map_url_base: &str) -> Option<String> {
        directions_url(map_url_base, self.destination)
    }
}

fn directions_url(base: &str, target: Coordinates) -> Option<String> {
    target
        .is_known()
        .then(|| format!("{base}?api=1&destination={},{}", target.lat, target.lng))
}

/// Amount to collect once a ride is completed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSummary {
    pub ride_id: String,
    pub amount: f64,
    pub payment_method: String,
}

impl CompletionSummary {
    #[must_use]
    pub fn from_ride(ride: &Ride) -> Self {
        Self {
            ride_id: ride.id.clone(),
            amount: ride.amount(),
            payment_method: ride.payment_method().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RideStatus;

    const MAPS: &str = "https://www.google.com/maps/dir/";

    #[test]
    fn test_plan_defaults_passenger_name() {
        let ride = Ride::new("r1", RideStatus::Accepted).with_pickup(18.54, -72.33);
        let plan = NavigationPlan::from_ride(&ride);
        assert_eq!(plan.passenger_name, "Pasaje");
        assert_eq!(plan.pickup, Coordinates::new(18.54, -72.33));
        assert_eq!(plan.destination, Coordinates::new(0.0, 0.0));
    }

    #[test]
    fn test_directions_url_only_for_known_positions() {
        let ride = Ride::new("r1", RideStatus::Accepted).with_pickup(18.54, -72.33);
        let plan = NavigationPlan::from_ride(&ride);
        assert_eq!(
            plan.pickup_directions_url(MAPS).as_deref(),
            Some("https://www.google.com/maps/dir/?api=1&destination=18.54,-72.33")
        );
        assert_eq!(plan.destination_directions_url(MAPS), None);
    }

    #[test]
    fn test_completion_summary_prefers_final_price() {
        let ride = Ride::new("r9", RideStatus::Completed).with_prices(Some(500.0), Some(650.0));
        let summary = CompletionSummary::from_ride(&ride);
        assert!((summary.amount - 650.0).abs() < f64::EPSILON);
        assert_eq!(summary.payment_method, "cash");
    }
}
