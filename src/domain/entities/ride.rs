//! Ride request entity.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::serde_utils::{id_string, lenient_f64};

/// Lifecycle status of a ride as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RideStatus {
    Pending,
    Accepted,
    Arrived,
    Started,
    Completed,
    Cancelled,
    Other(String),
}

impl RideStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Arrived => "arrived",
            Self::Started => "started",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(other) => other,
        }
    }

    /// Accepted, arrived or started.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Accepted | Self::Arrived | Self::Started)
    }

    /// The forward step a driver takes next from this status.
    #[must_use]
    pub const fn next_driver_step(&self) -> Option<Self> {
        match self {
            Self::Accepted => Some(Self::Arrived),
            Self::Arrived => Some(Self::Started),
            Self::Started => Some(Self::Completed),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Heading to pickup",
            Self::Arrived => "At pickup",
            Self::Started => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for RideStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "arrived" => Self::Arrived,
            "started" => Self::Started,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<RideStatus> for String {
    fn from(value: RideStatus) -> Self {
        match value {
            RideStatus::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested vehicle category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Car,
    Moto,
}

impl VehicleType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Moto => "Moto",
        }
    }
}

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Zero coordinates are what the backend sends when a position is unknown.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.lat != 0.0 && self.lng != 0.0
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

/// Transient copy of a ride record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    #[serde(with = "id_string")]
    pub id: String,
    pub status: RideStatus,
    #[serde(default, with = "id_string::option")]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub passenger_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub pickup_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub pickup_lng: Option<f64>,
    #[serde(default)]
    pub pickup_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub destination_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub destination_lng: Option<f64>,
    #[serde(default)]
    pub destination_address: Option<String>,
    #[serde(default)]
    pub vehicle_type: VehicleType,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub estimated_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Ride {
    #[must_use]
    pub fn new(id: impl Into<String>, status: RideStatus) -> Self {
        Self {
            id: id.into(),
            status,
            driver_id: None,
            passenger_name: None,
            pickup_lat: None,
            pickup_lng: None,
            pickup_address: None,
            destination_lat: None,
            destination_lng: None,
            destination_address: None,
            vehicle_type: VehicleType::Car,
            estimated_price: None,
            final_price: None,
            payment_method: None,
            city: None,
            created_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn with_driver(mut self, driver_id: impl Into<String>) -> Self {
        self.driver_id = Some(driver_id.into());
        self
    }

    #[must_use]
    pub const fn with_pickup(mut self, lat: f64, lng: f64) -> Self {
        self.pickup_lat = Some(lat);
        self.pickup_lng = Some(lng);
        self
    }

    #[must_use]
    pub const fn with_destination(mut self, lat: f64, lng: f64) -> Self {
        self.destination_lat = Some(lat);
        self.destination_lng = Some(lng);
        self
    }

    #[must_use]
    pub const fn with_prices(mut self, estimated: Option<f64>, final_price: Option<f64>) -> Self {
        self.estimated_price = estimated;
        self.final_price = final_price;
        self
    }

    #[must_use]
    pub const fn with_completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    /// A request no driver has claimed yet.
    #[must_use]
    pub const fn is_open_request(&self) -> bool {
        matches!(self.status, RideStatus::Pending) && self.driver_id.is_none()
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    #[must_use]
    pub fn pickup(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.pickup_lat?, self.pickup_lng?))
    }

    #[must_use]
    pub fn destination(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.destination_lat?, self.destination_lng?))
    }

    /// Amount the ride counts for: final price, else estimate, else zero.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.final_price.or(self.estimated_price).unwrap_or(0.0)
    }

    #[must_use]
    pub fn payment_method(&self) -> &str {
        self.payment_method
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("cash")
    }

    /// Timestamp used for earnings windows.
    #[must_use]
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at.or(self.created_at)
    }
}

/// Accepts RFC 3339 strings as well as naive ISO strings (read as UTC).
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| parse_timestamp(&value)))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_pending_ride() {
        let json = r#"{
            "id": "r-100",
            "status": "pending",
            "driver_id": null,
            "pickup_lat": 18.5944,
            "pickup_lng": -72.3074,
            "pickup_address": "Champ de Mars",
            "destination_lat": "18.51",
            "destination_lng": "-72.29",
            "destination_address": "Pétion-Ville",
            "vehicle_type": "moto",
            "estimated_price": 450,
            "payment_method": "moncash",
            "city": "Port-au-Prince",
            "created_at": "2026-10-18T08:30:00.123456"
        }"#;

        let ride: Ride = serde_json::from_str(json).unwrap();

        assert!(ride.is_open_request());
        assert_eq!(ride.vehicle_type, VehicleType::Moto);
        assert_eq!(ride.pickup(), Some(Coordinates::new(18.5944, -72.3074)));
        assert_eq!(ride.destination(), Some(Coordinates::new(18.51, -72.29)));
        assert_eq!(ride.amount(), 450.0);
        assert_eq!(ride.payment_method(), "moncash");
        assert!(ride.created_at.is_some());
    }

    #[test]
    fn test_pending_with_driver_is_not_open() {
        let ride = Ride::new("r-1", RideStatus::Pending).with_driver("d-9");
        assert!(!ride.is_open_request());
    }

    #[test_case("accepted", true ; "accepted is active")]
    #[test_case("arrived", true ; "arrived is active")]
    #[test_case("started", true ; "started is active")]
    #[test_case("completed", false ; "completed is not active")]
    #[test_case("pending", false ; "pending is not active")]
    #[test_case("expired", false ; "unknown is not active")]
    fn test_active_statuses(raw: &str, expected: bool) {
        assert_eq!(RideStatus::from(raw.to_string()).is_active(), expected);
    }

    #[test]
    fn test_next_driver_step() {
        assert_eq!(RideStatus::Accepted.next_driver_step(), Some(RideStatus::Arrived));
        assert_eq!(RideStatus::Arrived.next_driver_step(), Some(RideStatus::Started));
        assert_eq!(RideStatus::Started.next_driver_step(), Some(RideStatus::Completed));
        assert_eq!(RideStatus::Completed.next_driver_step(), None);
    }

    #[test]
    fn test_amount_prefers_final_price() {
        let ride = Ride::new("r", RideStatus::Completed).with_prices(Some(300.0), Some(350.0));
        assert_eq!(ride.amount(), 350.0);

        let ride = Ride::new("r", RideStatus::Completed).with_prices(Some(300.0), None);
        assert_eq!(ride.amount(), 300.0);

        let ride = Ride::new("r", RideStatus::Completed);
        assert_eq!(ride.amount(), 0.0);
    }

    #[test]
    fn test_unknown_coordinates() {
        assert!(!Coordinates::new(0.0, 0.0).is_known());
        assert!(Coordinates::new(18.5, -72.3).is_known());
    }

    #[test]
    fn test_rfc3339_timestamp() {
        let parsed = parse_timestamp("2026-10-18T08:30:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-10-18T08:30:00+00:00");
        assert!(parse_timestamp("yesterday").is_none());
    }
}
