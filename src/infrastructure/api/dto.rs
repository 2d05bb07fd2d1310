//! Backend request and response bodies.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    City, InboxNotification, PayoutMethod, Ride, User, UserType, WithdrawalRequest,
};

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub phone_or_email: &'a str,
    pub password: &'a str,
    pub user_type: UserType,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct OptionalUserEnvelope {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct RidesEnvelope {
    #[serde(default)]
    pub rides: Vec<Ride>,
}

#[derive(Debug, Deserialize)]
pub struct RideEnvelope {
    #[serde(default)]
    pub ride: Option<Ride>,
}

#[derive(Debug, Serialize)]
pub struct StatusBody<'a> {
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct CitiesEnvelope {
    #[serde(default)]
    pub cities: Vec<City>,
}

#[derive(Debug, Deserialize)]
pub struct CityEnvelope {
    #[serde(default)]
    pub city: Option<City>,
}

#[derive(Debug, Serialize)]
pub struct WithdrawBody {
    pub amount: f64,
    pub method: PayoutMethod,
}

#[derive(Debug, Deserialize)]
pub struct WithdrawalEnvelope {
    pub withdrawal: WithdrawalRequest,
}

#[derive(Debug, Deserialize)]
pub struct NotificationsEnvelope {
    #[serde(default)]
    pub notifications: Vec<InboxNotification>,
}

/// Error body. FastAPI sends a string, or a list of field errors on 422.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    /// Human-readable message, if the body carried one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
            serde_json::Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .map(str::to_string),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"detail":"Driver already has an active ride"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Driver already has an active ride"));
    }

    #[test]
    fn test_validation_detail_list() {
        let body: ErrorResponse = serde_json::from_str(
            r#"{"detail":[{"loc":["body","password"],"msg":"field required","type":"value_error.missing"}]}"#,
        )
        .unwrap();
        assert_eq!(body.message().as_deref(), Some("field required"));
    }

    #[test]
    fn test_missing_detail() {
        let body: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message(), None);
    }

    #[test]
    fn test_rides_envelope_tolerates_missing_list() {
        let body: RidesEnvelope = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(body.rides.is_empty());
    }

    #[test]
    fn test_notifications_envelope() {
        let body: NotificationsEnvelope = serde_json::from_str(
            r#"{"notifications":[{"id":"n1","title":"Payout sent","body":"500 HTG","is_read":true}]}"#,
        )
        .unwrap();
        assert_eq!(body.notifications.len(), 1);
        assert!(!body.notifications[0].is_unread());

        let empty: NotificationsEnvelope = serde_json::from_str("{}").unwrap();
        assert!(empty.notifications.is_empty());
    }

    #[test]
    fn test_status_body_omits_empty_reason() {
        let body = StatusBody {
            status: "arrived",
            reason: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"status":"arrived"}"#);
    }
}
