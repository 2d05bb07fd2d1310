//! City and per-city pricing entities.

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::{id_string, lenient_f64};

/// Fare parameters for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPricing {
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub base_fare: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_per_km: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_per_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub surge_multiplier: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub commission_rate: Option<f64>,
}

impl CityPricing {
    #[must_use]
    pub fn surge(&self) -> f64 {
        self.surge_multiplier.unwrap_or(1.0)
    }
}

/// A served city with its current pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(flatten)]
    pub pricing: CityPricing,
}

const fn default_true() -> bool {
    true
}

/// Patch sent when an admin edits a city's pricing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PricingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fare: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surge_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,
}

impl PricingUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.base_fare.is_none()
            && self.price_per_km.is_none()
            && self.price_per_min.is_none()
            && self.surge_multiplier.is_none()
            && self.commission_rate.is_none()
    }

    /// Checks the ranges the pricing form enforces.
    ///
    /// # Errors
    /// Returns a human-readable reason for the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("no pricing field to update".to_string());
        }
        for (name, value) in [
            ("base fare", self.base_fare),
            ("price per km", self.price_per_km),
            ("price per minute", self.price_per_min),
        ] {
            if let Some(value) = value
                && (!value.is_finite() || value < 0.0)
            {
                return Err(format!("{name} must be zero or more"));
            }
        }
        if let Some(surge) = self.surge_multiplier
            && (!surge.is_finite() || surge < 1.0)
        {
            return Err("surge multiplier must be at least 1".to_string());
        }
        if let Some(commission) = self.commission_rate
            && !(0.0..=100.0).contains(&commission)
        {
            return Err("commission must be between 0 and 100".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city_with_pricing() {
        let json = r#"{"id": 3, "name": "Jacmel", "base_fare": "100", "price_per_km": 35}"#;
        let city: City = serde_json::from_str(json).unwrap();

        assert_eq!(city.id, "3");
        assert!(city.is_active);
        assert_eq!(city.pricing.base_fare, Some(100.0));
        assert_eq!(city.pricing.price_per_km, Some(35.0));
        assert_eq!(city.pricing.surge(), 1.0);
    }

    #[test]
    fn test_empty_update_is_rejected() {
        assert!(PricingUpdate::default().validate().is_err());
    }

    #[test]
    fn test_surge_below_one_is_rejected() {
        let update = PricingUpdate {
            surge_multiplier: Some(0.5),
            ..PricingUpdate::default()
        };
        assert_eq!(
            update.validate().unwrap_err(),
            "surge multiplier must be at least 1"
        );
    }

    #[test]
    fn test_commission_out_of_range_is_rejected() {
        let update = PricingUpdate {
            commission_rate: Some(120.0),
            ..PricingUpdate::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_negative_fare_is_rejected() {
        let update = PricingUpdate {
            price_per_min: Some(-1.0),
            ..PricingUpdate::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_valid_update_serializes_set_fields_only() {
        let update = PricingUpdate {
            base_fare: Some(150.0),
            commission_rate: Some(15.0),
            ..PricingUpdate::default()
        };
        assert!(update.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"base_fare": 150.0, "commission_rate": 15.0})
        );
    }
}
