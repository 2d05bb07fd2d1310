//! City pricing port definition.

use async_trait::async_trait;

use crate::domain::entities::{City, PricingUpdate};
use crate::domain::errors::ApiError;

/// Port for city pricing administration.
#[async_trait]
pub trait CityPort: Send + Sync {
    async fn list_cities(&self) -> Result<Vec<City>, ApiError>;

    /// Applies a pricing patch and returns the stored city.
    async fn update_city_pricing(
        &self,
        city_id: &str,
        update: &PricingUpdate,
    ) -> Result<City, ApiError>;
}
