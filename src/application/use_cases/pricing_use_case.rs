//! City pricing administration.

use std::sync::Arc;

use tracing::info;

use super::login_use_case::require_role;
use crate::domain::entities::{City, PricingUpdate, User, UserType};
use crate::domain::errors::ApiError;
use crate::domain::ports::CityPort;

pub struct PricingUseCase {
    cities: Arc<dyn CityPort>,
}

impl PricingUseCase {
    #[must_use]
    pub const fn new(cities: Arc<dyn CityPort>) -> Self {
        Self { cities }
    }

    /// # Errors
    /// `ApiError::Unauthorized` for non-admin accounts, or the backend error.
    pub async fn list(&self, user: &User) -> Result<Vec<City>, ApiError> {
        require_role(user, UserType::is_admin)?;
        self.cities.list_cities().await
    }

    /// # Errors
    /// `ApiError::Unauthorized` for non-admin accounts, `ApiError::InvalidInput`
    /// for out-of-range values, or the backend error.
    pub async fn update(
        &self,
        user: &User,
        city_id: &str,
        update: &PricingUpdate,
    ) -> Result<City, ApiError> {
        require_role(user, UserType::is_admin)?;
        update.validate().map_err(ApiError::invalid_input)?;

        let city = self.cities.update_city_pricing(city_id, update).await?;
        info!(city_id, city = %city.name, by = %user.id, "City pricing updated");
        Ok(city)
    }
}
