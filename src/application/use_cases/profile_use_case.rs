//! Profile refresh and payout method editing.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{PayoutMethods, ProfileUpdate, User};
use crate::domain::errors::ApiError;
use crate::domain::ports::ProfilePort;

pub struct ProfileUseCase {
    profile: Arc<dyn ProfilePort>,
}

impl ProfileUseCase {
    #[must_use]
    pub const fn new(profile: Arc<dyn ProfilePort>) -> Self {
        Self { profile }
    }

    /// Fetches the current profile.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn refresh(&self) -> Result<User, ApiError> {
        let user = self.profile.get_profile().await?;
        debug!(user_id = %user.id, status = ?user.status, "Profile refreshed");
        Ok(user)
    }

    /// Sends a patch and merges it into `local`.
    ///
    /// The returned profile is the backend's copy when it sends one back;
    /// otherwise the patch is applied to `local` optimistically.
    ///
    /// # Errors
    /// Returns the backend error; `local` is not modified then.
    pub async fn update(&self, local: &User, update: &ProfileUpdate) -> Result<User, ApiError> {
        let merged = match self.profile.update_profile(update).await? {
            Some(stored) => stored,
            None => {
                let mut merged = local.clone();
                merged.apply(update);
                merged
            }
        };
        info!(user_id = %merged.id, "Profile updated");
        Ok(merged)
    }

    /// Validates and saves payout methods.
    ///
    /// # Errors
    /// `ApiError::InvalidInput` with the first invalid field, or the backend
    /// error.
    pub async fn save_payout(&self, local: &User, methods: &PayoutMethods) -> Result<User, ApiError> {
        let methods = methods.trimmed();
        methods.validate().map_err(ApiError::invalid_input)?;
        self.update(local, &ProfileUpdate::payout(methods)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PayoutMethod, UserType};
    use crate::domain::ports::mocks::MockProfilePort;

    fn driver() -> User {
        User::new("7", "Marie", UserType::Driver)
    }

    #[tokio::test]
    async fn test_save_valid_moncash() {
        let use_case = ProfileUseCase::new(Arc::new(MockProfilePort::new(driver())));
        let methods = PayoutMethods {
            moncash_enabled: true,
            moncash_phone: " +509 3700 0000 ".to_string(),
            default_method: Some(PayoutMethod::Moncash),
            ..PayoutMethods::default()
        };

        let user = use_case.save_payout(&driver(), &methods).await.unwrap();

        assert!(user.payout.moncash_enabled);
        assert_eq!(user.payout.moncash_phone, "+509 3700 0000");
    }

    #[tokio::test]
    async fn test_invalid_payout_not_sent() {
        let port = Arc::new(MockProfilePort::new(driver()));
        let use_case = ProfileUseCase::new(port.clone());
        let methods = PayoutMethods {
            natcash_enabled: true,
            natcash_phone: "3700".to_string(),
            ..PayoutMethods::default()
        };

        let result = use_case.save_payout(&driver(), &methods).await;

        assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
        assert!(!port.get_profile().await.unwrap().payout.natcash_enabled);
    }

    #[tokio::test]
    async fn test_refresh_surfaces_backend_error() {
        let port = Arc::new(MockProfilePort::new(driver()));
        port.fail_with("Service unavailable");
        let use_case = ProfileUseCase::new(port);

        assert!(use_case.refresh().await.is_err());
    }
}
