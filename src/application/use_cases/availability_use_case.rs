//! Driver online/offline switch.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::{ProfileUpdate, User};
use crate::domain::errors::ApiError;
use crate::domain::ports::ProfilePort;

pub struct AvailabilityUseCase {
    profile: Arc<dyn ProfilePort>,
}

impl AvailabilityUseCase {
    #[must_use]
    pub const fn new(profile: Arc<dyn ProfilePort>) -> Self {
        Self { profile }
    }

    /// Sets dispatch availability and returns the merged profile.
    ///
    /// # Errors
    /// `ApiError::NotApproved` when going online with an unapproved account;
    /// the backend is not called in that case.
    pub async fn set_online(&self, user: &User, online: bool) -> Result<User, ApiError> {
        if online && !user.is_approved() {
            warn!(user_id = %user.id, status = ?user.status, "Refusing to go online");
            return Err(ApiError::NotApproved);
        }

        self.profile.set_online(&user.id, online).await?;
        info!(user_id = %user.id, online, "Availability changed");

        let mut merged = user.clone();
        merged.apply(&ProfileUpdate::online(online));
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ApprovalStatus, UserType};
    use crate::domain::ports::mocks::MockProfilePort;

    fn driver(status: ApprovalStatus) -> User {
        User::new("7", "Marie", UserType::Driver).with_status(status)
    }

    #[tokio::test]
    async fn test_go_online_when_approved() {
        let port = Arc::new(MockProfilePort::new(driver(ApprovalStatus::Approved)));
        let use_case = AvailabilityUseCase::new(port.clone());

        let user = use_case
            .set_online(&driver(ApprovalStatus::Approved), true)
            .await
            .unwrap();

        assert!(user.is_online);
        assert_eq!(port.online_calls(), vec![true]);
    }

    #[tokio::test]
    async fn test_unapproved_driver_cannot_go_online() {
        let port = Arc::new(MockProfilePort::new(driver(ApprovalStatus::Pending)));
        let use_case = AvailabilityUseCase::new(port.clone());

        let result = use_case.set_online(&driver(ApprovalStatus::Pending), true).await;

        assert!(matches!(result, Err(ApiError::NotApproved)));
        assert!(port.online_calls().is_empty());
    }

    #[tokio::test]
    async fn test_going_offline_is_always_allowed() {
        let port = Arc::new(MockProfilePort::new(driver(ApprovalStatus::Rejected)));
        let use_case = AvailabilityUseCase::new(port.clone());
        let online = driver(ApprovalStatus::Rejected).with_online(true);

        let user = use_case.set_online(&online, false).await.unwrap();

        assert!(!user.is_online);
    }

    #[tokio::test]
    async fn test_backend_failure_leaves_profile_unchanged() {
        let port = Arc::new(MockProfilePort::new(driver(ApprovalStatus::Approved)));
        port.fail_with("Database unavailable");
        let use_case = AvailabilityUseCase::new(port);

        let result = use_case
            .set_online(&driver(ApprovalStatus::Approved), true)
            .await;

        assert!(result.is_err());
    }
}
