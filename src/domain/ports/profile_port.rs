//! Profile and availability port definition.

use async_trait::async_trait;

use crate::domain::entities::{ProfileUpdate, User};
use crate::domain::errors::ApiError;

/// Port for the signed-in user's profile.
#[async_trait]
pub trait ProfilePort: Send + Sync {
    async fn get_profile(&self) -> Result<User, ApiError>;

    /// Sends a partial update. Returns the stored profile when the backend
    /// echoes it.
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Option<User>, ApiError>;

    /// Marks the driver online or offline for dispatch.
    async fn set_online(&self, driver_id: &str, is_online: bool) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// Profile port backed by an in-memory user.
    pub struct MockProfilePort {
        user: Mutex<User>,
        online_calls: Mutex<Vec<bool>>,
        fail: Mutex<Option<String>>,
    }

    impl MockProfilePort {
        pub fn new(user: User) -> Self {
            Self {
                user: Mutex::new(user),
                online_calls: Mutex::new(Vec::new()),
                fail: Mutex::new(None),
            }
        }

        pub fn fail_with(&self, detail: impl Into<String>) {
            *self.fail.lock() = Some(detail.into());
        }

        pub fn online_calls(&self) -> Vec<bool> {
            self.online_calls.lock().clone()
        }

        fn check(&self) -> Result<(), ApiError> {
            match self.fail.lock().as_ref() {
                Some(detail) => Err(ApiError::backend(500, detail.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ProfilePort for MockProfilePort {
        async fn get_profile(&self) -> Result<User, ApiError> {
            self.check()?;
            Ok(self.user.lock().clone())
        }

        async fn update_profile(&self, update: &ProfileUpdate) -> Result<Option<User>, ApiError> {
            self.check()?;
            let mut user = self.user.lock();
            user.apply(update);
            Ok(Some(user.clone()))
        }

        async fn set_online(&self, _driver_id: &str, is_online: bool) -> Result<(), ApiError> {
            self.check()?;
            self.online_calls.lock().push(is_online);
            self.user.lock().is_online = is_online;
            Ok(())
        }
    }
}
