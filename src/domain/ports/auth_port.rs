//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, User, UserType};
use crate::domain::errors::ApiError;

/// Token and profile returned by a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: AuthToken,
    pub user: User,
}

/// Port for backend authentication operations.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchanges credentials for a session token.
    async fn login(
        &self,
        phone_or_email: &str,
        password: &str,
        user_type: UserType,
    ) -> Result<Session, ApiError>;

    /// Validates token and returns the profile it belongs to.
    async fn validate_token(&self, token: &AuthToken) -> Result<User, ApiError>;

    /// Forgets the session token held for later requests.
    fn end_session(&self);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Mock authentication port for testing.
    pub struct MockAuthPort {
        should_succeed: Arc<AtomicBool>,
        user: User,
    }

    impl MockAuthPort {
        /// Creates new mock answering with a driver profile.
        pub fn new(should_succeed: bool) -> Self {
            Self::with_user(should_succeed, User::new("42", "Jean Driver", UserType::Driver))
        }

        pub fn with_user(should_succeed: bool, user: User) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                user,
            }
        }

        /// Sets success behavior.
        pub fn set_should_succeed(&self, value: bool) {
            self.should_succeed.store(value, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl AuthPort for MockAuthPort {
        async fn login(
            &self,
            _phone_or_email: &str,
            _password: &str,
            _user_type: UserType,
        ) -> Result<Session, ApiError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(Session {
                    token: AuthToken::new_unchecked("mock_session_token_0123456789"),
                    user: self.user.clone(),
                })
            } else {
                Err(ApiError::backend(401, "Invalid credentials"))
            }
        }

        async fn validate_token(&self, _token: &AuthToken) -> Result<User, ApiError> {
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(self.user.clone())
            } else {
                Err(ApiError::unauthorized("mock rejection"))
            }
        }

        fn end_session(&self) {}
    }
}
