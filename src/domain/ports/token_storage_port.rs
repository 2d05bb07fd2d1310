//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AuthToken;
use crate::domain::errors::ApiError;

/// Port for session token persistence.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored token.
    async fn get_token(&self) -> Result<Option<AuthToken>, ApiError>;

    /// Stores token securely.
    async fn store_token(&self, token: &AuthToken) -> Result<(), ApiError>;

    /// Deletes stored token.
    async fn delete_token(&self) -> Result<(), ApiError>;

    /// Checks if token exists.
    async fn has_token(&self) -> Result<bool, ApiError> {
        Ok(self.get_token().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// In-memory token storage for testing.
    #[derive(Default)]
    pub struct MockTokenStorage {
        token: Mutex<Option<AuthToken>>,
        fail_writes: bool,
    }

    impl MockTokenStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_token(token: AuthToken) -> Self {
            Self {
                token: Mutex::new(Some(token)),
                fail_writes: false,
            }
        }

        /// Storage whose writes always fail, as a locked keyring does.
        pub fn read_only() -> Self {
            Self {
                token: Mutex::new(None),
                fail_writes: true,
            }
        }

        pub fn stored(&self) -> Option<AuthToken> {
            self.token.lock().clone()
        }
    }

    #[async_trait]
    impl TokenStoragePort for MockTokenStorage {
        async fn get_token(&self) -> Result<Option<AuthToken>, ApiError> {
            Ok(self.token.lock().clone())
        }

        async fn store_token(&self, token: &AuthToken) -> Result<(), ApiError> {
            if self.fail_writes {
                return Err(ApiError::storage_failed("keyring locked"));
            }
            *self.token.lock() = Some(token.clone());
            Ok(())
        }

        async fn delete_token(&self) -> Result<(), ApiError> {
            *self.token.lock() = None;
            Ok(())
        }
    }
}
