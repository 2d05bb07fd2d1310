//! Token storage for builds without keyring support.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::AuthToken;
use crate::domain::errors::{ApiError, SecretError};
use crate::domain::ports::TokenStoragePort;

/// Storage that never holds a token. Sessions last for one run only.
pub struct KeyringTokenStorage;

impl KeyringTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn with_names(_service: impl Into<String>, _user: impl Into<String>) -> Self {
        Self
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, ApiError> {
        debug!("Keyring feature disabled - no stored token");
        Ok(None)
    }

    async fn store_token(&self, _token: &AuthToken) -> Result<(), ApiError> {
        Err(SecretError::NotAvailable.into())
    }

    async fn delete_token(&self) -> Result<(), ApiError> {
        debug!("Keyring feature disabled - nothing to delete");
        Ok(())
    }
}
