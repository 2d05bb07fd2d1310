//! Keyring-based token storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::{ApiError, SecretError};
use crate::domain::ports::TokenStoragePort;

const KEYRING_SERVICE: &str = "taptap-driver";
const KEYRING_USER: &str = "session";

/// System keyring token storage adapter.
///
/// Keyring backends talk to a platform daemon synchronously, so every call
/// runs on the blocking pool.
pub struct KeyringTokenStorage {
    service: String,
    user: String,
}

impl KeyringTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::with_names(KEYRING_SERVICE, KEYRING_USER)
    }

    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    async fn with_entry<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T, SecretError> + Send + 'static,
    {
        let service = self.service.clone();
        let user = self.user.clone();
        let result = tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &user)
                .map_err(|e| SecretError::AccessFailed(e.to_string()))?;
            op(entry)
        })
        .await
        .map_err(|e| ApiError::unexpected(format!("keyring task failed: {e}")))?;
        Ok(result?)
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
        debug!(service = %self.service, "Retrieving token from keyring");

        self.with_entry(|entry| match entry.get_password() {
            Ok(stored) => Ok(AuthToken::new(stored)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SecretError::RetrievalFailed(e.to_string())),
        })
        .await
        .inspect(|token| debug!(found = token.is_some(), "Keyring lookup finished"))
        .inspect_err(|e| warn!(error = %e, "Failed to retrieve token from keyring"))
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), ApiError> {
        debug!(service = %self.service, "Storing token in keyring");

        let value = token.as_str().to_string();
        self.with_entry(move |entry| {
            entry
                .set_password(&value)
                .map_err(|e| SecretError::StorageFailed(e.to_string()))
        })
        .await
        .inspect_err(|e| warn!(error = %e, "Failed to store token in keyring"))
    }

    async fn delete_token(&self) -> Result<(), ApiError> {
        debug!(service = %self.service, "Deleting token from keyring");

        self.with_entry(|entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretError::DeletionFailed(e.to_string())),
        })
        .await
        .inspect_err(|e| warn!(error = %e, "Failed to delete token from keyring"))
    }
}
