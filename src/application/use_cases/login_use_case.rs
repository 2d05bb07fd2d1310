//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse, TokenSource};
use crate::domain::entities::{AuthToken, User, UserType};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, TokenStoragePort};

/// Handles sign-in and session restore.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn TokenStoragePort>,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Signs in with phone or email and password.
    ///
    /// # Errors
    /// Returns error if the form is incomplete or the backend refuses it.
    pub async fn execute(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let identifier = request.phone_or_email.trim();
        if identifier.is_empty() || request.password.is_empty() {
            return Err(ApiError::invalid_input("phone/email and password are required"));
        }

        debug!(user_type = %request.user_type, "Attempting login");

        let session = self
            .auth_port
            .login(identifier, &request.password, request.user_type)
            .await
            .inspect_err(|e| warn!(error = %e, "Login refused"))?;

        info!(
            user_id = %session.user.id,
            user_type = %session.user.user_type,
            "Successfully authenticated"
        );

        let token_persisted = if request.persist_token {
            self.persist(&session.token).await
        } else {
            debug!("Token persistence disabled, skipping storage");
            false
        };

        Ok(LoginResponse::new(
            session.user,
            session.token,
            TokenSource::Login,
            token_persisted,
        ))
    }

    /// Validates an already issued token against the profile endpoint.
    ///
    /// # Errors
    /// Returns error if the token is no longer accepted.
    pub async fn restore(
        &self,
        token: AuthToken,
        source: TokenSource,
    ) -> Result<LoginResponse, ApiError> {
        debug!(%source, token = %token, "Restoring session");

        let user = self
            .auth_port
            .validate_token(&token)
            .await
            .inspect_err(|e| warn!(error = %e, "Stored token rejected"))?;

        info!(user_id = %user.id, %source, "Session restored");
        Ok(LoginResponse::new(user, token, source, source == TokenSource::Keyring))
    }

    /// Deletes the stored token.
    ///
    /// # Errors
    /// Returns error if deletion fails.
    pub async fn delete_token(&self) -> Result<(), ApiError> {
        debug!("Deleting token from secure storage");
        self.storage_port
            .delete_token()
            .await
            .inspect(|_| info!("Token deleted from secure storage"))
            .inspect_err(|e| error!(error = %e, "Failed to delete token from secure storage"))
    }

    async fn persist(&self, token: &AuthToken) -> bool {
        match self.storage_port.store_token(token).await {
            Ok(()) => {
                info!("Token persisted to secure storage");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to persist token to secure storage");
                false
            }
        }
    }
}

/// Rejects accounts of the wrong role for the surface being opened.
///
/// # Errors
/// Returns `ApiError::Unauthorized` naming the role that was found.
pub fn require_role(user: &User, allowed: impl Fn(UserType) -> bool) -> Result<(), ApiError> {
    if allowed(user.user_type) {
        Ok(())
    } else {
        Err(ApiError::unauthorized(format!(
            "{} accounts cannot use this console",
            user.user_type
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockAuthPort, MockTokenStorage};

    fn request() -> LoginRequest {
        LoginRequest::new("+50937000000", "secret-pass")
    }

    #[tokio::test]
    async fn test_successful_login_persists_token() {
        let storage = Arc::new(MockTokenStorage::new());
        let use_case = LoginUseCase::new(Arc::new(MockAuthPort::new(true)), storage.clone());

        let response = use_case.execute(request()).await.unwrap();

        assert_eq!(response.user.full_name, "Jean Driver");
        assert_eq!(response.token_source, TokenSource::Login);
        assert!(response.token_persisted);
        assert_eq!(storage.stored(), Some(response.token));
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_before_network() {
        let use_case = LoginUseCase::new(
            Arc::new(MockAuthPort::new(true)),
            Arc::new(MockTokenStorage::new()),
        );

        let result = use_case.execute(LoginRequest::new("  ", "x")).await;

        assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let use_case = LoginUseCase::new(
            Arc::new(MockAuthPort::new(false)),
            Arc::new(MockTokenStorage::new()),
        );

        let result = use_case.execute(request()).await;

        assert!(matches!(result, Err(ApiError::Backend { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_login_without_persistence() {
        let storage = Arc::new(MockTokenStorage::new());
        let use_case = LoginUseCase::new(Arc::new(MockAuthPort::new(true)), storage.clone());

        let response = use_case
            .execute(request().without_persistence())
            .await
            .unwrap();

        assert!(!response.token_persisted);
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_fail_login() {
        let use_case = LoginUseCase::new(
            Arc::new(MockAuthPort::new(true)),
            Arc::new(MockTokenStorage::read_only()),
        );

        let response = use_case.execute(request()).await.unwrap();

        assert!(!response.token_persisted);
    }

    #[tokio::test]
    async fn test_restore_rejected_token() {
        let use_case = LoginUseCase::new(
            Arc::new(MockAuthPort::new(false)),
            Arc::new(MockTokenStorage::new()),
        );

        let result = use_case
            .restore(
                AuthToken::new_unchecked("expired_token_value_123456"),
                TokenSource::Keyring,
            )
            .await;

        assert!(result.is_err_and(|e| e.is_unauthorized()));
    }

    #[test]
    fn test_require_role() {
        let driver = User::new("1", "D", UserType::Driver);
        let passenger = User::new("2", "P", UserType::Passenger);

        assert!(require_role(&driver, |role| role == UserType::Driver).is_ok());
        assert!(require_role(&passenger, |role| role == UserType::Driver).is_err());
        assert!(require_role(&passenger, UserType::is_admin).is_err());
    }
}
