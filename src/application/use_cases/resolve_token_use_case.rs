//! Token resolution use case.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::TokenSource;
use crate::domain::entities::AuthToken;
use crate::domain::errors::ApiError;
use crate::domain::ports::TokenStoragePort;

/// Resolved token with its source.
#[derive(Debug, Clone)]
pub struct ResolvedToken {
    pub token: AuthToken,
    pub source: TokenSource,
}

impl ResolvedToken {
    #[must_use]
    pub const fn new(token: AuthToken, source: TokenSource) -> Self {
        Self { token, source }
    }
}

/// Finds a session token without asking the user.
pub struct ResolveTokenUseCase {
    storage_port: Arc<dyn TokenStoragePort>,
}

impl ResolveTokenUseCase {
    #[must_use]
    pub const fn new(storage_port: Arc<dyn TokenStoragePort>) -> Self {
        Self { storage_port }
    }

    /// Resolves token from keyring, then from `--token` / `TAPTAP_TOKEN`.
    ///
    /// # Errors
    /// Currently infallible; keyring failures fall through to the next source.
    pub async fn execute(
        &self,
        cli_token: Option<String>,
    ) -> Result<Option<ResolvedToken>, ApiError> {
        debug!("Checking keyring for stored token");
        match self.storage_port.get_token().await {
            Ok(Some(token)) => {
                info!("Using token from system keyring");
                return Ok(Some(ResolvedToken::new(token, TokenSource::Keyring)));
            }
            Ok(None) => debug!("No token found in keyring"),
            Err(e) => debug!(error = %e, "Failed to check keyring"),
        }

        if let Some(token_str) = cli_token.filter(|s| !s.trim().is_empty()) {
            if let Some(token) = AuthToken::new(&token_str) {
                info!("Using token from command line / environment");
                return Ok(Some(ResolvedToken::new(token, TokenSource::CommandLine)));
            }
            debug!("Command-line token has invalid format");
        }

        debug!("No token found in any source");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockTokenStorage;

    const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.payload.signature";

    #[tokio::test]
    async fn test_keyring_priority() {
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked(TOKEN)));
        let use_case = ResolveTokenUseCase::new(storage);

        let result = use_case
            .execute(Some("cli_token_value_0000000000".to_string()))
            .await
            .unwrap();

        assert_eq!(result.map(|r| r.source), Some(TokenSource::Keyring));
    }

    #[tokio::test]
    async fn test_cli_fallback() {
        let use_case = ResolveTokenUseCase::new(Arc::new(MockTokenStorage::new()));

        let result = use_case.execute(Some(TOKEN.to_string())).await.unwrap();

        assert_eq!(result.map(|r| r.source), Some(TokenSource::CommandLine));
    }

    #[tokio::test]
    async fn test_malformed_cli_token_ignored() {
        let use_case = ResolveTokenUseCase::new(Arc::new(MockTokenStorage::new()));

        let result = use_case.execute(Some("short".to_string())).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_no_token_found() {
        let use_case = ResolveTokenUseCase::new(Arc::new(MockTokenStorage::new()));

        assert!(use_case.execute(None).await.unwrap().is_none());
    }
}
