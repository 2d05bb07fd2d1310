//! System keyring error types.

use thiserror::Error;

/// Keyring access failures.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("failed to open keyring entry: {0}")]
    AccessFailed(String),

    #[error("failed to read token from keyring: {0}")]
    RetrievalFailed(String),

    #[error("failed to write token to keyring: {0}")]
    StorageFailed(String),

    #[error("failed to delete token from keyring: {0}")]
    DeletionFailed(String),

    #[error("keyring support not compiled in")]
    NotAvailable,
}
