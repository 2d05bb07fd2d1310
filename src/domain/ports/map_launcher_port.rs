//! External map application port.

use crate::domain::errors::AlertError;

/// Opens URLs in an application outside the terminal.
#[cfg_attr(test, mockall::automock)]
pub trait MapLauncherPort: Send + Sync {
    /// # Errors
    ///
    /// Returns `AlertError::Launch` when no handler accepts the URL.
    fn open_url(&self, url: &str) -> Result<(), AlertError>;
}
