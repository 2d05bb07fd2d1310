//! Opens directions in the system's default map handler.

use tracing::debug;

use crate::domain::errors::AlertError;
use crate::domain::ports::MapLauncherPort;

/// Hands URLs to the platform opener (`xdg-open`, `open`, `start`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMapLauncher;

impl MapLauncherPort for SystemMapLauncher {
    fn open_url(&self, url: &str) -> Result<(), AlertError> {
        debug!(url, "Opening external map");
        opener::open(url).map_err(|e| AlertError::Launch(e.to_string()))
    }
}
