//! Local device side-effect errors.

use thiserror::Error;

/// Failures of sound playback, haptics and external launches.
///
/// None of these are fatal; callers log and continue.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("sound playback failed: {0}")]
    Playback(String),

    #[error("failed to open external application: {0}")]
    Launch(String),

    #[error("alert output not available on this build")]
    Unavailable,
}
