//! Dispatch link status shown in the status bar.

/// State of the driver's connection to ride dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// Driver is offline; nothing is polled.
    #[default]
    Offline,
    /// Online, waiting for the baseline poll.
    Connecting,
    /// Online and the last poll succeeded.
    Online,
    /// Online but the last poll failed.
    Degraded,
}

impl ConnectionStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Offline => "Offline",
            Self::Connecting => "Connecting",
            Self::Online => "Online",
            Self::Degraded => "Online (no signal)",
        }
    }

    #[must_use]
    pub const fn is_online(self) -> bool {
        !matches!(self, Self::Offline)
    }

    /// Status after a poll finished with the given outcome.
    #[must_use]
    pub const fn after_poll(self, succeeded: bool) -> Self {
        match (self, succeeded) {
            (Self::Offline, _) => Self::Offline,
            (_, true) => Self::Online,
            (_, false) => Self::Degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_outcome_transitions() {
        assert_eq!(ConnectionStatus::Connecting.after_poll(true), ConnectionStatus::Online);
        assert_eq!(ConnectionStatus::Online.after_poll(false), ConnectionStatus::Degraded);
        assert_eq!(ConnectionStatus::Degraded.after_poll(true), ConnectionStatus::Online);
        assert_eq!(ConnectionStatus::Offline.after_poll(true), ConnectionStatus::Offline);
    }
}
