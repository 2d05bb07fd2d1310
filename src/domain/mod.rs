//! Domain layer with core business entities and port definitions.

/// Dispatch link status.
pub mod connection;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Toast and notice definitions.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use connection::ConnectionStatus;
pub use entities::{AuthToken, Ride, RideStatus, User};
pub use errors::{AlertError, ApiError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{AuthPort, RidePort, TokenStoragePort};
