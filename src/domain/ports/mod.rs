mod alert_port;
mod auth_port;
mod city_port;
mod inbox_port;
mod map_launcher_port;
mod profile_port;
mod ride_port;
mod token_storage_port;
mod wallet_port;

pub use alert_port::AlertPort;
pub use auth_port::{AuthPort, Session};
pub use city_port::CityPort;
pub use inbox_port::InboxPort;
pub use map_launcher_port::MapLauncherPort;
pub use profile_port::ProfilePort;
pub use ride_port::RidePort;
pub use token_storage_port::TokenStoragePort;
pub use wallet_port::WalletPort;

#[cfg(test)]
pub mod mocks {
    pub use super::alert_port::MockAlertPort;
    pub use super::auth_port::mock::MockAuthPort;
    pub use super::city_port::mock::MockCityPort;
    pub use super::inbox_port::mock::MockInboxPort;
    pub use super::map_launcher_port::MockMapLauncherPort;
    pub use super::profile_port::mock::MockProfilePort;
    pub use super::ride_port::mock::MockRidePort;
    pub use super::token_storage_port::mock::MockTokenStorage;
    pub use super::wallet_port::mock::MockWalletPort;
}
