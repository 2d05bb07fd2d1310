//! Domain entity definitions.

mod city;
mod inbox;
mod ride;
mod sound;
mod token;
mod user;
mod wallet;

pub use city::{City, CityPricing, PricingUpdate};
pub use inbox::InboxNotification;
pub use ride::{Coordinates, Ride, RideStatus, VehicleType};
pub use sound::{DEFAULT_SOUND_INDEX, DriverSettings, NOTIFICATION_SOUNDS, NotificationSound};
pub use token::AuthToken;
pub use user::{ApprovalStatus, PayoutMethod, PayoutMethods, ProfileUpdate, User, UserType};
pub use wallet::{WalletSnapshot, WithdrawalRequest};
