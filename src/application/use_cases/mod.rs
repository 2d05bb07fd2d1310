//! Use case implementations.

mod accept_ride_use_case;
mod availability_use_case;
mod inbox_use_case;
mod login_use_case;
mod pricing_use_case;
mod profile_use_case;
mod resolve_token_use_case;
mod ride_status_use_case;
mod wallet_use_case;

pub use accept_ride_use_case::{
    ACTIVE_RIDE_MESSAGE, AcceptOutcome, AcceptRideUseCase, accept_failure_message,
};
pub use availability_use_case::AvailabilityUseCase;
pub use inbox_use_case::{InboxUseCase, InboxView};
pub use login_use_case::{LoginUseCase, require_role};
pub use pricing_use_case::PricingUseCase;
pub use profile_use_case::ProfileUseCase;
pub use resolve_token_use_case::{ResolveTokenUseCase, ResolvedToken};
pub use ride_status_use_case::{RideProgress, RideStatusUseCase};
pub use wallet_use_case::WalletUseCase;
