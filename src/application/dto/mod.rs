//! Data transfer objects for the application layer.

mod auth_dto;
mod ride_dto;

pub use auth_dto::{LoginRequest, LoginResponse, TokenSource};
pub use ride_dto::{CompletionSummary, NavigationPlan};
