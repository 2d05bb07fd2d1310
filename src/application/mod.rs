//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Ride alert loop, alert output and bookkeeping services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{CompletionSummary, LoginRequest, LoginResponse, NavigationPlan, TokenSource};
pub use use_cases::{LoginUseCase, ResolveTokenUseCase};
