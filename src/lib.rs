//! TapTap driver - terminal console for TapTapGo drivers.
//!
//! Drivers sign in, go online and get alerted about new ride requests, accept
//! them and walk the ride through arrival, start and completion. Admin
//! accounts manage per-city pricing from the command line.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "taptap-driver";
