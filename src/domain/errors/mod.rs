//! Domain error types.

mod alert_error;
mod api_error;
mod secret_error;

pub use alert_error::AlertError;
pub use api_error::ApiError;
pub use secret_error::SecretError;
