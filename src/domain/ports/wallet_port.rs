//! Wallet port definition.

use async_trait::async_trait;

use crate::domain::entities::{PayoutMethod, WalletSnapshot, WithdrawalRequest};
use crate::domain::errors::ApiError;

/// Port for the driver wallet.
#[async_trait]
pub trait WalletPort: Send + Sync {
    async fn get_wallet(&self) -> Result<WalletSnapshot, ApiError>;

    async fn request_withdrawal(
        &self,
        amount: f64,
        method: PayoutMethod,
    ) -> Result<WithdrawalRequest, ApiError>;
}
