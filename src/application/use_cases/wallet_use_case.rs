//! Wallet balance and withdrawals.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::{PayoutMethod, WalletSnapshot, WithdrawalRequest};
use crate::domain::errors::ApiError;
use crate::domain::ports::WalletPort;

pub struct WalletUseCase {
    wallet: Arc<dyn WalletPort>,
}

impl WalletUseCase {
    #[must_use]
    pub const fn new(wallet: Arc<dyn WalletPort>) -> Self {
        Self { wallet }
    }

    /// # Errors
    /// Returns the backend error.
    pub async fn balance(&self) -> Result<WalletSnapshot, ApiError> {
        self.wallet.get_wallet().await
    }

    /// Requests a payout after checking it against the current balance.
    ///
    /// # Errors
    /// `ApiError::InvalidInput` for a non-positive amount or one above the
    /// balance, or the backend error.
    pub async fn withdraw(
        &self,
        amount: f64,
        method: PayoutMethod,
    ) -> Result<WithdrawalRequest, ApiError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ApiError::invalid_input("amount must be greater than zero"));
        }

        let snapshot = self.wallet.get_wallet().await?;
        if amount > snapshot.balance() {
            return Err(ApiError::invalid_input(format!(
                "amount exceeds available balance of {:.2} {}",
                snapshot.balance(),
                snapshot.currency
            )));
        }

        let request = self.wallet.request_withdrawal(amount, method).await?;
        info!(withdrawal_id = %request.id, amount, %method, "Withdrawal requested");
        Ok(request)
    }
}
