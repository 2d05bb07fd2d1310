//! Driver wallet snapshot and withdrawal entities.

use serde::{Deserialize, Serialize};

use super::PayoutMethod;
use crate::domain::serde_utils::{id_string, lenient_f64};

/// Point-in-time copy of a driver's wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub balance: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub pending_withdrawals: Option<f64>,
}

fn default_currency() -> String {
    "HTG".to_string()
}

impl WalletSnapshot {
    #[must_use]
    pub fn new(balance: f64) -> Self {
        Self {
            balance: Some(balance),
            currency: default_currency(),
            pending_withdrawals: None,
        }
    }

    #[must_use]
    pub fn balance(&self) -> f64 {
        self.balance.unwrap_or(0.0)
    }
}

/// A withdrawal the driver asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    #[serde(with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub method: Option<PayoutMethod>,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_defaults_currency() {
        let snapshot: WalletSnapshot = serde_json::from_str(r#"{"balance": 900}"#).unwrap();
        assert_eq!(snapshot.currency, "HTG");
        assert_eq!(snapshot.balance(), 900.0);
    }

    #[test]
    fn test_parse_withdrawal() {
        let json = r#"{"id": 12, "amount": "500", "method": "natcash", "status": "en_attente"}"#;
        let request: WithdrawalRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.id, "12");
        assert_eq!(request.amount, Some(500.0));
        assert_eq!(request.method, Some(PayoutMethod::Natcash));
    }
}
