//! Platform user profile entity.

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::{id_string, lenient_f64};

/// Role of an account on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Passenger,
    Driver,
    Admin,
    Subadmin,
    Superadmin,
}

impl UserType {
    /// Returns whether the role can manage city pricing.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::Subadmin | Self::Superadmin)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passenger => "passenger",
            Self::Driver => "driver",
            Self::Admin => "admin",
            Self::Subadmin => "subadmin",
            Self::Superadmin => "superadmin",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "passenger" => Ok(Self::Passenger),
            "driver" => Ok(Self::Driver),
            "admin" => Ok(Self::Admin),
            "subadmin" => Ok(Self::Subadmin),
            "superadmin" => Ok(Self::Superadmin),
            other => Err(format!("unknown user type: {other}")),
        }
    }
}

/// Driver account approval status. Unknown values are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Other(String),
}

impl ApprovalStatus {
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl From<String> for ApprovalStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Other(value),
        }
    }
}

impl From<ApprovalStatus> for String {
    fn from(value: ApprovalStatus) -> Self {
        match value {
            ApprovalStatus::Pending => "pending".to_string(),
            ApprovalStatus::Approved => "approved".to_string(),
            ApprovalStatus::Rejected => "rejected".to_string(),
            ApprovalStatus::Other(other) => other,
        }
    }
}

/// Payout destination a driver can request withdrawals to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutMethod {
    Moncash,
    Natcash,
    Bank,
}

impl PayoutMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moncash => "moncash",
            Self::Natcash => "natcash",
            Self::Bank => "bank",
        }
    }
}

impl std::fmt::Display for PayoutMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PayoutMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "moncash" => Ok(Self::Moncash),
            "natcash" => Ok(Self::Natcash),
            "bank" => Ok(Self::Bank),
            other => Err(format!("unknown payout method: {other}")),
        }
    }
}

/// Payout settings stored on a driver profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayoutMethods {
    #[serde(default)]
    pub moncash_enabled: bool,
    #[serde(default)]
    pub moncash_phone: String,
    #[serde(default)]
    pub natcash_enabled: bool,
    #[serde(default)]
    pub natcash_phone: String,
    #[serde(default)]
    pub bank_enabled: bool,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub bank_account_name: String,
    #[serde(default)]
    pub bank_account_number: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub default_method: Option<PayoutMethod>,
}

impl PayoutMethods {
    /// Checks the payout form before it is sent.
    ///
    /// # Errors
    /// Returns a human-readable reason for the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.moncash_enabled && !is_haiti_phone(&self.moncash_phone) {
            return Err("MonCash number must be +509 followed by 8 digits".to_string());
        }
        if self.natcash_enabled && !is_haiti_phone(&self.natcash_phone) {
            return Err("NatCash number must be +509 followed by 8 digits".to_string());
        }
        if self.bank_enabled
            && [
                &self.bank_name,
                &self.bank_account_name,
                &self.bank_account_number,
            ]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err("bank name, account name and account number are required".to_string());
        }
        if let Some(method) = self.default_method
            && !self.is_enabled(method)
        {
            return Err(format!("enable {method} before making it the default"));
        }
        Ok(())
    }

    #[must_use]
    pub const fn is_enabled(&self, method: PayoutMethod) -> bool {
        match method {
            PayoutMethod::Moncash => self.moncash_enabled,
            PayoutMethod::Natcash => self.natcash_enabled,
            PayoutMethod::Bank => self.bank_enabled,
        }
    }

    /// Returns a copy with whitespace trimmed from every text field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            moncash_phone: self.moncash_phone.trim().to_string(),
            natcash_phone: self.natcash_phone.trim().to_string(),
            bank_name: self.bank_name.trim().to_string(),
            bank_account_name: self.bank_account_name.trim().to_string(),
            bank_account_number: self.bank_account_number.trim().to_string(),
            ..self.clone()
        }
    }
}

/// `+509` country code followed by an 8 digit subscriber number.
#[must_use]
pub fn is_haiti_phone(value: &str) -> bool {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.len() == 11 && digits.starts_with("509")
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<PayoutMethod>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

/// Transient copy of the signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(with = "id_string")]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub city: String,
    pub user_type: UserType,
    #[serde(default)]
    pub status: Option<ApprovalStatus>,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub vehicle_brand: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub plate_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub total_rides: u32,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub wallet_balance: Option<f64>,
    #[serde(flatten)]
    pub payout: PayoutMethods,
}

impl User {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        user_type: UserType,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            phone: String::new(),
            email: String::new(),
            city: String::new(),
            user_type,
            status: None,
            is_online: false,
            vehicle_type: None,
            vehicle_brand: None,
            vehicle_model: None,
            plate_number: None,
            rating: None,
            total_rides: 0,
            wallet_balance: None,
            payout: PayoutMethods::default(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: ApprovalStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_online(mut self, is_online: bool) -> Self {
        self.is_online = is_online;
        self
    }

    #[must_use]
    pub const fn with_wallet_balance(mut self, balance: f64) -> Self {
        self.wallet_balance = Some(balance);
        self
    }

    #[must_use]
    pub const fn is_driver(&self) -> bool {
        matches!(self.user_type, UserType::Driver)
    }

    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status.as_ref().is_some_and(ApprovalStatus::is_approved)
    }

    /// Driver may only receive ride alerts while online.
    #[must_use]
    pub const fn is_online_driver(&self) -> bool {
        self.is_driver() && self.is_online
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.phone
        } else {
            &self.full_name
        }
    }

    /// Merges a partial update into the local copy.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(ref full_name) = update.full_name {
            self.full_name.clone_from(full_name);
        }
        if let Some(ref phone) = update.phone {
            self.phone.clone_from(phone);
        }
        if let Some(ref email) = update.email {
            self.email.clone_from(email);
        }
        if let Some(ref city) = update.city {
            self.city.clone_from(city);
        }
        if let Some(is_online) = update.is_online {
            self.is_online = is_online;
        }
        if let Some(ref payout) = update.payout {
            self.payout = payout.clone();
        }
    }
}

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
    #[serde(flatten)]
    pub payout: Option<PayoutMethods>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn online(is_online: bool) -> Self {
        Self {
            is_online: Some(is_online),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn payout(methods: PayoutMethods) -> Self {
        Self {
            payout: Some(methods),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_driver_profile() {
        let json = r#"{
            "id": "d-1",
            "full_name": "Jean Baptiste",
            "phone": "+50937000000",
            "email": "jean@example.com",
            "city": "Port-au-Prince",
            "user_type": "driver",
            "status": "approved",
            "is_online": true,
            "wallet_balance": "1250",
            "moncash_enabled": true,
            "moncash_phone": "+50937000000",
            "default_method": "moncash"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();

        assert!(user.is_driver());
        assert!(user.is_approved());
        assert!(user.is_online_driver());
        assert_eq!(user.wallet_balance, Some(1250.0));
        assert!(user.payout.moncash_enabled);
        assert_eq!(user.payout.default_method, Some(PayoutMethod::Moncash));
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let json = r#"{"id": 7, "full_name": "X", "user_type": "driver", "status": "suspended"}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, "7");
        assert_eq!(user.status, Some(ApprovalStatus::Other("suspended".into())));
        assert!(!user.is_approved());
    }

    #[test]
    fn test_empty_default_method_is_none() {
        let json = r#"{"id": "1", "full_name": "X", "user_type": "driver", "default_method": ""}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.payout.default_method.is_none());
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut user = User::new("d-1", "Jean", UserType::Driver);
        user.city = "Jacmel".into();

        user.apply(&ProfileUpdate::online(true));

        assert!(user.is_online);
        assert_eq!(user.full_name, "Jean");
        assert_eq!(user.city, "Jacmel");
    }

    #[test]
    fn test_passenger_is_never_online_driver() {
        let user = User::new("p-1", "Marie", UserType::Passenger).with_online(true);
        assert!(!user.is_online_driver());
    }

    #[test_case::test_case("+509 3700-0000", true ; "formatted haiti number")]
    #[test_case::test_case("50937000000", true ; "bare digits")]
    #[test_case::test_case("+1 305 555 0100", false ; "foreign number")]
    #[test_case::test_case("+509 3700", false ; "too short")]
    fn test_haiti_phone(value: &str, expected: bool) {
        assert_eq!(is_haiti_phone(value), expected);
    }

    #[test]
    fn test_payout_default_must_be_enabled() {
        let methods = PayoutMethods {
            default_method: Some(PayoutMethod::Bank),
            ..PayoutMethods::default()
        };
        assert_eq!(
            methods.validate().unwrap_err(),
            "enable bank before making it the default"
        );
    }

    #[test]
    fn test_payout_bank_requires_all_fields() {
        let methods = PayoutMethods {
            bank_enabled: true,
            bank_name: "Unibank".into(),
            bank_account_name: "  ".into(),
            bank_account_number: "001".into(),
            ..PayoutMethods::default()
        };
        assert!(methods.validate().is_err());
    }

    #[test]
    fn test_payout_valid_moncash() {
        let methods = PayoutMethods {
            moncash_enabled: true,
            moncash_phone: " +50937000000 ".into(),
            default_method: Some(PayoutMethod::Moncash),
            ..PayoutMethods::default()
        };
        assert!(methods.validate().is_ok());
        assert_eq!(methods.trimmed().moncash_phone, "+50937000000");
    }

    #[test]
    fn test_admin_roles() {
        assert!(UserType::Admin.is_admin());
        assert!(UserType::Superadmin.is_admin());
        assert!(!UserType::Driver.is_admin());
    }

    #[test]
    fn test_profile_update_serializes_only_set_fields() {
        let json = serde_json::to_value(ProfileUpdate::online(false)).unwrap();
        assert_eq!(json, serde_json::json!({"is_online": false}));
    }
}
