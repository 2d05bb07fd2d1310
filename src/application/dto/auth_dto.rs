//! Authentication DTOs.

use zeroize::Zeroizing;

use crate::domain::entities::{AuthToken, User, UserType};

/// Where the session token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Token from `--token` or `TAPTAP_TOKEN`.
    CommandLine,
    /// Token from system keyring.
    Keyring,
    /// Token issued by an interactive login.
    Login,
}

impl TokenSource {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CommandLine => "command line / environment",
            Self::Keyring => "system keyring",
            Self::Login => "login",
        }
    }
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Credentials entered on the login screen.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub phone_or_email: String,
    pub password: Zeroizing<String>,
    pub user_type: UserType,
    /// Whether to keep the issued token in the keyring.
    pub persist_token: bool,
}

impl LoginRequest {
    #[must_use]
    pub fn new(phone_or_email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone_or_email: phone_or_email.into(),
            password: Zeroizing::new(password.into()),
            user_type: UserType::Driver,
            persist_token: true,
        }
    }

    #[must_use]
    pub const fn as_user_type(mut self, user_type: UserType) -> Self {
        self.user_type = user_type;
        self
    }

    /// Disables token persistence.
    #[must_use]
    pub const fn without_persistence(mut self) -> Self {
        self.persist_token = false;
        self
    }
}

/// Login response data.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub user: User,
    pub token: AuthToken,
    pub token_source: TokenSource,
    pub token_persisted: bool,
}

impl LoginResponse {
    #[must_use]
    pub const fn new(
        user: User,
        token: AuthToken,
        token_source: TokenSource,
        token_persisted: bool,
    ) -> Self {
        Self {
            user,
            token,
            token_source,
            token_persisted,
        }
    }
}
