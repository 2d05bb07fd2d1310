//! TapTapGo REST API client.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{
    CitiesEnvelope, CityEnvelope, ErrorResponse, LoginBody, LoginResponse, NotificationsEnvelope,
    OptionalUserEnvelope, RideEnvelope, RidesEnvelope, StatusBody, UserEnvelope, WithdrawBody,
    WithdrawalEnvelope,
};
use crate::domain::entities::{
    AuthToken, City, InboxNotification, PayoutMethod, PricingUpdate, ProfileUpdate, Ride,
    RideStatus, User, UserType, WalletSnapshot, WithdrawalRequest,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    AuthPort, CityPort, InboxPort, ProfilePort, RidePort, Session, WalletPort,
};

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
const USER_AGENT: &str = concat!("taptap-driver/", env!("CARGO_PKG_VERSION"));

/// HTTP adapter for every backend port.
///
/// The session token is held here once login or restore succeeds and sent
/// as a bearer token on every authenticated request.
pub struct TapTapClient {
    client: Client,
    base_url: String,
    token: RwLock<Option<AuthToken>>,
}

impl TapTapClient {
    /// Creates client for `base_url` (scheme and host, without `/api`).
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Sets the token used for authenticated requests.
    pub fn set_token(&self, token: AuthToken) {
        *self.token.write() = Some(token);
    }

    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.token.read();
        let token = token.as_ref().ok_or(ApiError::NoTokenAvailable)?;
        Ok(builder.header(header::AUTHORIZATION, token.bearer()))
    }

    async fn send_raw(builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(error_from_response(status, response).await)
        }
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::send_raw(builder).await?;
        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse backend response");
            ApiError::decode(e.to_string())
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> ApiError {
    warn!(error = %e, "Failed to reach backend");
    if e.is_timeout() {
        ApiError::network("request timed out")
    } else if e.is_connect() {
        ApiError::network("failed to connect to server")
    } else {
        ApiError::network(e.to_string())
    }
}

async fn error_from_response(status: StatusCode, response: reqwest::Response) -> ApiError {
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.message());
    classify_error(status, message)
}

fn classify_error(status: StatusCode, message: Option<String>) -> ApiError {
    debug!(%status, message = ?message, "Backend returned error");
    match status {
        StatusCode::UNAUTHORIZED => {
            ApiError::unauthorized(message.unwrap_or_else(|| "invalid or expired token".into()))
        }
        _ => ApiError::backend(
            status.as_u16(),
            message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map_or_else(|| format!("HTTP {status}"), str::to_string)
            }),
        ),
    }
}

#[async_trait]
impl AuthPort for TapTapClient {
    async fn login(
        &self,
        phone_or_email: &str,
        password: &str,
        user_type: UserType,
    ) -> Result<Session, ApiError> {
        debug!(%user_type, "Logging in");
        let body = LoginBody {
            phone_or_email,
            password,
            user_type,
        };
        let response: LoginResponse =
            Self::send(self.client.post(self.url("/auth/login")).json(&body)).await?;

        let token = AuthToken::new(response.token)
            .ok_or_else(|| ApiError::decode("backend issued a malformed token"))?;
        self.set_token(token.clone());

        Ok(Session {
            token,
            user: response.user,
        })
    }

    async fn validate_token(&self, token: &AuthToken) -> Result<User, ApiError> {
        debug!("Validating token against profile endpoint");
        let envelope: UserEnvelope = Self::send(
            self.client
                .get(self.url("/profile"))
                .header(header::AUTHORIZATION, token.bearer()),
        )
        .await?;
        self.set_token(token.clone());
        Ok(envelope.user)
    }

    fn end_session(&self) {
        debug!("Clearing session token");
        self.clear_token();
    }
}

#[async_trait]
impl RidePort for TapTapClient {
    async fn list_rides(&self, status: Option<&RideStatus>) -> Result<Vec<Ride>, ApiError> {
        let mut request = self.client.get(self.url("/rides"));
        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }
        let envelope: RidesEnvelope = Self::send(self.authorized(request)?).await?;
        debug!(count = envelope.rides.len(), "Fetched rides");
        Ok(envelope.rides)
    }

    async fn accept_ride(&self, ride_id: &str) -> Result<(), ApiError> {
        let request = self.client.put(self.url(&format!("/rides/{ride_id}/accept")));
        Self::send_raw(self.authorized(request)?).await?;
        Ok(())
    }

    async fn update_ride_status(
        &self,
        ride_id: &str,
        status: &RideStatus,
        reason: Option<&str>,
    ) -> Result<Option<Ride>, ApiError> {
        let body = StatusBody {
            status: status.as_str(),
            reason,
        };
        let request = self
            .client
            .put(self.url(&format!("/rides/{ride_id}/status")))
            .json(&body);
        let envelope: RideEnvelope = Self::send(self.authorized(request)?).await?;
        Ok(envelope.ride)
    }
}

#[async_trait]
impl ProfilePort for TapTapClient {
    async fn get_profile(&self) -> Result<User, ApiError> {
        let request = self.client.get(self.url("/profile"));
        let envelope: UserEnvelope = Self::send(self.authorized(request)?).await?;
        Ok(envelope.user)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Option<User>, ApiError> {
        let request = self.client.put(self.url("/profile")).json(update);
        let envelope: OptionalUserEnvelope = Self::send(self.authorized(request)?).await?;
        Ok(envelope.user)
    }

    async fn set_online(&self, driver_id: &str, is_online: bool) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/drivers/{driver_id}/status")))
            .query(&[("is_online", is_online)]);
        Self::send_raw(self.authorized(request)?).await?;
        Ok(())
    }
}

#[async_trait]
impl WalletPort for TapTapClient {
    async fn get_wallet(&self) -> Result<WalletSnapshot, ApiError> {
        let request = self.client.get(self.url("/wallet"));
        match Self::send::<WalletSnapshot>(self.authorized(request)?).await {
            Err(ApiError::Backend { status: 404, .. }) => {
                // Deployments without a wallet service only expose the
                // balance on the profile.
                debug!("Wallet endpoint missing, reading balance from profile");
                let user = self.get_profile().await?;
                Ok(WalletSnapshot::new(user.wallet_balance.unwrap_or_default()))
            }
            other => other,
        }
    }

    async fn request_withdrawal(
        &self,
        amount: f64,
        method: PayoutMethod,
    ) -> Result<WithdrawalRequest, ApiError> {
        let request = self
            .client
            .post(self.url("/wallet/withdraw"))
            .json(&WithdrawBody { amount, method });
        let envelope: WithdrawalEnvelope = Self::send(self.authorized(request)?).await?;
        Ok(envelope.withdrawal)
    }
}

#[async_trait]
impl CityPort for TapTapClient {
    async fn list_cities(&self) -> Result<Vec<City>, ApiError> {
        let request = self.client.get(self.url("/cities"));
        let envelope: CitiesEnvelope = Self::send(self.authorized(request)?).await?;
        Ok(envelope.cities)
    }

    async fn update_city_pricing(
        &self,
        city_id: &str,
        update: &PricingUpdate,
    ) -> Result<City, ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/cities/{city_id}")))
            .json(update);
        let envelope: CityEnvelope = Self::send(self.authorized(request)?).await?;
        envelope
            .city
            .ok_or_else(|| ApiError::decode("city missing from update response"))
    }
}

#[async_trait]
impl InboxPort for TapTapClient {
    async fn list_notifications(&self) -> Result<Vec<InboxNotification>, ApiError> {
        let request = self.client.get(self.url("/notifications"));
        let envelope: NotificationsEnvelope = Self::send(self.authorized(request)?).await?;
        debug!(count = envelope.notifications.len(), "Fetched notifications");
        Ok(envelope.notifications)
    }

    async fn mark_all_read(&self) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/notifications/mark-read"));
        Self::send_raw(self.authorized(request)?).await?;
        Ok(())
    }
}
