//! Dashboard orchestration.
//!
//! [`Dashboard`] owns the [`Session`] and the API client and implements the
//! login → poll → re-check → logout cycle. It never schedules anything
//! itself; the caller decides when to call [`Dashboard::refresh_if_due`].

use std::fmt;

use chrono::{DateTime, Utc};
use ordercount_core::{Credentials, OrderSummary};
use ordercount_fetch::{ApiClient, AuthorizationGrant, BaseUrl, FetchError};
use tracing::{debug, info, instrument, warn};

use crate::config::DashboardConfig;
use crate::error::StoreError;
use crate::session::{Session, SessionState};

// ============================================================================
// Login Input
// ============================================================================

/// Login with an authorization code and client credentials.
#[derive(Clone)]
pub struct AuthCodeLogin {
    /// API base URL.
    pub base_url: String,
    /// One-time authorization code.
    pub auth_code: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl fmt::Debug for AuthCodeLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCodeLogin")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Login with tokens the user already has.
#[derive(Clone)]
pub struct TokenLogin {
    /// API base URL.
    pub base_url: String,
    /// Access token.
    pub access_token: String,
    /// Refresh token, kept but not used.
    pub refresh_token: Option<String>,
}

impl fmt::Debug for TokenLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenLogin")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Rejects blank required fields, naming the first one found.
fn require(fields: &[(&str, &str)]) -> Result<(), StoreError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(StoreError::Validation(format!("{name} is required"))),
        None => Ok(()),
    }
}

fn parse_base_url(input: &str) -> Result<BaseUrl, StoreError> {
    BaseUrl::parse(input).map_err(|e| StoreError::Validation(e.to_string()))
}

// ============================================================================
// Dashboard
// ============================================================================

/// Session plus API client.
#[derive(Debug)]
pub struct Dashboard {
    client: ApiClient,
    session: Session,
    last_summary: Option<OrderSummary>,
    last_interruption: Option<FetchError>,
}

impl Dashboard {
    /// Creates a dashboard with a reqwest-backed client.
    pub fn new(config: &DashboardConfig) -> Result<Self, StoreError> {
        config.validate()?;
        let client = ApiClient::new(config.fetch_settings())?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a dashboard over an existing client.
    ///
    /// The client's own settings are used for requests; only the refresh
    /// interval is taken from `config`.
    pub fn with_client(client: ApiClient, config: &DashboardConfig) -> Self {
        Self {
            client,
            session: Session::new(config.refresh_interval()),
            last_summary: None,
            last_interruption: None,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// The session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Summary of the last poll in this session.
    pub fn last_summary(&self) -> Option<&OrderSummary> {
        self.last_summary.as_ref()
    }

    /// Why the last poll stopped early, if it did.
    pub fn last_interruption(&self) -> Option<&FetchError> {
        self.last_interruption.as_ref()
    }

    // ------------------------------------------------------------------------
    // Login / Logout
    // ------------------------------------------------------------------------

    /// Logs in by exchanging an authorization code, then probing the token.
    ///
    /// Fields are trimmed before use. On failure the current session, if
    /// any, is left as it was.
    #[instrument(skip(self, login), fields(base_url = %login.base_url))]
    pub async fn login_with_code(&mut self, login: AuthCodeLogin) -> Result<(), StoreError> {
        require(&[
            ("base URL", login.base_url.as_str()),
            ("authorization code", login.auth_code.as_str()),
            ("client id", login.client_id.as_str()),
            ("client secret", login.client_secret.as_str()),
        ])?;
        let base_url = parse_base_url(&login.base_url)?;

        let grant = AuthorizationGrant::new(
            login.auth_code.trim(),
            login.client_id.trim(),
            login.client_secret.trim(),
        );
        let tokens = self
            .client
            .exchange_token(&base_url, &grant)
            .await
            .map_err(StoreError::AuthExchangeFailed)?;

        let credentials = Credentials::from_token_pair(base_url.as_str(), tokens)
            .map_err(|e| StoreError::Validation(e.to_string()))?;
        self.verify_and_save(&base_url, credentials).await?;
        info!("Logged in with authorization code");
        Ok(())
    }

    /// Logs in with an existing access token, after probing it.
    ///
    /// The token is trimmed before use. On failure the current session, if
    /// any, is left as it was.
    #[instrument(skip(self, login), fields(base_url = %login.base_url))]
    pub async fn login_with_tokens(&mut self, login: TokenLogin) -> Result<(), StoreError> {
        require(&[
            ("base URL", login.base_url.as_str()),
            ("access token", login.access_token.as_str()),
        ])?;
        let base_url = parse_base_url(&login.base_url)?;

        let credentials =
            Credentials::new(base_url.as_str(), login.access_token, login.refresh_token)
                .map_err(|e| StoreError::Validation(e.to_string()))?;
        self.verify_and_save(&base_url, credentials).await?;
        info!("Logged in with access token");
        Ok(())
    }

    /// Checks the exact token that will be stored, then replaces the session.
    async fn verify_and_save(
        &mut self,
        base_url: &BaseUrl,
        credentials: Credentials,
    ) -> Result<(), StoreError> {
        self.client
            .probe_connection(base_url, credentials.access_token())
            .await
            .map_err(StoreError::ConnectionInvalid)?;

        self.logout();
        self.session.save(credentials);
        Ok(())
    }

    /// Drops credentials and the last poll results.
    pub fn logout(&mut self) {
        self.session.clear();
        self.last_summary = None;
        self.last_interruption = None;
    }

    // ------------------------------------------------------------------------
    // Polling
    // ------------------------------------------------------------------------

    /// Fetches recent orders and counts them.
    ///
    /// A fetch that stops early still produces a summary, flagged
    /// `truncated`; the reason is kept in [`Dashboard::last_interruption`].
    #[instrument(skip(self))]
    pub async fn refresh(&mut self, now: DateTime<Utc>) -> Result<OrderSummary, StoreError> {
        let (base_url, access_token) = {
            let credentials = self
                .session
                .credentials()
                .ok_or(StoreError::NotAuthenticated)?;
            (
                parse_base_url(credentials.base_url())?,
                credentials.access_token().to_string(),
            )
        };

        let fetch = self.client.fetch_orders(&base_url, &access_token, now).await;
        let summary =
            OrderSummary::from_orders(&fetch.orders, now).with_truncated(!fetch.is_complete());

        if let Some(e) = &fetch.interrupted {
            warn!(error = %e, fetched = summary.fetched_orders, "Counts may be incomplete");
        }
        info!(
            total = summary.total_orders,
            fetched = summary.fetched_orders,
            "Poll finished"
        );

        self.session.mark_refreshed(now);
        self.last_interruption = fetch.interrupted;
        self.last_summary = Some(summary.clone());
        Ok(summary)
    }

    /// Polls only if the refresh interval has elapsed.
    pub async fn refresh_if_due(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Option<OrderSummary>, StoreError> {
        if !self.session.is_refresh_due(now) {
            debug!("Refresh not due yet");
            return Ok(None);
        }
        self.refresh(now).await.map(Some)
    }

    /// Probes the held token again.
    ///
    /// If the probe fails, the token is treated as expired: the session is
    /// cleared and [`StoreError::TokenExpired`] is returned. The refresh
    /// token is not used to renew it.
    #[instrument(skip(self))]
    pub async fn recheck_connection(&mut self) -> Result<(), StoreError> {
        let (base_url, access_token) = {
            let credentials = self
                .session
                .credentials()
                .ok_or(StoreError::NotAuthenticated)?;
            (
                parse_base_url(credentials.base_url())?,
                credentials.access_token().to_string(),
            )
        };

        match self.client.probe_connection(&base_url, &access_token).await {
            Ok(_) => {
                info!("Connection still valid");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Re-check failed, clearing session");
                self.logout();
                Err(StoreError::TokenExpired(e))
            }
        }
    }
}
