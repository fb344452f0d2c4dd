//! Login and settings arguments shared by every command.

use anyhow::Result;
use clap::Args;
use ordercount_core::DEFAULT_REFRESH_INTERVAL;
use ordercount_fetch::transport::DEFAULT_TIMEOUT_SECS;
use ordercount_store::{AuthCodeLogin, Dashboard, DashboardConfig, StoreError, TokenLogin};
use serde::Serialize;
use tracing::debug;

use crate::Cli;

/// Where to log in and with what.
///
/// An access token takes precedence over an authorization code.
#[derive(Args, Debug, Default, Clone)]
pub struct AuthArgs {
    /// API base URL, e.g. `https://shop.example.com`.
    #[arg(long, env = "ORDERCOUNT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// One-time authorization code.
    #[arg(long = "code", env = "ORDERCOUNT_AUTH_CODE", hide_env_values = true, global = true)]
    pub auth_code: Option<String>,

    /// OAuth client id.
    #[arg(long, env = "ORDERCOUNT_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// OAuth client secret.
    #[arg(long, env = "ORDERCOUNT_CLIENT_SECRET", hide_env_values = true, global = true)]
    pub client_secret: Option<String>,

    /// Existing access token; skips the code exchange.
    #[arg(long, env = "ORDERCOUNT_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub access_token: Option<String>,

    /// Refresh token to keep alongside the access token.
    #[arg(long, env = "ORDERCOUNT_REFRESH_TOKEN", hide_env_values = true, global = true)]
    pub refresh_token: Option<String>,
}

/// How the user is going to log in.
#[derive(Debug, Clone)]
pub enum LoginRequest {
    /// Exchange an authorization code.
    Code(AuthCodeLogin),
    /// Use tokens directly.
    Tokens(TokenLogin),
}

/// Login method, as shown by `ordercount config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginMethod {
    /// Access token supplied.
    AccessToken,
    /// Authorization code supplied.
    AuthorizationCode,
    /// Nothing supplied.
    None,
}

impl AuthArgs {
    /// Which login the arguments describe.
    pub fn method(&self) -> LoginMethod {
        if self.access_token.is_some() {
            LoginMethod::AccessToken
        } else if self.auth_code.is_some() {
            LoginMethod::AuthorizationCode
        } else {
            LoginMethod::None
        }
    }

    /// Builds the login request.
    ///
    /// Missing fields become empty strings so the dashboard reports which
    /// one is required.
    pub fn login_request(&self) -> Result<LoginRequest, StoreError> {
        let base_url = self.base_url.clone().unwrap_or_default();
        match self.method() {
            LoginMethod::AccessToken => Ok(LoginRequest::Tokens(TokenLogin {
                base_url,
                access_token: self.access_token.clone().unwrap_or_default(),
                refresh_token: self.refresh_token.clone(),
            })),
            LoginMethod::AuthorizationCode => Ok(LoginRequest::Code(AuthCodeLogin {
                base_url,
                auth_code: self.auth_code.clone().unwrap_or_default(),
                client_id: self.client_id.clone().unwrap_or_default(),
                client_secret: self.client_secret.clone().unwrap_or_default(),
            })),
            LoginMethod::None => Err(StoreError::Validation(
                "no credentials: pass --access-token, or --code with --client-id and --client-secret"
                    .to_string(),
            )),
        }
    }
}

/// Polling and request settings.
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Seconds between automatic polls.
    #[arg(
        long,
        env = "ORDERCOUNT_REFRESH_INTERVAL",
        default_value_t = DEFAULT_REFRESH_INTERVAL.as_secs(),
        global = true
    )]
    pub refresh_interval: u64,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "ORDERCOUNT_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,
}

impl SettingsArgs {
    /// Dashboard configuration from these settings.
    pub fn to_config(&self) -> DashboardConfig {
        DashboardConfig {
            refresh_interval_secs: self.refresh_interval,
            request_timeout_secs: self.timeout,
            ..DashboardConfig::default()
        }
    }
}

/// Creates a dashboard and logs in with the CLI arguments.
pub async fn open_dashboard(cli: &Cli) -> Result<Dashboard> {
    let config = cli.settings.to_config();
    let mut dashboard = Dashboard::new(&config)?;

    match cli.auth.login_request()? {
        LoginRequest::Code(login) => {
            debug!("Logging in with authorization code");
            dashboard.login_with_code(login).await?;
        }
        LoginRequest::Tokens(login) => {
            debug!("Logging in with access token");
            dashboard.login_with_tokens(login).await?;
        }
    }

    Ok(dashboard)
}
