//! Authorization-code token exchange.
//!
//! ## Flow
//!
//! 1. Encode `client_id:client_secret` as a Basic credential
//! 2. POST `{"grantType": "authorization_code", "token": <code>}` to
//!    `rest/auth/token/`
//! 3. Read `accessToken` (and `refreshToken`, if present) from the response
//!
//! There is no retry: a failed exchange goes back to the user.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ordercount_core::TokenPair;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::client::ApiClient;
use crate::endpoint::{BaseUrl, TOKEN_PATH};
use crate::error::FetchError;
use crate::transport::{ApiRequest, Authorization};

/// Grant type sent to the token endpoint.
const GRANT_TYPE: &str = "authorization_code";

// ============================================================================
// Types
// ============================================================================

/// Authorization code plus the client credentials it was issued for.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationGrant {
    /// One-time authorization code.
    pub code: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl AuthorizationGrant {
    /// Creates a grant.
    pub fn new(
        code: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Basic credential for the token endpoint.
    pub fn basic_credential(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret))
    }
}

impl fmt::Debug for AuthorizationGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationGrant")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Body of the token request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    grant_type: &'a str,
    token: &'a str,
}

// ============================================================================
// Exchange
// ============================================================================

impl ApiClient {
    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// Any status in `200..299` with a body carrying a non-empty
    /// `accessToken` is a success.
    #[instrument(skip(self, grant), fields(base_url = %base_url))]
    pub async fn exchange_token(
        &self,
        base_url: &BaseUrl,
        grant: &AuthorizationGrant,
    ) -> Result<TokenPair, FetchError> {
        debug!("Exchanging authorization code");

        let body = serde_json::to_value(TokenRequest {
            grant_type: GRANT_TYPE,
            token: &grant.code,
        })?;
        let request = ApiRequest::post_json(
            base_url.join(TOKEN_PATH)?,
            Authorization::Basic(grant.basic_credential()),
            body,
        );

        let response = self.transport.send(request).await.inspect_err(|e| {
            warn!(error = %e, "Token request failed");
        })?;

        if !(200..299).contains(&response.status) {
            warn!(status = response.status, "Token endpoint rejected the exchange");
            return Err(FetchError::from_status(response.status, &response.body));
        }

        let tokens: TokenPair = response.json()?;
        if tokens.access_token.trim().is_empty() {
            return Err(FetchError::InvalidResponse(
                "empty accessToken in token response".to_string(),
            ));
        }

        info!(
            has_refresh_token = tokens.refresh_token.is_some(),
            "Obtained access token"
        );
        Ok(tokens)
    }
}
