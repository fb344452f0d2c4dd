//! Connection probe.
//!
//! A GET on the API root with the access token. Only HTTP 200 counts as a
//! working connection.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::ApiClient;
use crate::endpoint::{API_ROOT_PATH, BaseUrl};
use crate::error::FetchError;
use crate::transport::{ApiRequest, Authorization};

impl ApiClient {
    /// Checks that `access_token` is accepted by the API.
    ///
    /// Returns the decoded body of the API root on success.
    #[instrument(skip(self, access_token), fields(base_url = %base_url))]
    pub async fn probe_connection(
        &self,
        base_url: &BaseUrl,
        access_token: &str,
    ) -> Result<Value, FetchError> {
        let request = ApiRequest::get(
            base_url.join(API_ROOT_PATH)?,
            Authorization::Bearer(access_token.to_string()),
        );

        let response = self.transport.send(request).await.inspect_err(|e| {
            warn!(error = %e, "Probe request failed");
        })?;

        if response.status != 200 {
            warn!(status = response.status, "Probe rejected");
            return Err(FetchError::from_status(response.status, &response.body));
        }

        let body = response.json()?;
        debug!("Connection probe succeeded");
        Ok(body)
    }
}
