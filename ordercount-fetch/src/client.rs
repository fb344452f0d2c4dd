//! API client.
//!
//! [`ApiClient`] bundles a transport with the fetch settings. The operations
//! live next to their wire types: token exchange in [`crate::auth`], the
//! connection probe in [`crate::probe`], order pagination in
//! [`crate::orders`].

use std::fmt;
use std::sync::Arc;

use crate::error::FetchError;
use crate::settings::FetchSettings;
use crate::transport::{ApiTransport, HttpTransport};

/// Client for the order-management API.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) transport: Arc<dyn ApiTransport>,
    pub(crate) settings: FetchSettings,
}

impl ApiClient {
    /// Creates a client backed by reqwest, using the settings' timeout.
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let transport = HttpTransport::with_timeout(settings.timeout)?;
        Ok(Self::with_transport(Arc::new(transport), settings))
    }

    /// Creates a client over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn ApiTransport>, settings: FetchSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
