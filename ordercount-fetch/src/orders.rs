//! Order pagination.
//!
//! Pages are requested one after another with `limit`, `offset` and
//! `updatedAfter`. Pagination ends when the server-reported `totalCount` is
//! reached, when a page comes back empty, or when a page fails. A failed page
//! does not discard what was already collected: the partial list is returned
//! with the failure attached.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use ordercount_core::Order;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::client::ApiClient;
use crate::endpoint::{BaseUrl, ORDERS_PATH};
use crate::error::FetchError;
use crate::transport::{ApiRequest, Authorization};

// ============================================================================
// Wire Types
// ============================================================================

/// One page of the orders listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    /// Orders on this page.
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Total number of matching orders across all pages.
    ///
    /// Anything other than a non-negative integer reads as absent, which
    /// makes this page the last one.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_count: Option<u64>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_u64))
}

// ============================================================================
// Fetch Result
// ============================================================================

/// Orders collected by one pagination run.
#[derive(Debug, Default)]
pub struct OrderFetch {
    /// Orders in the order the pages returned them.
    pub orders: Vec<Order>,
    /// Number of pages fetched successfully.
    pub pages: u32,
    /// Why pagination stopped early, if it did.
    pub interrupted: Option<FetchError>,
}

impl OrderFetch {
    /// Returns true if every page was fetched.
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}

/// Formats the `updatedAfter` floor as RFC 3339 in local time.
pub fn updated_after(floor: DateTime<Utc>) -> String {
    floor
        .with_timezone(&Local)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

// ============================================================================
// Pagination
// ============================================================================

impl ApiClient {
    /// Fetches every order updated within the configured window before `now`.
    ///
    /// Never fails: errors end pagination and are reported through
    /// [`OrderFetch::interrupted`].
    #[instrument(skip(self, access_token), fields(base_url = %base_url))]
    pub async fn fetch_orders(
        &self,
        base_url: &BaseUrl,
        access_token: &str,
        now: DateTime<Utc>,
    ) -> OrderFetch {
        let mut fetch = OrderFetch::default();

        let url = match base_url.join(ORDERS_PATH) {
            Ok(url) => url,
            Err(e) => {
                fetch.interrupted = Some(e);
                return fetch;
            }
        };

        let floor = updated_after(now - self.settings.window());
        let page_size = u64::from(self.settings.page_size);
        let mut offset: u64 = 0;

        loop {
            let authorization = Authorization::Bearer(access_token.to_string());
            let request = ApiRequest::get(url.clone(), authorization)
                .with_query("limit", page_size)
                .with_query("offset", offset)
                .with_query("updatedAfter", &floor);

            let page = match self.fetch_page(request).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        offset,
                        error = %e,
                        collected = fetch.orders.len(),
                        "Order page failed, keeping partial results"
                    );
                    fetch.interrupted = Some(e);
                    break;
                }
            };

            let page_len = u64::try_from(page.orders.len()).unwrap_or(u64::MAX);
            let total = page.total_count.unwrap_or(page_len);
            fetch.pages += 1;
            fetch.orders.extend(page.orders);

            debug!(offset, page_len, total, "Fetched order page");

            // An empty page ends the run even if totalCount claims more.
            if page_len == 0 || offset.saturating_add(page_len) >= total {
                break;
            }
            offset += page_size;
        }

        info!(
            orders = fetch.orders.len(),
            pages = fetch.pages,
            complete = fetch.is_complete(),
            "Order fetch finished"
        );
        fetch
    }

    async fn fetch_page(&self, request: ApiRequest) -> Result<OrderPage, FetchError> {
        let response = self.transport.send(request).await?;
        if response.status != 200 {
            return Err(FetchError::from_status(response.status, &response.body));
        }
        response.json()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, TimeDelta, TimeZone};
    use serde_json::{Value, json};

    use super::*;
    use crate::mock::MockTransport;
    use crate::settings::FetchSettings;

    fn base() -> BaseUrl {
        BaseUrl::parse("https://shop.example.com").unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn page(statuses: impl IntoIterator<Item = i64>, total: Option<u64>) -> Value {
        let orders: Vec<Value> = statuses.into_iter().map(|s| json!({"status": s})).collect();
        match total {
            Some(total) => json!({"orders": orders, "totalCount": total}),
            None => json!({"orders": orders}),
        }
    }

    fn client(transport: &Arc<MockTransport>) -> ApiClient {
        ApiClient::with_transport(transport.clone(), FetchSettings::default())
    }

    fn offsets(transport: &MockTransport) -> Vec<String> {
        transport
            .requests()
            .iter()
            .map(|r| r.query_param("offset").unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_two_pages_for_600_orders() {
        let transport = Arc::new(
            MockTransport::new()
                .reply_json(200, &page(std::iter::repeat_n(22, 512), Some(600)))
                .reply_json(200, &page(std::iter::repeat_n(28, 88), Some(600))),
        );

        let fetch = client(&transport).fetch_orders(&base(), "at", now()).await;

        assert!(fetch.is_complete());
        assert_eq!(fetch.orders.len(), 600);
        assert_eq!(fetch.pages, 2);
        assert_eq!(transport.request_count(), 2);
        assert_eq!(offsets(&transport), vec!["0", "512"]);
    }

    #[tokio::test]
    async fn test_request_parameters() {
        let transport = Arc::new(MockTransport::new().reply_json(200, &page([22], Some(1))));
        client(&transport).fetch_orders(&base(), "at", now()).await;

        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(
            request.url.as_str(),
            "https://shop.example.com/rest/api/orders/"
        );
        assert_eq!(request.authorization, Authorization::Bearer("at".to_string()));
        assert_eq!(request.query_param("limit"), Some("512"));

        let floor = DateTime::parse_from_rfc3339(request.query_param("updatedAfter").unwrap())
            .unwrap();
        assert_eq!(floor.with_timezone(&Utc), now() - TimeDelta::days(5));
    }

    #[tokio::test]
    async fn test_second_page_failure_keeps_first_page() {
        let transport = Arc::new(
            MockTransport::new()
                .reply_json(200, &page(std::iter::repeat_n(22, 512), Some(1_000)))
                .reply_json(500, &json!({"error": "boom"})),
        );

        let fetch = client(&transport).fetch_orders(&base(), "at", now()).await;

        assert_eq!(fetch.orders.len(), 512);
        assert_eq!(fetch.pages, 1);
        assert!(!fetch.is_complete());
        assert_eq!(fetch.interrupted.as_ref().and_then(FetchError::status), Some(500));
    }

    #[tokio::test]
    async fn test_network_error_on_first_page() {
        let transport = Arc::new(MockTransport::new().reply_error("connection reset"));
        let fetch = client(&transport).fetch_orders(&base(), "at", now()).await;

        assert!(fetch.orders.is_empty());
        assert!(matches!(fetch.interrupted, Some(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_empty_page_stops_inconsistent_total() {
        let transport = Arc::new(
            MockTransport::new()
                .reply_json(200, &page(std::iter::repeat_n(22, 512), Some(5_000)))
                .reply_json(200, &page([], Some(5_000))),
        );

        let fetch = client(&transport).fetch_orders(&base(), "at", now()).await;

        assert!(fetch.is_complete());
        assert_eq!(fetch.orders.len(), 512);
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_total_count_means_single_page() {
        let transport = Arc::new(MockTransport::new().reply_json(200, &page([22, 28, 3], None)));
        let fetch = client(&transport).fetch_orders(&base(), "at", now()).await;

        assert_eq!(fetch.orders.len(), 3);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_unusable_total_count_keeps_page() {
        for total in [json!("2"), json!(-1), json!(1.5), json!(null)] {
            let body = json!({"orders": [{"status": 22}, {"status": 28}], "totalCount": total});
            let transport = Arc::new(MockTransport::new().reply_json(200, &body));
            let fetch = client(&transport).fetch_orders(&base(), "at", now()).await;

            assert!(fetch.is_complete(), "totalCount {total}");
            assert_eq!(fetch.orders.len(), 2, "totalCount {total}");
            assert_eq!(transport.request_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_expired_token_on_first_page() {
        let transport = Arc::new(MockTransport::new().reply_json(401, &json!({})));
        let fetch = client(&transport).fetch_orders(&base(), "at", now()).await;

        assert!(fetch.orders.is_empty());
        assert!(fetch.interrupted.as_ref().is_some_and(FetchError::is_auth_failure));
    }

    #[tokio::test]
    async fn test_custom_page_size() {
        let transport = Arc::new(
            MockTransport::new()
                .reply_json(200, &page([22, 22], Some(5)))
                .reply_json(200, &page([28, 28], Some(5)))
                .reply_json(200, &page([3], Some(5))),
        );
        let settings = FetchSettings::default().with_page_size(2);
        let client = ApiClient::with_transport(transport.clone(), settings);

        let fetch = client.fetch_orders(&base(), "at", now()).await;

        assert_eq!(fetch.orders.len(), 5);
        assert_eq!(offsets(&transport), vec!["0", "2", "4"]);
        assert_eq!(transport.pending_replies(), 0);
    }
}
