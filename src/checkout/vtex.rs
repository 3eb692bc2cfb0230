//! VTEX checkout service implementation

use crate::checkout::CheckoutService;
use crate::error::{Error, Result};
use crate::types::{CartItem, MutationItem, OrderForm};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default request timeout in milliseconds
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default number of retries for order-form fetches
const DEFAULT_FETCH_RETRIES: u32 = 2;

/// Checkout endpoint configuration
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Store base URL, e.g. `https://mystore.vtexcommercestable.com.br`
    pub base_url: String,
    /// App key for authenticated calls
    pub app_key: Option<String>,
    /// App token for authenticated calls
    pub app_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra attempts for fetches that fail with a transport error or 5xx
    pub fetch_retries: u32,
}

impl CheckoutConfig {
    /// Create a config with default timeout and retries
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            app_key: None,
            app_token: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            fetch_retries: DEFAULT_FETCH_RETRIES,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemsPayload<'a> {
    order_items: &'a [MutationItem],
}

/// Checkout service for the VTEX checkout API, using reqwest
pub struct VtexCheckoutService {
    client: Client,
    base_url: String,
    app_key: Option<String>,
    app_token: Option<String>,
    fetch_retries: u32,
}

impl VtexCheckoutService {
    /// Create a new VTEX checkout service
    pub fn new(config: CheckoutConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent("xcart")
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_key: config.app_key,
            app_token: config.app_token,
            fetch_retries: config.fetch_retries,
        })
    }

    fn order_form_url(&self, cart_id: &str, suffix: &str) -> String {
        format!(
            "{}/api/checkout/pub/orderForm/{}{}",
            self.base_url,
            urlencoding::encode(cart_id),
            suffix
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match (&self.app_key, &self.app_token) {
            (Some(key), Some(token)) => builder
                .header("X-VTEX-API-AppKey", key)
                .header("X-VTEX-API-AppToken", token),
            _ => builder,
        }
    }

    /// Send a fetch, retrying transport errors and server errors
    async fn fetch_with_retries(&self, url: &str) -> Result<Response> {
        let mut attempt = 0;
        loop {
            let result = self
                .authorized(self.client.get(url))
                .header("Accept", "application/json")
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_server_error() && attempt < self.fetch_retries => {
                    warn!(url, status = %response.status(), attempt, "checkout fetch failed, retrying");
                }
                Ok(response) => {
                    return response
                        .error_for_status()
                        .map_err(|e| Error::UpstreamFetch(e.to_string()));
                }
                Err(e) if attempt < self.fetch_retries => {
                    warn!(url, error = %e, attempt, "checkout fetch failed, retrying");
                }
                Err(e) => return Err(Error::UpstreamFetch(e.to_string())),
            }
            attempt += 1;
        }
    }
}

/// Number items by their position in the cart
fn assign_indexes(items: &mut [CartItem]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.index = u32::try_from(position).unwrap_or(u32::MAX);
    }
}

#[async_trait]
impl CheckoutService for VtexCheckoutService {
    async fn get_order_form(&self, cart_id: &str) -> Result<OrderForm> {
        debug!(cart_id, "fetching order form");
        let url = self.order_form_url(cart_id, "");

        let mut order_form: OrderForm = self
            .fetch_with_retries(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::UpstreamFetch(format!("failed to parse order form: {e}")))?;

        assign_indexes(&mut order_form.items);
        debug!(cart_id, count = order_form.items.len(), "fetched order form");
        Ok(order_form)
    }

    async fn clear_cart(&self, cart_id: &str) -> Result<()> {
        debug!(cart_id, "clearing cart");
        let url = self.order_form_url(cart_id, "/items/removeAll");

        self.authorized(self.client.post(&url))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| Error::UpstreamMutation(format!("failed to clear cart {cart_id}: {e}")))?
            .error_for_status()
            .map_err(|e| Error::UpstreamMutation(format!("failed to clear cart {cart_id}: {e}")))?;

        debug!(cart_id, "cleared cart");
        Ok(())
    }

    async fn add_to_cart(&self, cart_id: &str, items: &[MutationItem]) -> Result<OrderForm> {
        debug!(cart_id, count = items.len(), "adding items to cart");
        let url = self.order_form_url(cart_id, "/items");

        let mut order_form: OrderForm = self
            .authorized(self.client.post(&url))
            .json(&AddItemsPayload { order_items: items })
            .send()
            .await
            .map_err(|e| Error::UpstreamMutation(format!("failed to add items to {cart_id}: {e}")))?
            .error_for_status()
            .map_err(|e| Error::UpstreamMutation(format!("failed to add items to {cart_id}: {e}")))?
            .json()
            .await
            .map_err(|e| Error::UpstreamMutation(format!("failed to parse order form: {e}")))?;

        assign_indexes(&mut order_form.items);
        debug!(cart_id, count = order_form.items.len(), "added items to cart");
        Ok(order_form)
    }
}
