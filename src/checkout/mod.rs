//! Checkout services
//!
//! Abstracts the order-form operations reconciliation needs, so the same
//! logic runs against the VTEX checkout API or an in-memory mock.

mod vtex;

pub use vtex::{CheckoutConfig, VtexCheckoutService};

use crate::error::Result;
use crate::types::{CartItem, MutationItem, OrderForm};
use async_trait::async_trait;

/// Checkout service trait for cart operations
///
/// Implementations own transport concerns: timeouts, retries and auth.
/// Fetch failures surface as `Error::UpstreamFetch`, clear/add failures as
/// `Error::UpstreamMutation`.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Get an order form by id
    async fn get_order_form(&self, cart_id: &str) -> Result<OrderForm>;

    /// Get the items of an order form.
    ///
    /// Each item's `index` is its position in the cart. The default
    /// implementation delegates to [`get_order_form`].
    ///
    /// [`get_order_form`]: Self::get_order_form
    async fn get_items(&self, cart_id: &str) -> Result<Vec<CartItem>> {
        Ok(self.get_order_form(cart_id).await?.items)
    }

    /// Remove every item from a cart
    async fn clear_cart(&self, cart_id: &str) -> Result<()>;

    /// Add items to a cart, returning the updated order form
    async fn add_to_cart(&self, cart_id: &str, items: &[MutationItem]) -> Result<OrderForm>;
}
