//! Item gathering - fetch both carts' items before planning

use crate::checkout::CheckoutService;
use crate::error::Result;
use crate::types::CartItem;
use tracing::debug;

/// Items of both carts, fetched up front
#[derive(Debug, Clone, Default)]
pub struct GatheredItems {
    /// Items of the saved cart
    pub saved: Vec<CartItem>,
    /// Items of the current cart
    pub current: Vec<CartItem>,
}

/// Fetch the items of the saved and current carts (EFFECTFUL)
///
/// Fetch errors propagate unchanged; no cart is assumed empty on failure.
pub async fn gather_items(
    checkout: &dyn CheckoutService,
    saved_cart: &str,
    current_cart: &str,
) -> Result<GatheredItems> {
    let saved = checkout.get_items(saved_cart).await?;
    let current = checkout.get_items(current_cart).await?;

    debug!(
        saved_cart,
        current_cart,
        saved_count = saved.len(),
        current_count = current.len(),
        "gathered cart items"
    );
    Ok(GatheredItems { saved, current })
}
