//! Mock checkout service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use xcart::checkout::CheckoutService;
use xcart::error::{Error, Result};
use xcart::types::{CartItem, MutationItem, OrderForm};

/// A checkout call, in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutCall {
    /// `get_order_form(cart_id)`
    GetOrderForm(String),
    /// `get_items(cart_id)`
    GetItems(String),
    /// `clear_cart(cart_id)`
    ClearCart(String),
    /// `add_to_cart(cart_id, items)`
    AddToCart(String, Vec<MutationItem>),
}

/// Simple mock checkout service for testing
///
/// This manually implements `CheckoutService` rather than using mockall,
/// keeping carts in memory so clear/add behave like the real service.
///
/// Features:
/// - In-memory carts keyed by order form id
/// - Ordered call log for verification
/// - Error injection for failure path testing
pub struct MockCheckoutService {
    carts: Mutex<HashMap<String, Vec<CartItem>>>,
    calls: Mutex<Vec<CheckoutCall>>,
    error_on_fetch: Mutex<Option<String>>,
    error_on_clear: Mutex<Option<String>>,
    error_on_add: Mutex<Option<String>>,
}

impl MockCheckoutService {
    /// Create a mock with no carts
    pub fn new() -> Self {
        Self {
            carts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            error_on_fetch: Mutex::new(None),
            error_on_clear: Mutex::new(None),
            error_on_add: Mutex::new(None),
        }
    }

    /// Set the contents of a cart
    pub fn set_cart(&self, cart_id: &str, items: Vec<CartItem>) {
        self.carts
            .lock()
            .unwrap()
            .insert(cart_id.to_string(), items);
    }

    /// Current contents of a cart
    pub fn cart(&self, cart_id: &str) -> Vec<CartItem> {
        self.carts
            .lock()
            .unwrap()
            .get(cart_id)
            .cloned()
            .unwrap_or_default()
    }

    // === Error injection methods ===

    /// Make `get_order_form` and `get_items` return an error
    pub fn fail_fetch(&self, msg: &str) {
        *self.error_on_fetch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `clear_cart` return an error
    pub fn fail_clear(&self, msg: &str) {
        *self.error_on_clear.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `add_to_cart` return an error
    pub fn fail_add(&self, msg: &str) {
        *self.error_on_add.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification ===

    /// All calls made so far
    pub fn calls(&self) -> Vec<CheckoutCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether any clear or add call was made
    pub fn has_mutations(&self) -> bool {
        self.calls().iter().any(|call| {
            matches!(
                call,
                CheckoutCall::ClearCart(_) | CheckoutCall::AddToCart(..)
            )
        })
    }

    /// Items passed to `add_to_cart` calls, in order
    pub fn added_items(&self) -> Vec<Vec<MutationItem>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                CheckoutCall::AddToCart(_, items) => Some(items),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: CheckoutCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn order_form(&self, cart_id: &str) -> OrderForm {
        let mut items = self.cart(cart_id);
        for (position, item) in items.iter_mut().enumerate() {
            item.index = u32::try_from(position).unwrap();
        }
        OrderForm {
            id: cart_id.to_string(),
            items,
        }
    }
}

impl Default for MockCheckoutService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckoutService for MockCheckoutService {
    async fn get_order_form(&self, cart_id: &str) -> Result<OrderForm> {
        self.record(CheckoutCall::GetOrderForm(cart_id.to_string()));

        if let Some(msg) = self.error_on_fetch.lock().unwrap().as_ref() {
            return Err(Error::UpstreamFetch(msg.clone()));
        }

        Ok(self.order_form(cart_id))
    }

    async fn get_items(&self, cart_id: &str) -> Result<Vec<CartItem>> {
        self.record(CheckoutCall::GetItems(cart_id.to_string()));

        if let Some(msg) = self.error_on_fetch.lock().unwrap().as_ref() {
            return Err(Error::UpstreamFetch(msg.clone()));
        }

        Ok(self.order_form(cart_id).items)
    }

    async fn clear_cart(&self, cart_id: &str) -> Result<()> {
        self.record(CheckoutCall::ClearCart(cart_id.to_string()));

        if let Some(msg) = self.error_on_clear.lock().unwrap().as_ref() {
            return Err(Error::UpstreamMutation(msg.clone()));
        }

        self.set_cart(cart_id, Vec::new());
        Ok(())
    }

    async fn add_to_cart(&self, cart_id: &str, items: &[MutationItem]) -> Result<OrderForm> {
        self.record(CheckoutCall::AddToCart(cart_id.to_string(), items.to_vec()));

        if let Some(msg) = self.error_on_add.lock().unwrap().as_ref() {
            return Err(Error::UpstreamMutation(msg.clone()));
        }

        {
            let mut carts = self.carts.lock().unwrap();
            let cart = carts.entry(cart_id.to_string()).or_default();
            cart.extend(items.iter().map(|item| CartItem {
                id: item.id.to_string(),
                quantity: item.quantity,
                seller: item.seller.clone(),
                index: 0,
                options: item.options.clone(),
                name: None,
                parent_item_index: None,
                product_categories: Default::default(),
            }));
        }

        Ok(self.order_form(cart_id))
    }
}
