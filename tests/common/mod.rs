//! Shared test fixtures

#![allow(dead_code)]

mod mock_checkout;

pub use mock_checkout::{CheckoutCall, MockCheckoutService};

use std::collections::BTreeMap;
use xcart::types::CartItem;

/// A top-level product line sold by seller "1"
pub fn product(id: &str, quantity: u32) -> CartItem {
    CartItem {
        id: id.to_string(),
        quantity,
        seller: "1".to_string(),
        index: 0,
        options: vec![],
        name: Some(format!("Product {id}")),
        parent_item_index: None,
        product_categories: BTreeMap::from([("1".to_string(), "Bauturi".to_string())]),
    }
}

/// A deposit line, recognizable by both name and category "99"
pub fn deposit(id: &str, quantity: u32) -> CartItem {
    CartItem {
        id: id.to_string(),
        quantity,
        seller: "1".to_string(),
        index: 0,
        options: vec![],
        name: Some("Garantie SGR".to_string()),
        parent_item_index: None,
        product_categories: BTreeMap::from([("99".to_string(), "SGR".to_string())]),
    }
}
