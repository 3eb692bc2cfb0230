//! Core types for xcart

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// A line item in a checkout order form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// SKU id (numeric, carried as a string by checkout)
    pub id: String,
    /// Number of units
    pub quantity: u32,
    /// Seller id
    pub seller: String,
    /// Position in the owning cart's item array
    #[serde(default)]
    pub index: u32,
    /// Sub-item references (customizations, attachments); opaque
    #[serde(default)]
    pub options: Vec<Value>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Index of the parent item, for items attached to another line
    #[serde(default)]
    pub parent_item_index: Option<u32>,
    /// Category id to category name
    #[serde(default)]
    pub product_categories: BTreeMap<String, String>,
}

impl CartItem {
    /// Whether this item hangs off another line item
    pub const fn has_parent(&self) -> bool {
        self.parent_item_index.is_some()
    }
}

/// Item shape accepted by the add-to-cart collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationItem {
    /// SKU id
    pub id: u64,
    /// Number of units
    pub quantity: u32,
    /// Seller id
    pub seller: String,
    /// Position carried over from the source cart
    pub index: u32,
    /// Sub-item references, unchanged
    pub options: Vec<Value>,
}

impl TryFrom<&CartItem> for MutationItem {
    type Error = Error;

    fn try_from(item: &CartItem) -> Result<Self> {
        let id = item.id.trim().parse::<u64>().map_err(|_| {
            Error::MalformedInput(format!("SKU id '{}' is not an integer", item.id))
        })?;

        if item.seller.is_empty() {
            return Err(Error::MalformedInput(format!(
                "item {} has no seller",
                item.id
            )));
        }

        Ok(Self {
            id,
            quantity: item.quantity,
            seller: item.seller.clone(),
            index: item.index,
            options: item.options.clone(),
        })
    }
}

/// Check that `id` can be used as an order form id
///
/// Order form ids end up in checkout URL paths and in the session cookie, so
/// only ASCII letters, digits, `-` and `_` are accepted.
///
/// # Errors
/// `MalformedInput` when `id` is empty or contains any other character.
pub fn validate_cart_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::MalformedInput("cart id is empty".to_string()));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::MalformedInput(format!("invalid cart id '{id}'")));
    }
    Ok(())
}

/// A checkout order form (cart)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    /// Order form id
    #[serde(rename = "orderFormId", alias = "id")]
    pub id: String,
    /// Line items
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl OrderForm {
    /// Check if the cart has no items
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// How the saved cart is reconciled with the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeStrategy {
    /// Keep the saved cart as it is
    Replace,
    /// Append saved items to current items
    Add,
    /// Append and sum quantities of matching lines
    Combine,
}

impl MergeStrategy {
    /// Whether matching lines have their quantities summed
    pub const fn tallies(self) -> bool {
        matches!(self, Self::Combine)
    }
}

impl FromStr for MergeStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "REPLACE" => Ok(Self::Replace),
            "ADD" => Ok(Self::Add),
            "COMBINE" => Ok(Self::Combine),
            other => Err(Error::MalformedInput(format!(
                "unknown merge strategy '{other}' (expected REPLACE, ADD or COMBINE)"
            ))),
        }
    }
}

impl std::fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Replace => write!(f, "REPLACE"),
            Self::Add => write!(f, "ADD"),
            Self::Combine => write!(f, "COMBINE"),
        }
    }
}

/// Who is asking for the reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requester {
    /// A regular storefront shopper
    #[default]
    Shopper,
    /// A call-center operator placing orders on behalf of customers
    CallCenterOperator,
}

impl Requester {
    /// User type reported by the session for call-center operators
    pub const CALL_CENTER_OPERATOR: &'static str = "CALL_CENTER_OPERATOR";

    /// Map the session's user type to a requester
    pub fn from_user_type(user_type: Option<&str>) -> Self {
        match user_type {
            Some(Self::CALL_CENTER_OPERATOR) => Self::CallCenterOperator,
            _ => Self::Shopper,
        }
    }

    /// Whether carts may be merged for this requester
    pub const fn can_merge_carts(self) -> bool {
        matches!(self, Self::Shopper)
    }
}
