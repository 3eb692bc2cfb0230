//! Item merging - pure functions combining two carts' line items

use crate::types::{CartItem, MergeStrategy};
use serde_json::Value;

/// Identity of a logical cart line
///
/// Two items are the same line when SKU, seller and options all match.
#[derive(Debug, PartialEq, Eq)]
struct LineKey<'a> {
    id: &'a str,
    seller: &'a str,
    options: &'a [Value],
}

impl<'a> LineKey<'a> {
    fn of(item: &'a CartItem) -> Self {
        Self {
            id: &item.id,
            seller: &item.seller,
            options: &item.options,
        }
    }
}

/// Merge current and saved cart items under a strategy (PURE)
///
/// - `Replace` keeps only the current items.
/// - `Add` appends saved items after current items.
/// - `Combine` appends too, but folds items of the same line into the first
///   one seen and sums their quantities.
///
/// Current items always come first, in their original order. Items with a
/// zero quantity are dropped.
#[must_use]
pub fn merge_items(
    current: &[CartItem],
    saved: &[CartItem],
    strategy: MergeStrategy,
) -> Vec<CartItem> {
    let incoming: &[CartItem] = match strategy {
        MergeStrategy::Replace => &[],
        MergeStrategy::Add | MergeStrategy::Combine => saved,
    };

    let candidates = current
        .iter()
        .chain(incoming)
        .filter(|item| item.quantity > 0);

    if !strategy.tallies() {
        return candidates.cloned().collect();
    }

    let mut merged: Vec<CartItem> = Vec::with_capacity(current.len() + incoming.len());
    for item in candidates {
        let key = LineKey::of(item);
        if let Some(existing) = merged.iter_mut().find(|m| LineKey::of(m) == key) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            merged.push(item.clone());
        }
    }
    merged
}
