//! Reconcile planning - pure functions for creating reconcile plans
//!
//! This module contains the pure, testable logic for deciding what happens
//! to the saved cart. No I/O happens here - all data is passed in.

use crate::error::Result;
use crate::guarantee::GuaranteeClassifier;
use crate::reconcile::items::merge_items;
use crate::types::{CartItem, MergeStrategy, MutationItem};

/// Why the saved cart is left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    /// The strategy replaces the current cart with the saved one
    Replace,
    /// Neither cart had anything to merge
    NothingToMerge,
}

impl std::fmt::Display for KeepReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Replace => write!(f, "replace strategy keeps the saved cart"),
            Self::NothingToMerge => write!(f, "nothing to merge"),
        }
    }
}

/// Reconcile plan - the functional core output
///
/// Created by `create_reconcile_plan()` (pure) and carried out by
/// `execute_reconcile()` (effectful).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcilePlan {
    /// Leave the saved cart as it is
    KeepSaved(KeepReason),
    /// Clear the saved cart, then add these items to it
    Rewrite {
        /// Payload for the add-to-cart call
        items: Vec<MutationItem>,
        /// Deposit lines dropped from the merged items
        excluded: Vec<CartItem>,
    },
}

impl ReconcilePlan {
    /// Check if the plan mutates the saved cart
    #[must_use]
    pub const fn is_rewrite(&self) -> bool {
        matches!(self, Self::Rewrite { .. })
    }

    /// Items that will be written to the saved cart
    #[must_use]
    pub fn items(&self) -> &[MutationItem] {
        match self {
            Self::KeepSaved(_) => &[],
            Self::Rewrite { items, .. } => items,
        }
    }
}

/// Create a reconcile plan (PURE - no I/O, easily testable)
///
/// Merges `current` and `saved` under `strategy`, drops deposit lines, and
/// converts the rest to the add-to-cart payload.
///
/// An empty merge means there is nothing to do, not that the cart should be
/// emptied. A merge that only contained deposit lines still rewrites the
/// cart, leaving it empty.
///
/// # Errors
/// `MalformedInput` if a kept item has a non-numeric SKU id or no seller.
pub fn create_reconcile_plan(
    current: &[CartItem],
    saved: &[CartItem],
    strategy: MergeStrategy,
    classifier: &GuaranteeClassifier,
) -> Result<ReconcilePlan> {
    if strategy == MergeStrategy::Replace {
        return Ok(ReconcilePlan::KeepSaved(KeepReason::Replace));
    }

    let merged = merge_items(current, saved, strategy);
    if merged.is_empty() {
        return Ok(ReconcilePlan::KeepSaved(KeepReason::NothingToMerge));
    }

    let (kept, excluded) = classifier.partition(merged);
    let items = kept
        .iter()
        .map(MutationItem::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(ReconcilePlan::Rewrite { items, excluded })
}
