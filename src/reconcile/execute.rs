//! Reconcile execution - effectful operations
//!
//! This module contains the effectful code that talks to checkout. It takes
//! a `ReconcilePlan` (created by the pure planning functions) and applies it
//! to the saved cart.

use crate::checkout::CheckoutService;
use crate::error::Result;
use crate::guarantee::GuaranteeClassifier;
use crate::reconcile::gather::gather_items;
use crate::reconcile::plan::{create_reconcile_plan, ReconcilePlan};
use crate::types::{validate_cart_id, MergeStrategy, MutationItem, OrderForm, Requester};
use tracing::{debug, info};

/// A request to reconcile a saved cart with the current one
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    /// Order form id of the saved cart (the one that gets rewritten)
    pub saved_cart: String,
    /// Order form id of the current cart
    pub current_cart: String,
    /// How to reconcile
    pub strategy: MergeStrategy,
    /// Who is asking
    pub requester: Requester,
}

/// Result of a reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Merging is not performed for this requester
    NotEligible,
    /// The saved cart was left as it is
    Unchanged(OrderForm),
    /// The saved cart was cleared and refilled
    Rewritten(OrderForm),
}

impl ReconcileOutcome {
    /// The order form to hand back to the storefront, if any
    #[must_use]
    pub fn into_order_form(self) -> Option<OrderForm> {
        match self {
            Self::NotEligible => None,
            Self::Unchanged(form) | Self::Rewritten(form) => Some(form),
        }
    }
}

/// Execute a reconcile plan (EFFECTFUL)
///
/// For a rewrite, the saved cart is cleared before the new items are added.
/// If adding fails after the clear, the saved cart stays empty; the error is
/// returned and nothing is re-added.
pub async fn execute_reconcile(
    plan: &ReconcilePlan,
    saved_cart: &str,
    saved_order_form: OrderForm,
    checkout: &dyn CheckoutService,
) -> Result<ReconcileOutcome> {
    match plan {
        ReconcilePlan::KeepSaved(reason) => {
            debug!(saved_cart, %reason, "keeping saved cart");
            Ok(ReconcileOutcome::Unchanged(saved_order_form))
        }
        ReconcilePlan::Rewrite { items, excluded } => {
            info!(
                saved_cart,
                count = items.len(),
                excluded = excluded.len(),
                "rewriting saved cart"
            );
            checkout.clear_cart(saved_cart).await?;
            let order_form = checkout.add_to_cart(saved_cart, items).await?;
            Ok(ReconcileOutcome::Rewritten(order_form))
        }
    }
}

/// Reconcile the saved cart with the current one
///
/// Gathers both carts, plans, and executes the plan. `Replace` returns the
/// saved order form without fetching items; requesters who may not merge
/// get `NotEligible` without any checkout call.
pub async fn reconcile_carts(
    request: &ReconcileRequest,
    checkout: &dyn CheckoutService,
    classifier: &GuaranteeClassifier,
) -> Result<ReconcileOutcome> {
    if !request.requester.can_merge_carts() {
        info!(requester = ?request.requester, "cart merging disabled for requester");
        return Ok(ReconcileOutcome::NotEligible);
    }
    validate_cart_id(&request.saved_cart)?;
    validate_cart_id(&request.current_cart)?;

    let saved_order_form = checkout.get_order_form(&request.saved_cart).await?;

    if request.strategy == MergeStrategy::Replace {
        debug!(saved_cart = %request.saved_cart, "replace strategy, keeping saved cart");
        return Ok(ReconcileOutcome::Unchanged(saved_order_form));
    }

    let gathered = gather_items(checkout, &request.saved_cart, &request.current_cart).await?;
    let plan = create_reconcile_plan(
        &gathered.current,
        &gathered.saved,
        request.strategy,
        classifier,
    )?;

    execute_reconcile(&plan, &request.saved_cart, saved_order_form, checkout).await
}

/// Add the saved cart's items to the current cart
///
/// Returns `None` when the saved cart has nothing to add. Deposit lines are
/// left out; checkout regenerates them from the product lines.
///
/// # Errors
/// `MalformedInput` for an invalid cart id, before any checkout call.
pub async fn add_saved_items_to_current(
    saved_cart: &str,
    current_cart: &str,
    checkout: &dyn CheckoutService,
    classifier: &GuaranteeClassifier,
) -> Result<Option<OrderForm>> {
    validate_cart_id(saved_cart)?;
    validate_cart_id(current_cart)?;

    let saved_order_form = checkout.get_order_form(saved_cart).await?;

    let (kept, excluded) = classifier.partition(saved_order_form.items);
    let items = kept
        .iter()
        .filter(|item| item.quantity > 0)
        .map(MutationItem::try_from)
        .collect::<Result<Vec<_>>>()?;

    if items.is_empty() {
        debug!(saved_cart, excluded = excluded.len(), "saved cart has nothing to add");
        return Ok(None);
    }

    info!(saved_cart, current_cart, count = items.len(), "adding saved items to current cart");
    let order_form = checkout.add_to_cart(current_cart, &items).await?;
    Ok(Some(order_form))
}
