//! Cart reconciliation engine
//!
//! Three-phase pattern:
//! 1. Gather - fetch both carts' items (effectful)
//! 2. Plan - merge, drop deposit lines, build the payload (pure, testable)
//! 3. Execute - clear and refill the saved cart (effectful)

mod execute;
mod gather;
mod items;
mod plan;

pub use execute::{
    add_saved_items_to_current, execute_reconcile, reconcile_carts, ReconcileOutcome,
    ReconcileRequest,
};
pub use gather::{gather_items, GatheredItems};
pub use items::merge_items;
pub use plan::{create_reconcile_plan, KeepReason, ReconcilePlan};
