//! xcart - cross-device cart reconciliation
//!
//! Merges a shopper's saved cart (from another device or session) with the
//! current one, leaving out deposit/guarantee lines that checkout generates
//! on its own.

pub mod checkout;
pub mod error;
pub mod guarantee;
pub mod reconcile;
pub mod resolver;
pub mod session;
pub mod settings;
pub mod types;
