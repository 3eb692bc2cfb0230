//! Error types for xcart

use thiserror::Error;

/// Errors surfaced by cart reconciliation and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching an order form or its items from checkout failed
    #[error("checkout fetch failed: {0}")]
    UpstreamFetch(String),

    /// Clearing or adding to a cart failed
    ///
    /// When this follows a successful clear, the saved cart is left empty.
    #[error("checkout mutation failed: {0}")]
    UpstreamMutation(String),

    /// Input could not be interpreted (non-numeric SKU id, unknown strategy, ...)
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Settings could not be read or written
    #[error("settings error: {0}")]
    Settings(String),

    /// Checkout endpoint configuration is invalid
    #[error("invalid checkout configuration: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;
