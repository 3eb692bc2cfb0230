//! Storefront-facing `replaceCart` operation
//!
//! Maps the mutation's raw arguments onto a reconciliation and records the
//! response headers the storefront needs.

use crate::checkout::CheckoutService;
use crate::error::Result;
use crate::guarantee::{GuaranteeClassifier, GuaranteePolicy};
use crate::reconcile::{reconcile_carts, ReconcileRequest};
use crate::session::saved_cart_cookie;
use crate::settings::parse_category_ids;
use crate::types::{validate_cart_id, MergeStrategy, OrderForm, Requester};
use serde::Deserialize;

/// Arguments of the `replaceCart` mutation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceCartArgs {
    /// Order form id from the other session
    pub saved_cart: String,
    /// Order form id of the active session
    pub current_cart: String,
    /// `REPLACE`, `ADD` or `COMBINE`
    pub strategy: String,
    /// Session user type
    #[serde(default)]
    pub user_type: Option<String>,
    /// Comma-separated deposit category ids
    #[serde(default)]
    pub categories_ids: Option<String>,
}

/// Per-request context of the storefront call
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Value of the `x-forwarded-host` request header
    pub forwarded_host: Option<String>,
    /// Deposit-line rule configured for the store
    pub guarantee_policy: GuaranteePolicy,
    /// Headers to set on the response
    pub response_headers: Vec<(String, String)>,
}

impl RequestContext {
    /// Set a response header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.response_headers.push((name.to_string(), value));
    }

    /// Get a response header that was set
    pub fn header(&self, name: &str) -> Option<&str> {
        self.response_headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Reconcile the saved cart with the current one
///
/// Returns `None` for requesters who may not merge carts, whatever the other
/// arguments are. For everyone else the saved cart cookie is set before any
/// checkout call, so it is kept even when reconciliation fails.
///
/// # Errors
/// `MalformedInput` for an unknown strategy or an invalid cart id, checked
/// before the cookie is set.
pub async fn replace_cart(
    args: &ReplaceCartArgs,
    ctx: &mut RequestContext,
    checkout: &dyn CheckoutService,
) -> Result<Option<OrderForm>> {
    let requester = Requester::from_user_type(args.user_type.as_deref());
    if !requester.can_merge_carts() {
        return Ok(None);
    }

    let strategy: MergeStrategy = args.strategy.parse()?;
    validate_cart_id(&args.saved_cart)?;
    validate_cart_id(&args.current_cart)?;

    let cookie = saved_cart_cookie(&args.saved_cart, ctx.forwarded_host.as_deref());
    ctx.set_header("set-cookie", cookie);

    let excluded = args
        .categories_ids
        .as_deref()
        .map(parse_category_ids)
        .unwrap_or_default();
    let classifier = GuaranteeClassifier::new(ctx.guarantee_policy, excluded);

    let request = ReconcileRequest {
        saved_cart: args.saved_cart.clone(),
        current_cart: args.current_cart.clone(),
        strategy,
        requester,
    };

    let outcome = reconcile_carts(&request, checkout, &classifier).await?;
    Ok(outcome.into_order_form())
}
