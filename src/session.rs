//! Session cookie for the saved cart
//!
//! After a reconciliation the storefront keeps using the saved cart, so its
//! order form id is pinned in the checkout cookie.

/// Checkout cookie name
pub const CHECKOUT_COOKIE: &str = "checkout.vtex.com";

/// Cookie lifetime in seconds (180 days)
pub const CHECKOUT_COOKIE_MAX_AGE: u64 = 15_552_000;

/// Build the `set-cookie` value pinning `saved_cart` as the session's order form
///
/// `host` is the forwarded host of the storefront request; without it the
/// cookie is scoped to the responding host.
pub fn saved_cart_cookie(saved_cart: &str, host: Option<&str>) -> String {
    let domain = host
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(|h| format!("; Domain={h}"))
        .unwrap_or_default();

    format!(
        "{CHECKOUT_COOKIE}=__ofid={saved_cart}; Max-Age={CHECKOUT_COOKIE_MAX_AGE}{domain}; path=/; secure; samesite=lax; httponly"
    )
}
