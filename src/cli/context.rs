//! Shared command context for CLI commands
//!
//! Extracts common setup shared by the replace and add-saved commands.

use clap::Args;
use std::path::Path;
use std::time::Duration;
use xcart::checkout::{CheckoutConfig, CheckoutService, VtexCheckoutService};
use xcart::error::Result;
use xcart::settings::{load_settings, Settings};

/// Checkout connection flags
#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    /// Store base URL
    #[arg(long = "checkout-url", env = "XCART_CHECKOUT_URL")]
    pub base_url: String,
    /// VTEX app key
    #[arg(long, env = "XCART_APP_KEY")]
    pub app_key: Option<String>,
    /// VTEX app token
    #[arg(long, env = "XCART_APP_TOKEN", hide_env_values = true)]
    pub app_token: Option<String>,
    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub timeout_ms: u64,
    /// Retries for order form fetches
    #[arg(long, default_value_t = 2)]
    pub retries: u32,
}

impl CheckoutArgs {
    fn to_config(&self) -> CheckoutConfig {
        CheckoutConfig {
            base_url: self.base_url.clone(),
            app_key: self.app_key.clone(),
            app_token: self.app_token.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            fetch_retries: self.retries,
        }
    }
}

/// Shared context for commands that talk to checkout
pub struct CommandContext {
    /// Settings loaded for this run
    pub settings: Settings,
    /// Checkout service
    pub checkout: Box<dyn CheckoutService>,
}

impl CommandContext {
    /// Load settings and create the checkout service
    pub fn new(settings_path: &Path, checkout: &CheckoutArgs) -> Result<Self> {
        let settings = load_settings(settings_path)?;
        let checkout = Box::new(VtexCheckoutService::new(checkout.to_config())?);
        Ok(Self { settings, checkout })
    }
}
