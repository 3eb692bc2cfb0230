//! Add-saved command - copy the saved cart's items into the current cart

use crate::cli::context::{CheckoutArgs, CommandContext};
use crate::cli::style::{Stylize, CHECK};
use anstream::println;
use std::path::Path;
use xcart::error::Result;
use xcart::reconcile::add_saved_items_to_current;

/// Options for the add-saved command
#[derive(Debug, Clone)]
pub struct AddSavedOptions {
    /// Saved cart order form id
    pub saved_cart: String,
    /// Current cart order form id
    pub current_cart: String,
}

/// Run the add-saved command
pub async fn run_add_saved(
    settings_path: &Path,
    checkout: &CheckoutArgs,
    options: AddSavedOptions,
) -> Result<()> {
    let ctx = CommandContext::new(settings_path, checkout)?;

    let result = add_saved_items_to_current(
        &options.saved_cart,
        &options.current_cart,
        ctx.checkout.as_ref(),
        &ctx.settings.classifier(),
    )
    .await?;

    match result {
        Some(form) => println!(
            "{} {} now has {} item(s)",
            format!("{CHECK} Added:").success(),
            form.id.accent(),
            form.items.len().accent()
        ),
        None => println!("{}", "Saved cart has nothing to add.".muted()),
    }

    Ok(())
}
