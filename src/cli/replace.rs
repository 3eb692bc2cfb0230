//! Replace command - reconcile a saved cart with the current cart

use crate::cli::context::{CheckoutArgs, CommandContext};
use crate::cli::style::{arrow, check, spinner_style, Stylize, CHECK};
use anstream::println;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;
use xcart::error::{Error, Result};
use xcart::guarantee::GuaranteeClassifier;
use xcart::reconcile::{
    create_reconcile_plan, execute_reconcile, gather_items, ReconcileOutcome, ReconcilePlan,
};
use xcart::settings::parse_category_ids;
use xcart::types::{validate_cart_id, MergeStrategy, OrderForm, Requester};

/// Options for the replace command
#[derive(Debug, Clone)]
pub struct ReplaceOptions {
    /// Saved cart order form id
    pub saved_cart: String,
    /// Current cart order form id
    pub current_cart: String,
    /// Strategy override
    pub strategy: Option<MergeStrategy>,
    /// Session user type
    pub user_type: Option<String>,
    /// Deposit category override
    pub categories: Option<String>,
    /// Show the plan without changing any cart
    pub dry_run: bool,
    /// Preview the plan and prompt before executing
    pub confirm: bool,
}

/// Run the replace command
pub async fn run_replace(
    settings_path: &Path,
    checkout: &CheckoutArgs,
    options: ReplaceOptions,
) -> Result<()> {
    let requester = Requester::from_user_type(options.user_type.as_deref());
    if !requester.can_merge_carts() {
        println!("{}", "Cart merging is disabled for call-center operators.".muted());
        return Ok(());
    }
    validate_cart_id(&options.saved_cart)?;
    validate_cart_id(&options.current_cart)?;

    let ctx = CommandContext::new(settings_path, checkout)?;
    let strategy = options.strategy.unwrap_or(ctx.settings.strategy);
    let classifier = match options.categories.as_deref() {
        Some(raw) => GuaranteeClassifier::new(ctx.settings.guarantee_policy, parse_category_ids(raw)),
        None => ctx.settings.classifier(),
    };

    // =========================================================================
    // Phase 1: GATHER
    // =========================================================================

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching carts ({strategy})..."));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let saved_order_form = ctx.checkout.get_order_form(&options.saved_cart).await?;

    if strategy == MergeStrategy::Replace {
        spinner.finish_and_clear();
        println!(
            "{} Keeping saved cart {} ({} items)",
            check(),
            saved_order_form.id.accent(),
            saved_order_form.items.len().accent()
        );
        return Ok(());
    }

    let gathered = gather_items(
        ctx.checkout.as_ref(),
        &options.saved_cart,
        &options.current_cart,
    )
    .await?;
    spinner.finish_with_message(format!(
        "{} Fetched {} saved and {} current item(s)",
        check(),
        gathered.saved.len().accent(),
        gathered.current.len().accent()
    ));

    // =========================================================================
    // Phase 2: PLAN
    // =========================================================================

    let plan = create_reconcile_plan(&gathered.current, &gathered.saved, strategy, &classifier)?;

    if options.dry_run {
        report_plan(&options.saved_cart, &plan);
        println!("{}", "Dry run complete".muted());
        return Ok(());
    }

    if options.confirm && plan.is_rewrite() {
        report_plan(&options.saved_cart, &plan);
        if !Confirm::new()
            .with_prompt("Rewrite the saved cart?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    // =========================================================================
    // Phase 3: EXECUTE
    // =========================================================================

    let outcome = execute_reconcile(
        &plan,
        &options.saved_cart,
        saved_order_form,
        ctx.checkout.as_ref(),
    )
    .await?;

    match outcome {
        ReconcileOutcome::Rewritten(form) => {
            println!(
                "{} {}",
                format!("{CHECK} Saved cart rewritten:").success(),
                summarize(&form)
            );
        }
        ReconcileOutcome::Unchanged(form) => {
            println!("{} {}", "Saved cart unchanged:".muted(), summarize(&form));
        }
        ReconcileOutcome::NotEligible => {}
    }

    Ok(())
}

fn summarize(form: &OrderForm) -> String {
    format!("{} ({} items)", form.id.accent(), form.items.len().accent())
}

/// Print the plan for --dry-run and --confirm
fn report_plan(saved_cart: &str, plan: &ReconcilePlan) {
    println!("{}:", "Reconcile plan".emphasis());
    println!();

    match plan {
        ReconcilePlan::KeepSaved(reason) => {
            println!("  {} keep {} ({reason})", arrow(), saved_cart.accent());
        }
        ReconcilePlan::Rewrite { items, excluded } => {
            println!("  {} clear {}", arrow(), saved_cart.accent());
            println!("  {} add {} item(s):", arrow(), items.len().accent());
            for item in items {
                println!(
                    "      sku {} x{} (seller {})",
                    item.id.accent(),
                    item.quantity,
                    item.seller
                );
            }
            if !excluded.is_empty() {
                println!(
                    "  {} leave out {} deposit line(s):",
                    arrow(),
                    excluded.len().caution()
                );
                for item in excluded {
                    println!(
                        "      sku {} {}",
                        item.id,
                        item.name.as_deref().unwrap_or("").muted()
                    );
                }
            }
        }
    }

    println!();
}
