//! Settings commands - show and change reconciliation settings

use crate::cli::style::{check, Stylize};
use anstream::println;
use std::path::Path;
use xcart::error::Result;
use xcart::guarantee::GuaranteePolicy;
use xcart::settings::{load_settings, save_settings, Settings};
use xcart::types::MergeStrategy;

/// Settings fields to change; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    /// New automatic flag
    pub is_automatic: Option<bool>,
    /// New strategy
    pub strategy: Option<MergeStrategy>,
    /// New deposit category list
    pub categories_ids: Option<String>,
    /// New deposit-line rule
    pub guarantee_policy: Option<GuaranteePolicy>,
}

/// Run `settings show`
pub fn run_settings_show(path: &Path) -> Result<()> {
    let settings = load_settings(path)?;
    println!("{} {}", "Settings".emphasis(), path.display().muted());
    print_settings(&settings);
    Ok(())
}

/// Run `settings set`
pub fn run_settings_set(path: &Path, update: SettingsUpdate) -> Result<()> {
    let mut settings = load_settings(path)?;

    if let Some(is_automatic) = update.is_automatic {
        settings.is_automatic = is_automatic;
    }
    if let Some(strategy) = update.strategy {
        settings.strategy = strategy;
    }
    if let Some(categories_ids) = update.categories_ids {
        settings.categories_ids = categories_ids;
    }
    if let Some(policy) = update.guarantee_policy {
        settings.guarantee_policy = policy;
    }

    save_settings(path, &settings)?;
    println!("{} Saved {}", check(), path.display().muted());
    print_settings(&settings);
    Ok(())
}

fn print_settings(settings: &Settings) {
    let mut categories: Vec<String> = settings.excluded_category_ids().into_iter().collect();
    categories.sort();

    println!("  automatic:  {}", settings.is_automatic.accent());
    println!("  strategy:   {}", settings.strategy.accent());
    println!(
        "  categories: {}",
        if categories.is_empty() {
            "(none)".muted()
        } else {
            categories.join(", ").accent()
        }
    );
    println!("  policy:     {}", settings.guarantee_policy.accent());
}
