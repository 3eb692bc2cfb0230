//! xcart - cross-device cart reconciliation CLI

mod cli;

use clap::{Args, Parser, Subcommand};
use cli::{AddSavedOptions, CheckoutArgs, ReplaceOptions, SettingsUpdate};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xcart::guarantee::GuaranteePolicy;
use xcart::types::MergeStrategy;

#[derive(Parser)]
#[command(name = "xcart", version, about = "Cross-device cart reconciliation for VTEX checkout")]
struct Cli {
    /// Path to the settings file (default: <config dir>/xcart/settings.toml)
    #[arg(long, global = true, env = "XCART_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a saved cart with the current cart
    Replace {
        #[command(flatten)]
        carts: CartIds,
        #[command(flatten)]
        checkout: CheckoutArgs,
        /// Merge strategy (REPLACE, ADD, COMBINE); defaults to the configured one
        #[arg(long, value_parser = parse_strategy)]
        strategy: Option<MergeStrategy>,
        /// Session user type of the requester
        #[arg(long)]
        user_type: Option<String>,
        /// Comma-separated deposit category ids; defaults to the configured ones
        #[arg(long)]
        categories: Option<String>,
        /// Show the plan without changing any cart
        #[arg(long)]
        dry_run: bool,
        /// Preview the plan and ask before changing the cart
        #[arg(long)]
        confirm: bool,
    },
    /// Add the saved cart's items to the current cart
    AddSaved {
        #[command(flatten)]
        carts: CartIds,
        #[command(flatten)]
        checkout: CheckoutArgs,
    },
    /// Check item names against the deposit-line patterns
    Classify {
        /// Item names to check
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Args)]
struct CartIds {
    /// Order form id of the saved cart
    #[arg(long)]
    saved: String,
    /// Order form id of the current cart
    #[arg(long)]
    current: String,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print current settings
    Show,
    /// Change settings
    Set {
        /// Merge without asking the shopper
        #[arg(long)]
        automatic: Option<bool>,
        /// Merge strategy (REPLACE, ADD, COMBINE)
        #[arg(long, value_parser = parse_strategy)]
        strategy: Option<MergeStrategy>,
        /// Comma-separated deposit category ids
        #[arg(long)]
        categories: Option<String>,
        /// Deposit-line rule (categories, name-pattern, both)
        #[arg(long, value_parser = parse_policy)]
        policy: Option<GuaranteePolicy>,
    },
}

fn parse_strategy(s: &str) -> Result<MergeStrategy, String> {
    s.to_ascii_uppercase().parse().map_err(|e| format!("{e}"))
}

fn parse_policy(s: &str) -> Result<GuaranteePolicy, String> {
    s.parse().map_err(|e| format!("{e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("xcart=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings_path = match cli.settings {
        Some(path) => path,
        None => xcart::settings::default_settings_path()?,
    };

    match cli.command {
        Commands::Replace {
            carts,
            checkout,
            strategy,
            user_type,
            categories,
            dry_run,
            confirm,
        } => {
            cli::run_replace(
                &settings_path,
                &checkout,
                ReplaceOptions {
                    saved_cart: carts.saved,
                    current_cart: carts.current,
                    strategy,
                    user_type,
                    categories,
                    dry_run,
                    confirm,
                },
            )
            .await?;
        }
        Commands::AddSaved { carts, checkout } => {
            cli::run_add_saved(
                &settings_path,
                &checkout,
                AddSavedOptions {
                    saved_cart: carts.saved,
                    current_cart: carts.current,
                },
            )
            .await?;
        }
        Commands::Classify { names } => cli::run_classify(&names),
        Commands::Settings { action } => match action {
            SettingsAction::Show => cli::run_settings_show(&settings_path)?,
            SettingsAction::Set {
                automatic,
                strategy,
                categories,
                policy,
            } => cli::run_settings_set(
                &settings_path,
                SettingsUpdate {
                    is_automatic: automatic,
                    strategy,
                    categories_ids: categories,
                    guarantee_policy: policy,
                },
            )?,
        },
    }

    Ok(())
}
