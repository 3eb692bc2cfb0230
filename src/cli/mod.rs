//! CLI commands

mod add_saved;
mod classify;
mod context;
mod replace;
mod settings;
mod style;

pub use add_saved::{run_add_saved, AddSavedOptions};
pub use classify::run_classify;
pub use context::CheckoutArgs;
pub use replace::{run_replace, ReplaceOptions};
pub use settings::{run_settings_set, run_settings_show, SettingsUpdate};
