//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips styling when stdout is not
//! a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;

/// Check mark for completed steps
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize: std::fmt::Display + Sized {
    /// De-emphasized text
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    /// Headings and labels
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Values worth noticing (ids, counts)
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    /// Success messages
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Warnings
    fn caution(&self) -> String {
        self.yellow().to_string()
    }
}

impl<T: std::fmt::Display> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled list arrow
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner style for checkout calls
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
