//! Classify command - check names against the deposit-line patterns

use crate::cli::style::Stylize;
use anstream::println;
use xcart::guarantee::{is_guarantee_name, normalize_name};

/// Run the classify command
pub fn run_classify(names: &[String]) {
    for name in names {
        let normalized = normalize_name(name);
        let verdict = if is_guarantee_name(Some(name)) {
            "deposit".caution()
        } else {
            "product".success()
        };
        println!(
            "{verdict:>8}  {name}  {}",
            format!("[{}]", normalized.without_sgr).muted()
        );
    }
}
