//! Store settings for cart reconciliation
//!
//! Settings are edited by the store admin and read once per request.

mod storage;

pub use storage::{default_settings_path, load_settings, save_settings};

use crate::guarantee::{GuaranteeClassifier, GuaranteePolicy};
use crate::types::MergeStrategy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Reconciliation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Merge without asking the shopper first
    pub is_automatic: bool,
    /// Strategy applied when a saved cart is found
    pub strategy: MergeStrategy,
    /// Comma-separated deposit category ids
    pub categories_ids: String,
    /// Rule used to recognize deposit lines
    pub guarantee_policy: GuaranteePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            is_automatic: false,
            strategy: MergeStrategy::Combine,
            categories_ids: String::new(),
            guarantee_policy: GuaranteePolicy::default(),
        }
    }
}

impl Settings {
    /// Deposit category ids as a set
    pub fn excluded_category_ids(&self) -> HashSet<String> {
        parse_category_ids(&self.categories_ids)
    }

    /// Build the deposit-line classifier these settings describe
    pub fn classifier(&self) -> GuaranteeClassifier {
        GuaranteeClassifier::new(self.guarantee_policy, self.excluded_category_ids())
    }
}

/// Parse a comma-separated category id list
///
/// Ids are trimmed; empty entries are ignored.
pub fn parse_category_ids(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}
