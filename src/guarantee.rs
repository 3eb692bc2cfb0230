//! Deposit/guarantee item classification
//!
//! Checkout adds a returnable-container deposit line ("garantie") for each
//! bottled product. Those lines are regenerated by checkout from the product
//! lines, so copying them from one cart to another would double the deposit.
//! This module decides which items are such lines.

use crate::types::CartItem;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::BuildHasher;
use std::sync::LazyLock;

/// Base token every deposit line name starts with
const GUARANTEE_TOKEN: &str = "GARANTIE";

/// Package-count tokens that may follow the base token
const QUANTITY_TOKENS: [&str; 4] = ["X1", "X2", "X6", "X12"];

/// Container materials that may follow the base token
const MATERIAL_TOKENS: [&str; 3] = ["STICLA", "PLASTIC", "DOZA"];

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.,]").expect("valid separator regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static SGR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bSGR\b").expect("valid SGR token regex"));
static SGR_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^GARANTIE SGR X[0-9]+$").expect("valid SGR count regex"));
static PLAIN_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^GARANTIE X[0-9]+$").expect("valid count regex"));

static VALID_NAMES: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let mut names = HashSet::new();
    names.insert(GUARANTEE_TOKEN.to_string());
    for quantity in QUANTITY_TOKENS {
        names.insert(format!("{GUARANTEE_TOKEN} {quantity}"));
    }
    for material in MATERIAL_TOKENS {
        names.insert(format!("{GUARANTEE_TOKEN} {material}"));
        for quantity in QUANTITY_TOKENS {
            names.insert(format!("{GUARANTEE_TOKEN} {material} {quantity}"));
        }
    }
    names
});

/// Which rule identifies deposit lines in this deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuaranteePolicy {
    /// Item belongs to one of the excluded categories
    #[default]
    Categories,
    /// Item name normalizes to a known deposit name
    NamePattern,
    /// Either rule matches
    Both,
}

impl std::fmt::Display for GuaranteePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Categories => write!(f, "categories"),
            Self::NamePattern => write!(f, "name-pattern"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl std::str::FromStr for GuaranteePolicy {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s {
            "categories" => Ok(Self::Categories),
            "name-pattern" => Ok(Self::NamePattern),
            "both" => Ok(Self::Both),
            other => Err(crate::error::Error::MalformedInput(format!(
                "unknown guarantee policy '{other}' (expected categories, name-pattern or both)"
            ))),
        }
    }
}

/// A deposit-line name after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    /// Uppercased, separators replaced, whitespace collapsed
    pub full: String,
    /// `full` with the standalone `SGR` token removed
    pub without_sgr: String,
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

/// Normalize an item name for deposit matching
pub fn normalize_name(name: &str) -> NormalizedName {
    let upper = name.to_uppercase();
    let spaced = SEPARATORS.replace_all(&upper, " ");
    let full = collapse_whitespace(&spaced);
    let without_sgr = collapse_whitespace(&SGR_TOKEN.replace_all(&full, ""));
    NormalizedName { full, without_sgr }
}

/// Check whether a name is a deposit line name
///
/// Matching is case-insensitive and treats `-`, `_`, `.` and `,` as spaces.
/// The `SGR` marker is ignored, and `GARANTIE SGR X<n>` is accepted for any
/// package count `n`.
pub fn is_guarantee_name(name: Option<&str>) -> bool {
    let Some(name) = name else {
        return false;
    };

    let normalized = normalize_name(name);
    if normalized.without_sgr.is_empty() {
        return false;
    }

    if VALID_NAMES.contains(&normalized.without_sgr) {
        return true;
    }

    SGR_COUNT.is_match(&normalized.full) && PLAIN_COUNT.is_match(&normalized.without_sgr)
}

/// Check whether an item belongs to one of the excluded categories
pub fn in_excluded_category<S: BuildHasher>(
    item: &CartItem,
    excluded_category_ids: &HashSet<String, S>,
) -> bool {
    item.product_categories
        .keys()
        .any(|category| excluded_category_ids.contains(category))
}

/// Classifies cart items as deposit/guarantee lines under one policy
#[derive(Debug, Clone, Default)]
pub struct GuaranteeClassifier {
    policy: GuaranteePolicy,
    excluded_category_ids: HashSet<String>,
}

impl GuaranteeClassifier {
    /// Create a classifier
    pub const fn new(policy: GuaranteePolicy, excluded_category_ids: HashSet<String>) -> Self {
        Self {
            policy,
            excluded_category_ids,
        }
    }

    /// The configured policy
    pub const fn policy(&self) -> GuaranteePolicy {
        self.policy
    }

    /// Category ids treated as deposit categories
    pub const fn excluded_category_ids(&self) -> &HashSet<String> {
        &self.excluded_category_ids
    }

    /// Check whether an item is a deposit line
    ///
    /// Child items (those with a parent index) are never deposit lines.
    pub fn is_guarantee(&self, item: &CartItem) -> bool {
        if item.has_parent() {
            return false;
        }

        match self.policy {
            GuaranteePolicy::Categories => {
                in_excluded_category(item, &self.excluded_category_ids)
            }
            GuaranteePolicy::NamePattern => is_guarantee_name(item.name.as_deref()),
            GuaranteePolicy::Both => {
                in_excluded_category(item, &self.excluded_category_ids)
                    || is_guarantee_name(item.name.as_deref())
            }
        }
    }

    /// Split items into (kept, deposit lines), preserving order
    pub fn partition(&self, items: Vec<CartItem>) -> (Vec<CartItem>, Vec<CartItem>) {
        items.into_iter().partition(|item| !self.is_guarantee(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn named(name: &str) -> CartItem {
        CartItem {
            id: "1".to_string(),
            quantity: 1,
            seller: "1".to_string(),
            index: 0,
            options: vec![],
            name: Some(name.to_string()),
            parent_item_index: None,
            product_categories: BTreeMap::new(),
        }
    }

    fn in_categories(ids: &[&str]) -> CartItem {
        let mut item = named("Apa plata 2L");
        item.product_categories = ids
            .iter()
            .map(|id| ((*id).to_string(), format!("Category {id}")))
            .collect();
        item
    }

    fn excluded(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| (*id).to_string()).collect()
    }

    #[test]
    fn test_normalize_separators_and_case() {
        let normalized = normalize_name("  garantie-sticla__x2. ");
        assert_eq!(normalized.full, "GARANTIE STICLA X2");
        assert_eq!(normalized.without_sgr, "GARANTIE STICLA X2");
    }

    #[test]
    fn test_normalize_strips_standalone_sgr_only() {
        let normalized = normalize_name("Garantie SGR doza");
        assert_eq!(normalized.full, "GARANTIE SGR DOZA");
        assert_eq!(normalized.without_sgr, "GARANTIE DOZA");

        let embedded = normalize_name("garantie sgrx");
        assert_eq!(embedded.without_sgr, "GARANTIE SGRX");
    }

    #[test]
    fn test_separator_and_case_insensitive() {
        assert!(is_guarantee_name(Some("garantie-sticla-x2")));
        assert!(is_guarantee_name(Some("GARANTIE_STICLA_X2")));
        assert!(is_guarantee_name(Some("Garantie.Sticla.X2")));
    }

    #[test]
    fn test_all_generated_patterns_match() {
        assert!(is_guarantee_name(Some("garantie")));
        assert!(is_guarantee_name(Some("garantie x12")));
        assert!(is_guarantee_name(Some("garantie plastic")));
        assert!(is_guarantee_name(Some("garantie, doza, x6")));
    }

    #[test]
    fn test_sgr_count_rule() {
        assert!(is_guarantee_name(Some("garantie sgr x6")));
        assert!(is_guarantee_name(Some("GARANTIE SGR X24")));
        // Count outside the fixed list without the SGR marker
        assert!(!is_guarantee_name(Some("garantie x24")));
        // Only ASCII digits count
        assert!(!is_guarantee_name(Some("garantie sgr x\u{666}")));
    }

    #[test]
    fn test_non_matching_names() {
        assert!(!is_guarantee_name(Some("garantie unicorn")));
        assert!(!is_guarantee_name(Some("garantie sticla x3")));
        assert!(!is_guarantee_name(Some("apa garantie")));
        assert!(!is_guarantee_name(Some("")));
        assert!(!is_guarantee_name(Some(" - _ ")));
        assert!(!is_guarantee_name(Some("SGR")));
        assert!(!is_guarantee_name(None));
    }

    #[test]
    fn test_category_policy() {
        let classifier = GuaranteeClassifier::new(GuaranteePolicy::Categories, excluded(&["9"]));
        assert!(classifier.is_guarantee(&in_categories(&["3", "9"])));
        assert!(!classifier.is_guarantee(&in_categories(&["3"])));
        // Name is ignored under the category policy
        assert!(!classifier.is_guarantee(&named("garantie")));
    }

    #[test]
    fn test_name_policy_ignores_categories() {
        let classifier = GuaranteeClassifier::new(GuaranteePolicy::NamePattern, excluded(&["9"]));
        assert!(classifier.is_guarantee(&named("Garantie Doza")));
        assert!(!classifier.is_guarantee(&in_categories(&["9"])));
    }

    #[test]
    fn test_both_policy() {
        let classifier = GuaranteeClassifier::new(GuaranteePolicy::Both, excluded(&["9"]));
        assert!(classifier.is_guarantee(&named("Garantie Doza")));
        assert!(classifier.is_guarantee(&in_categories(&["9"])));
        assert!(!classifier.is_guarantee(&in_categories(&["1"])));
    }

    #[test]
    fn test_child_items_never_classified() {
        let classifier = GuaranteeClassifier::new(GuaranteePolicy::Both, excluded(&["9"]));
        let mut child = in_categories(&["9"]);
        child.name = Some("garantie".to_string());
        child.parent_item_index = Some(0);
        assert!(!classifier.is_guarantee(&child));
    }

    #[test]
    fn test_empty_exclusion_set_keeps_everything() {
        let classifier = GuaranteeClassifier::default();
        assert!(!classifier.is_guarantee(&in_categories(&["9"])));
    }

    #[test]
    fn test_partition_preserves_order() {
        let classifier = GuaranteeClassifier::new(GuaranteePolicy::NamePattern, HashSet::new());
        let items = vec![named("Bere"), named("garantie doza"), named("Suc")];
        let (kept, deposits) = classifier.partition(items);
        let names: Vec<_> = kept.iter().filter_map(|i| i.name.as_deref()).collect();
        assert_eq!(names, ["Bere", "Suc"]);
        assert_eq!(deposits.len(), 1);
    }
}
