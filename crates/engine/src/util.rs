//! Internal helpers for text matching.
//!
//! These utilities are **not** part of the public API.

use unicode_normalization::UnicodeNormalization;

/// Case and compatibility folded form used by filters and text sorting.
pub(crate) fn fold_text(value: &str) -> String {
    value.nfkc().flat_map(char::to_lowercase).collect()
}

/// Pattern folded once, matched against many cells.
#[derive(Clone, Debug)]
pub(crate) struct Needle(String);

impl Needle {
    /// Returns `None` for an empty pattern, which matches everything.
    pub(crate) fn new(pattern: &str) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }
        Some(Self(fold_text(pattern)))
    }

    pub(crate) fn found_in(&self, haystack: &str) -> bool {
        fold_text(haystack).contains(&self.0)
    }
}
