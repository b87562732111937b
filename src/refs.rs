//! Mapping between what the user picks or types and the canonical ref value
//! sent to the backend.

use crate::model::{RefCatalog, RefEntry};

/// Number of characters kept when a ref has no catalog name.
pub const SHORT_REF_LEN: usize = 8;

pub fn resolve_from_catalog(entry: &RefEntry) -> String {
    entry.commit_hash.clone()
}

/// Typed text is trusted as-is; the backend decides whether it names a commit.
pub fn resolve_from_free_text(text: &str) -> String {
    text.trim().to_string()
}

/// Display title for a canonical value.
///
/// Branches are scanned before tags and the first entry whose hash contains
/// the value wins, so a short prefix still finds the full stored hash. Values
/// with no match fall back to [`short_ref`].
pub fn title_for(canonical_value: &str, catalog: &RefCatalog) -> String {
    if canonical_value.is_empty() {
        return String::new();
    }
    catalog
        .branches
        .iter()
        .chain(catalog.tags.iter())
        .find(|e| e.commit_hash.contains(canonical_value))
        .map(|e| e.name.clone())
        .unwrap_or_else(|| short_ref(canonical_value))
}

pub fn short_ref(canonical_value: &str) -> String {
    canonical_value.chars().take(SHORT_REF_LEN).collect()
}

#[cfg(test)]
#[path = "tests/refs_tests.rs"]
mod tests;
