//! Case-insensitive substring filter over clash titles and descriptions.

use crate::types::Clash;

/// Trim and lowercase a search term. `None` means "no filter".
pub fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Whether `clash` matches an already normalized needle.
pub fn matches(clash: &Clash, needle: &str) -> bool {
    field_contains(clash.title.as_deref(), needle)
        || field_contains(clash.description.as_deref(), needle)
}

fn field_contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}

/// Keep the clashes whose title or description contains `term`.
///
/// An empty or whitespace-only term returns the list untouched, in backend
/// order.
pub fn filter_clashes(clashes: Vec<Clash>, term: &str) -> Vec<Clash> {
    match normalize_term(term) {
        None => clashes,
        Some(needle) => clashes
            .into_iter()
            .filter(|clash| matches(clash, &needle))
            .collect(),
    }
}
