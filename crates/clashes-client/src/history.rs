//! `?q=` mirror of the search term, with back/forward navigation.

use url::form_urlencoded;

use clashes_shared::constants::{CLASHES_PATH, SHAREABLE_QUERY_PARAM};

/// Browser-style history of search terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self::starting_at(String::new())
    }

    /// History whose first entry is the term found in `query`.
    pub fn from_query(query: &str) -> Self {
        Self::starting_at(term_from_query(query))
    }

    fn starting_at(term: String) -> Self {
        Self {
            entries: vec![term],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Record a new term. Forward entries are discarded. Returns `false` if
    /// the term equals the current entry.
    pub fn push(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term == self.current() {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(term.to_string());
        self.cursor += 1;
        true
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Shareable location for the current entry.
    pub fn location(&self) -> String {
        location_for(self.current())
    }
}

impl Default for QueryHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// `/clashes` for an empty term, `/clashes?q=<term>` otherwise.
pub fn location_for(term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        return CLASHES_PATH.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(SHAREABLE_QUERY_PARAM, term)
        .finish();
    format!("{CLASHES_PATH}?{query}")
}

/// Extract the `q` parameter from a query string (with or without `?`).
pub fn term_from_query(query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SHAREABLE_QUERY_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}
