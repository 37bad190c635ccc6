//! State published by the clash list hook.

use clashes_shared::Clash;

/// Snapshot of the clash list as seen by a renderer.
///
/// A successful load replaces `clashes` wholesale; records are never edited
/// in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClashesState {
    pub clashes: Vec<Clash>,

    /// `true` from the moment a reload starts until its result is applied.
    pub loading: bool,

    /// User-facing message of the last failed load.
    pub error: Option<String>,

    /// Term of the request whose result is currently shown.
    pub term: String,
}

impl ClashesState {
    /// State before the first load: empty and loading.
    pub fn new() -> Self {
        Self {
            clashes: Vec::new(),
            loading: true,
            error: None,
            term: String::new(),
        }
    }
}

impl Default for ClashesState {
    fn default() -> Self {
        Self::new()
    }
}
