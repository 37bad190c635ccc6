/// Default quiet period for the debounced search input, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Number of placeholder cards shown while the list is loading.
pub const SKELETON_COUNT: usize = 6;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Minimum description length in characters.
pub const DESCRIPTION_MIN_CHARS: usize = 10;

/// Query-string parameter accepted by `GET /clashes`.
pub const TERM_PARAM: &str = "term";

/// Query-string parameter mirroring the search term in page URLs.
pub const SHAREABLE_QUERY_PARAM: &str = "q";

/// Base path of the clash listing page and REST accessor.
pub const CLASHES_PATH: &str = "/clashes";

/// `error` field of the list failure envelope.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch clashes";

/// Message shown when a create submission fails after validation.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create clash. Please try again.";

/// Fallback when a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Path of the detail page for a clash.
pub fn detail_path(id: &str) -> String {
    format!("{CLASHES_PATH}/{id}")
}
