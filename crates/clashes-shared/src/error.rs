use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error taxonomy of the clash pipeline.
///
/// Every variant is caught at the boundary where it originates; none of
/// them is retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClashError {
    /// Malformed create input. No network call was made.
    #[error("Invalid clash input: {0}")]
    Validation(FieldErrors),

    /// Backend or network failure while listing clashes. The cause is
    /// logged where it happened and deliberately not carried here.
    #[error("Failed to fetch clashes")]
    FetchFailed,

    /// The create mutation failed or returned no id.
    #[error("Failed to create clash")]
    MutationFailed,

    #[error("Clash not found: {0}")]
    NotFound(String),
}

/// Validation messages keyed by input field name (camelCase, as on the wire).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "{}", fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_group_by_field() {
        let mut errors = FieldErrors::new();
        errors.push("title", "Title is required");
        errors.push("title", "Another");
        errors.push("date", "Date is required");

        assert_eq!(errors.get("title").unwrap().len(), 2);
        assert!(errors.contains("date"));
        assert!(!errors.contains("address"));
        assert_eq!(errors.to_string(), "date, title");
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let mut errors = FieldErrors::new();
        errors.push("pictureUrl", "Picture URL must be a valid URL");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["pictureUrl"][0], "Picture URL must be a valid URL");
    }

    #[test]
    fn test_fetch_failed_message_is_generic() {
        assert_eq!(ClashError::FetchFailed.to_string(), "Failed to fetch clashes");
    }
}
