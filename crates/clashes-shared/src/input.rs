//! Create-clash form input and its validation rules.

use serde::{Deserialize, Serialize};

use crate::constants::{DESCRIPTION_MIN_CHARS, TITLE_MAX_CHARS};
use crate::error::FieldErrors;

/// Raw values as submitted by the create form.
///
/// Kept around after a failed submission so the form can be re-rendered
/// with what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateClashForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub address: String,
    pub date: String,
    pub picture_url: String,
    /// Comma-separated peer ids.
    pub participant_ids: String,
    pub created_by_peer_id: String,
}

/// Validated input sent as `createClashInput` to the mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClashInput {
    pub title: String,
    pub description: String,
    pub location: String,
    pub address: String,
    pub date: String,
    pub picture_url: String,
    pub participant_ids: Vec<String>,
    pub created_by_peer_id: String,
}

impl CreateClashForm {
    /// Check every rule and collect all failures, keyed by field.
    ///
    /// Title and description lengths count the raw characters as typed and
    /// are sent unchanged. The remaining fields are trimmed.
    pub fn validate(&self) -> Result<CreateClashInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = self.title.as_str();
        let title_len = title.chars().count();
        if title_len == 0 {
            errors.push("title", "Title is required");
        } else if title_len > TITLE_MAX_CHARS {
            errors.push(
                "title",
                format!("Title must be at most {TITLE_MAX_CHARS} characters"),
            );
        }

        let description = self.description.as_str();
        if description.chars().count() < DESCRIPTION_MIN_CHARS {
            errors.push(
                "description",
                format!("Description must be at least {DESCRIPTION_MIN_CHARS} characters"),
            );
        }

        let location = self.location.trim();
        if location.is_empty() {
            errors.push("location", "Location is required");
        }

        let address = self.address.trim();
        if address.is_empty() {
            errors.push("address", "Address is required");
        }

        let date = self.date.trim();
        if date.is_empty() {
            errors.push("date", "Date is required");
        }

        let picture_url = self.picture_url.trim();
        if url::Url::parse(picture_url).is_err() {
            errors.push("pictureUrl", "Picture URL must be a valid URL");
        }

        let created_by_peer_id = self.created_by_peer_id.trim();
        if created_by_peer_id.is_empty() {
            errors.push("createdByPeerId", "Creator peer id is required");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateClashInput {
            title: title.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            address: address.to_string(),
            date: date.to_string(),
            picture_url: picture_url.to_string(),
            participant_ids: parse_participant_ids(&self.participant_ids),
            created_by_peer_id: created_by_peer_id.to_string(),
        })
    }
}

/// Split a comma-separated id list, trimming entries and dropping empty and
/// repeated ones. First occurrence order is kept.
pub fn parse_participant_ids(raw: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CreateClashForm {
        CreateClashForm {
            title: "Party".into(),
            description: "A long enough description".into(),
            location: "Paris".into(),
            address: "10 rue Oberkampf".into(),
            date: "2024-06-01T20:00".into(),
            picture_url: "https://example.com/party.jpg".into(),
            participant_ids: String::new(),
            created_by_peer_id: "peer-1".into(),
        }
    }

    #[test]
    fn test_valid_minimal_input() {
        let input = valid_form().validate().unwrap();
        assert_eq!(input.title, "Party");
        assert!(input.participant_ids.is_empty());
    }

    #[test]
    fn test_empty_title_rejected() {
        let form = CreateClashForm {
            title: String::new(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["title"]);
    }

    #[test]
    fn test_lengths_count_untrimmed_characters() {
        let form = CreateClashForm {
            title: "  Party  ".into(),
            description: "         x".into(),
            location: "  Paris ".into(),
            ..valid_form()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.title, "  Party  ");
        assert_eq!(input.description, "         x");
        assert_eq!(input.location, "Paris");

        let padded_title = CreateClashForm {
            title: format!(" {}", "x".repeat(100)),
            ..valid_form()
        };
        assert!(padded_title.validate().unwrap_err().contains("title"));
    }

    #[test]
    fn test_whitespace_location_rejected() {
        let form = CreateClashForm {
            location: "   ".into(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().contains("location"));
    }

    #[test]
    fn test_title_length_limit() {
        let ok = CreateClashForm {
            title: "x".repeat(100),
            ..valid_form()
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateClashForm {
            title: "x".repeat(101),
            ..valid_form()
        };
        assert!(too_long.validate().unwrap_err().contains("title"));
    }

    #[test]
    fn test_description_minimum() {
        let short = CreateClashForm {
            description: "123456789".into(),
            ..valid_form()
        };
        assert!(short.validate().unwrap_err().contains("description"));

        let exact = CreateClashForm {
            description: "1234567890".into(),
            ..valid_form()
        };
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn test_picture_url_must_parse() {
        let form = CreateClashForm {
            picture_url: "not-a-url".into(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().contains("pictureUrl"));
    }

    #[test]
    fn test_all_errors_reported_together() {
        let errors = CreateClashForm::default().validate().unwrap_err();
        for field in [
            "title",
            "description",
            "location",
            "address",
            "date",
            "pictureUrl",
            "createdByPeerId",
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains("participantIds"));
    }

    #[test]
    fn test_participant_ids_parsing() {
        assert_eq!(parse_participant_ids(""), Vec::<String>::new());
        assert_eq!(parse_participant_ids(" , ,"), Vec::<String>::new());
        assert_eq!(
            parse_participant_ids(" a, b ,,c, a"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_input_serializes_for_graphql() {
        let form = CreateClashForm {
            participant_ids: "p2,p3".into(),
            ..valid_form()
        };
        let value = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(value["participantIds"], serde_json::json!(["p2", "p3"]));
        assert_eq!(value["createdByPeerId"], "peer-1");
        assert_eq!(value["pictureUrl"], "https://example.com/party.jpg");
    }
}
