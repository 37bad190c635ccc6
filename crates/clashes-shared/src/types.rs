use serde::{Deserialize, Deserializer, Serialize};

/// Opaque clash identifier, as issued by the GraphQL backend.
pub type ClashId = String;

/// A peer referenced by a clash (organizer or participant).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeerRef {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Read model of a clash.
///
/// Title and description are optional on the wire; a record missing either
/// still deserializes and simply never matches a search on that field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Clash {
    pub id: ClashId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// ISO-like timestamp, kept as the backend sent it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub picture_url: String,
    #[serde(default)]
    pub created_by_peer: Option<PeerRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants: Vec<PeerRef>,
}

impl Clash {
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// GraphQL sends `null` for unset scalars and lists; read it as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of a successful `createClash` mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedClash {
    #[serde(default)]
    pub id: Option<ClashId>,
    #[serde(default)]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "7",
            "title": "Board games",
            "description": "Bring snacks",
            "location": "Lyon",
            "address": "1 rue de la Paix",
            "date": "2024-05-01T18:00:00Z",
            "pictureUrl": "https://example.com/p.png",
            "createdByPeer": {"id": "p1", "name": "Alice"},
            "participants": [{"id": "p2", "name": "Bob"}]
        }"#;
        let clash: Clash = serde_json::from_str(json).unwrap();
        assert_eq!(clash.picture_url, "https://example.com/p.png");
        assert_eq!(clash.created_by_peer.unwrap().name, "Alice");
        assert_eq!(clash.participants.len(), 1);
    }

    #[test]
    fn test_deserialize_missing_optional_fields() {
        let clash: Clash = serde_json::from_str(r#"{"id": "1", "title": null}"#).unwrap();
        assert!(clash.title.is_none());
        assert!(clash.description.is_none());
        assert!(clash.participants.is_empty());
        assert_eq!(clash.title_or_empty(), "");
    }

    #[test]
    fn test_deserialize_explicit_nulls() {
        let json = r#"{
            "id": "9",
            "title": "Picnic",
            "description": null,
            "location": null,
            "address": null,
            "date": null,
            "pictureUrl": null,
            "createdByPeer": {"id": "p1", "name": null},
            "participants": null
        }"#;
        let clash: Clash = serde_json::from_str(json).unwrap();
        assert_eq!(clash.title_or_empty(), "Picnic");
        assert!(clash.description.is_none());
        assert_eq!(clash.location, "");
        assert_eq!(clash.address, "");
        assert_eq!(clash.date, "");
        assert_eq!(clash.picture_url, "");
        assert_eq!(clash.created_by_peer.unwrap().name, "");
        assert!(clash.participants.is_empty());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let clash: Clash = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        let value = serde_json::to_value(&clash).unwrap();
        assert!(value.get("pictureUrl").is_some());
        assert!(value.get("createdByPeer").is_some());
    }
}
