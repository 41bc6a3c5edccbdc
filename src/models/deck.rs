//! Deck groups cards under a name
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Deck {
    pub fn new(name: &str, description: &str, now: i64) -> Self {
        Self {
            id: super::new_id(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_creation() {
        let deck = Deck::new("Polish Vocabulary", "", 42);

        assert_eq!(deck.name, "Polish Vocabulary");
        assert!(deck.description.is_empty());
        assert_eq!(deck.created_at, 42);
        assert_eq!(deck.updated_at, 42);
        assert!(!deck.id.is_empty());
    }

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let json = r#"{"id":"d1","name":"Test","createdAt":1,"updatedAt":2}"#;
        let deck: Deck = serde_json::from_str(json).unwrap();
        assert_eq!(deck.description, "");
    }
}
