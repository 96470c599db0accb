//! The fact record relayed to clients.

use serde::Serialize;

use crate::fact::error::FactError;

/// A single cat fact.
///
/// Built fresh from every upstream response and never mutated afterwards.
/// `length` is whatever upstream reported; it is not checked against `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<i64>,
}

impl Fact {
    /// Create a fact. Fails if `text` is empty.
    pub fn new(text: impl Into<String>, length: Option<i64>) -> Result<Self, FactError> {
        let text = text.into();
        if text.is_empty() {
            return Err(FactError::EmptyText);
        }
        Ok(Self { text, length })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn length(&self) -> Option<i64> {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(Fact::new("", Some(0)), Err(FactError::EmptyText)));
    }

    #[test]
    fn serializes_with_external_field_names() {
        let fact = Fact::new("Cats have five toes on their front paws.", Some(40)).unwrap();
        let json = serde_json::to_value(&fact).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "Cats have five toes on their front paws.", "length": 40})
        );
    }

    #[test]
    fn absent_length_is_omitted() {
        let fact = Fact::new("Cats purr.", None).unwrap();
        assert_eq!(serde_json::to_string(&fact).unwrap(), r#"{"text":"Cats purr."}"#);
    }

    #[test]
    fn inconsistent_length_is_kept() {
        let fact = Fact::new("abc", Some(99)).unwrap();
        assert_eq!(fact.length(), Some(99));
        assert_eq!(Fact::new("abc", Some(-1)).unwrap().length(), Some(-1));
    }
}
