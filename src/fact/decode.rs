//! Decoding upstream payloads into [`Fact`] values.
//!
//! Field names are configurable because upstream schemas differ from the
//! names exposed to clients (`fact` upstream vs `text` downstream).

use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::fact::error::{FactError, FactResult};
use crate::fact::types::Fact;

/// Upstream JSON field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub text: String,
    pub length: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            text: "fact".to_string(),
            length: "length".to_string(),
        }
    }
}

impl From<&UpstreamConfig> for FieldMapping {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            text: config.text_field.clone(),
            length: config.length_field.clone(),
        }
    }
}

impl FieldMapping {
    /// Decode a response body. The text field is required. The length field
    /// is taken as reported when it is an integer and dropped otherwise.
    pub fn decode(&self, body: &[u8]) -> FactResult<Fact> {
        let value: Value = serde_json::from_slice(body).map_err(FactError::Json)?;
        let object = match value {
            Value::Object(map) => map,
            other => return Err(FactError::NotAnObject(json_type(&other))),
        };

        let text = match object.get(&self.text) {
            None | Some(Value::Null) => return Err(FactError::MissingField(self.text.clone())),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(FactError::InvalidField {
                    field: self.text.clone(),
                    expected: "a string",
                })
            }
        };

        let length = object.get(&self.length).and_then(Value::as_i64);

        Fact::new(text, length)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fact::ErrorKind;

    fn decode(body: &str) -> FactResult<Fact> {
        FieldMapping::default().decode(body.as_bytes())
    }

    #[test]
    fn decodes_catfact_ninja_payload() {
        let fact = decode(r#"{"fact":"Cats sleep 70% of their lives.","length":32}"#).unwrap();
        assert_eq!(fact.text(), "Cats sleep 70% of their lives.");
        assert_eq!(fact.length(), Some(32));
    }

    #[test]
    fn text_is_not_transformed() {
        let raw = "  Ünïcode cats \u{1F431}\n";
        let body = serde_json::json!({ "fact": raw }).to_string();
        assert_eq!(decode(&body).unwrap().text(), raw);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let fact = decode(r#"{"fact":"Cats purr.","length":10,"source":"x"}"#).unwrap();
        assert_eq!(fact.text(), "Cats purr.");
    }

    #[test]
    fn missing_or_null_length_is_none() {
        assert_eq!(decode(r#"{"fact":"a"}"#).unwrap().length(), None);
        assert_eq!(decode(r#"{"fact":"a","length":null}"#).unwrap().length(), None);
    }

    #[test]
    fn odd_lengths_never_fail_the_fetch() {
        assert_eq!(decode(r#"{"fact":"Cats purr.","length":-1}"#).unwrap().length(), Some(-1));
        for body in [
            r#"{"fact":"Cats purr.","length":10.0}"#,
            r#"{"fact":"Cats purr.","length":"10"}"#,
            r#"{"fact":"Cats purr.","length":[10]}"#,
            r#"{"fact":"Cats purr.","length":18446744073709551615}"#,
        ] {
            let fact = decode(body).unwrap();
            assert_eq!(fact.text(), "Cats purr.");
            assert_eq!(fact.length(), None, "body {body:?}");
        }
    }

    #[test]
    fn malformed_bodies_are_decode_errors() {
        for body in [
            "not json",
            "",
            "[1,2]",
            r#"{"length":3}"#,
            r#"{"fact":null}"#,
            r#"{"fact":7}"#,
            r#"{"fact":""}"#,
        ] {
            let err = decode(body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Decode, "body {body:?} gave {err}");
        }
    }

    #[test]
    fn specific_variants() {
        assert!(matches!(decode("not json"), Err(FactError::Json(_))));
        assert!(matches!(decode("[]"), Err(FactError::NotAnObject("an array"))));
        assert!(matches!(decode("{}"), Err(FactError::MissingField(f)) if f == "fact"));
    }

    #[test]
    fn custom_field_names() {
        let mapping = FieldMapping {
            text: "text".into(),
            length: "len".into(),
        };
        let fact = mapping.decode(br#"{"text":"Cats purr.","len":10}"#).unwrap();
        assert_eq!(fact.text(), "Cats purr.");
        assert_eq!(fact.length(), Some(10));

        assert!(matches!(
            mapping.decode(br#"{"fact":"Cats purr."}"#),
            Err(FactError::MissingField(f)) if f == "text"
        ));
    }
}
