use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::REFERENCES_META_ID;
use crate::error::WikiGateError;

/// A metadata entry as submitted. The value is untyped on the wire and is
/// resolved into a [`MetaValue`] by [`MetadataEntry::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetadataEntry {
    pub id: String,
    #[serde(default)]
    pub value: Value,
}

impl MetadataEntry {
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Resolve the untyped value according to the entry id.
    pub fn resolve(&self) -> Result<MetaValue, WikiGateError> {
        if self.id == REFERENCES_META_ID {
            return parse_references(&self.value).map(MetaValue::References);
        }

        match &self.value {
            Value::String(s) => Ok(MetaValue::Text(s.clone())),
            Value::Null => Ok(MetaValue::Text(String::new())),
            Value::Bool(_) | Value::Number(_) => Ok(MetaValue::Text(self.value.to_string())),
            Value::Array(_) | Value::Object(_) => Err(WikiGateError::Metadata(format!(
                "{} must be a plain value",
                self.id
            ))),
        }
    }
}

/// Metadata value resolved by id.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    References(Vec<Reference>),
    Text(String),
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            MetaValue::References(_) => None,
        }
    }

    /// The citations, or none for a text value.
    pub fn into_references(self) -> Vec<Reference> {
        match self {
            MetaValue::References(refs) => refs,
            MetaValue::Text(_) => Vec::new(),
        }
    }

    /// Whether the editor actually filled the field in.
    pub fn is_filled(&self) -> bool {
        match self {
            MetaValue::References(refs) => !refs.is_empty(),
            MetaValue::Text(s) => !s.is_empty(),
        }
    }
}

/// Citation timestamps arrive as epoch millis or as strings depending on the editor version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(f64),
    Text(String),
}

/// A citation stored inside the `references` metadata entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Reference {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Reference {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Decode the `references` value: a JSON-encoded string or an inline array.
/// Null and blank strings mean no citations.
pub fn parse_references(value: &Value) -> Result<Vec<Reference>, WikiGateError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::String(s) => Ok(serde_json::from_str(s)?),
        Value::Array(_) => Ok(serde_json::from_value(value.clone())?),
        other => Err(WikiGateError::Metadata(format!(
            "references must be a JSON array, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn references_decode_from_encoded_string() {
        let value = json!(r#"[{"id":"1","description":"Event Link","timestamp":1700000000000,"url":"https://x.io"}]"#);
        let refs = parse_references(&value).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].description(), "Event Link");
        assert_eq!(refs[0].timestamp, Some(Timestamp::Millis(1_700_000_000_000.0)));
    }

    #[test]
    fn references_tolerate_missing_fields() {
        let refs = parse_references(&json!(r#"[{"description":"x"},{}]"#)).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].description(), "");
    }

    #[test]
    fn references_decode_from_inline_array() {
        let refs = parse_references(&json!([{"url": "https://a.io", "timestamp": "2024-01-01"}])).unwrap();
        assert_eq!(refs[0].timestamp, Some(Timestamp::Text("2024-01-01".into())));
    }

    #[test]
    fn blank_and_null_references_are_empty() {
        assert!(parse_references(&Value::Null).unwrap().is_empty());
        assert!(parse_references(&json!("   ")).unwrap().is_empty());
    }

    #[test]
    fn malformed_references_are_errors() {
        assert!(parse_references(&json!("not json")).is_err());
        assert!(parse_references(&json!({"description": "x"})).is_err());
    }

    #[test]
    fn resolve_dispatches_on_id() {
        let refs = MetadataEntry::new("references", "[]").resolve().unwrap();
        assert_eq!(refs, MetaValue::References(vec![]));

        let site = MetadataEntry::new("website", "https://x.io").resolve().unwrap();
        assert_eq!(site, MetaValue::Text("https://x.io".into()));

        let count = MetadataEntry::new("words-changed", 42).resolve().unwrap();
        assert_eq!(count, MetaValue::Text("42".into()));

        assert!(MetadataEntry::new("website", json!({"a": 1})).resolve().is_err());
    }

    #[test]
    fn filled_values() {
        let filled = |id: &str, value: Value| MetadataEntry::new(id, value).resolve().unwrap().is_filled();
        assert!(!filled("website", json!("")));
        assert!(!filled("website", Value::Null));
        assert!(filled("website", json!("x")));
        assert!(filled("words-changed", json!(0)));
        assert!(!filled("references", json!([])));
        assert!(!filled("references", json!("  ")));
        assert!(filled("references", json!([{"description": "x"}])));
    }

    #[test]
    fn text_accessors() {
        let site = MetadataEntry::new("website", "https://x.io").resolve().unwrap();
        assert_eq!(site.as_text(), Some("https://x.io"));
        assert!(site.into_references().is_empty());

        let refs = MetadataEntry::new("references", r#"[{"url":"https://a.io"}]"#)
            .resolve()
            .unwrap();
        assert_eq!(refs.as_text(), None);
        assert_eq!(refs.into_references()[0].url.as_deref(), Some("https://a.io"));
    }
}
