//! The configuration document stored in profiles and in the active config file
//!
//! A [`Config`] is an opaque JSON object. The only field this crate knows about
//! is [`SCHEMA_FIELD`], which editors and generators rewrite freely and which
//! is therefore excluded when deciding whether two documents are the same.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Volatile metadata field ignored by [`Config::normalized`]
pub const SCHEMA_FIELD: &str = "$schema";

/// A configuration document (top-level JSON object)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(Map<String, Value>);

impl Config {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from JSON text
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Parse a document from raw bytes
    pub fn from_json_slice(content: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(content)
    }

    /// Value of the `$schema` field, if present and a string
    pub fn schema(&self) -> Option<&str> {
        self.0.get(SCHEMA_FIELD).and_then(Value::as_str)
    }

    /// Set the `$schema` field
    pub fn set_schema(&mut self, schema: impl Into<String>) {
        self.0
            .insert(SCHEMA_FIELD.to_string(), Value::String(schema.into()));
    }

    /// Remove the `$schema` field, returning its previous value
    pub fn remove_schema(&mut self) -> Option<Value> {
        self.0.remove(SCHEMA_FIELD)
    }

    /// Top-level field lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a top-level field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Whether the document has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into a [`serde_json::Value`]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Canonical bytes of this document without the `$schema` field
    ///
    /// `serde_json::Map` keeps keys sorted, so the compact serialization is
    /// independent of the key order in the source file.
    pub fn normalized(&self) -> serde_json::Result<Vec<u8>> {
        let mut map = self.0.clone();
        map.remove(SCHEMA_FIELD);
        serde_json::to_vec(&map)
    }

    /// Logical equality under normalization
    ///
    /// A serialization failure on either side counts as "not equal".
    pub fn same_as(&self, other: &Config) -> bool {
        match (self.normalized(), other.normalized()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Map<String, Value>> for Config {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Config {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Config {
        Config::try_from(value).unwrap()
    }

    #[test]
    fn test_normalization_ignores_schema() {
        let base = doc(json!({"agents": {"oracle": {"model": "gpt-5"}}}));
        let mut with_schema = base.clone();
        with_schema.set_schema("https://example.com/schema.json");
        let mut other_schema = base.clone();
        other_schema.set_schema("./local.schema.json");

        assert_eq!(base.normalized().unwrap(), with_schema.normalized().unwrap());
        assert_eq!(
            with_schema.normalized().unwrap(),
            other_schema.normalized().unwrap()
        );
        assert!(base.same_as(&other_schema));
    }

    #[test]
    fn test_normalization_ignores_non_string_schema() {
        let a = doc(json!({"x": 1, "$schema": 42}));
        let b = doc(json!({"x": 1}));
        assert!(a.same_as(&b));
    }

    #[test]
    fn test_normalization_is_key_order_independent() {
        let a = Config::from_json_str(r#"{"b": 2, "a": 1}"#).unwrap();
        let b = Config::from_json_str(r#"{"a": 1, "b": 2}"#).unwrap();
        assert!(a.same_as(&b));
    }

    #[test]
    fn test_different_content_not_equal() {
        let a = doc(json!({"agents": {"oracle": {"model": "gpt-5"}}}));
        let b = doc(json!({"agents": {"oracle": {"model": "claude"}}}));
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_nested_schema_is_not_volatile() {
        let a = doc(json!({"nested": {"$schema": "a"}}));
        let b = doc(json!({"nested": {"$schema": "b"}}));
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(Config::from_json_str("[1, 2, 3]").is_err());
        assert!(Config::from_json_str("\"text\"").is_err());
        assert!(Config::from_json_str("{}").unwrap().is_empty());
    }

    #[test]
    fn test_schema_accessors() {
        let mut config = Config::new();
        assert_eq!(config.schema(), None);
        config.set_schema("s.json");
        assert_eq!(config.schema(), Some("s.json"));
        assert_eq!(config.remove_schema(), Some(json!("s.json")));
        assert!(config.is_empty());
    }
}
