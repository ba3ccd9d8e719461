//! Values documents and the data handed to templates.
//!
//! A values document is YAML (or JSON) whose top level is a mapping. It is
//! converted into a closed [`Value`] tree so templates never see
//! format-specific types.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning a values document into a [`ValuesMap`].
#[derive(Debug, Error)]
pub enum ValuesError {
    /// The document is not well-formed YAML.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// The document is not well-formed JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The top level is a scalar or sequence.
    #[error("top level of values document must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    /// A mapping key is itself a sequence or mapping.
    #[error("mapping keys must be scalars, found {found}")]
    UnsupportedKey { found: &'static str },
}

/// A single deserialized value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `null`, `~` or an empty scalar.
    Null,
    Bool(bool),
    /// Integers that fit in `i64`.
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
    /// An ordered list.
    Sequence(Vec<Value>),
    /// A nested mapping with stringified keys.
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// Human-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::Unsigned(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = ValuesError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value as Yaml;

        Ok(match value {
            Yaml::Null => Self::Null,
            Yaml::Bool(b) => Self::Bool(b),
            Yaml::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Integer(i),
                (None, Some(u)) => Self::Unsigned(u),
                (None, None) => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Yaml::String(s) => Self::String(s),
            Yaml::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Yaml::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| -> Result<_, ValuesError> {
                        Ok((yaml_key(k)?, Self::try_from(v)?))
                    })
                    .collect::<Result<_, _>>()?,
            ),
            Yaml::Tagged(tagged) => {
                let serde_yaml::value::TaggedValue { value, .. } = *tagged;
                Self::try_from(value)?
            }
        })
    }
}

/// Scalar keys are stringified; templates look keys up by name.
fn yaml_key(key: serde_yaml::Value) -> Result<String, ValuesError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Tagged(tagged) => {
            let serde_yaml::value::TaggedValue { value, .. } = *tagged;
            yaml_key(value)
        }
        other => Err(ValuesError::UnsupportedKey {
            found: Value::try_from(other).map(|v| v.kind()).unwrap_or("mapping"),
        }),
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Integer(i),
                (None, Some(u)) => Self::Unsigned(u),
                (None, None) => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Key-value data supplied as a template's execution context.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValuesMap(BTreeMap<String, Value>);

impl ValuesMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document.
    ///
    /// Only the first document of a multi-document stream is used. Merge
    /// keys (`<<: *anchor`) are resolved.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ValuesError> {
        if contents.trim().is_empty() {
            return Ok(Self::new());
        }
        let Some(first) = serde_yaml::Deserializer::from_str(contents).next() else {
            return Ok(Self::new());
        };
        let mut document = serde_yaml::Value::deserialize(first)?;
        document.apply_merge()?;
        Self::from_document(Value::try_from(document)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(contents: &str) -> Result<Self, ValuesError> {
        if contents.trim().is_empty() {
            return Ok(Self::new());
        }
        let document: serde_json::Value = serde_json::from_str(contents)?;
        Self::from_document(Value::from(document))
    }

    fn from_document(document: Value) -> Result<Self, ValuesError> {
        match document {
            Value::Mapping(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(ValuesError::NotAMapping {
                found: other.kind(),
            }),
        }
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a top-level key, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValuesMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Syntax of a values document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuesFormat {
    /// YAML 1.1/1.2 (the default).
    #[default]
    Yaml,
    /// JSON.
    Json,
}

impl ValuesFormat {
    /// Pick a format from the file extension; anything but `.json` is YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Parse `contents` in this format.
    pub fn parse(self, contents: &str) -> Result<ValuesMap, ValuesError> {
        match self {
            Self::Yaml => ValuesMap::from_yaml_str(contents),
            Self::Json => ValuesMap::from_json_str(contents),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_mapping_with_nested_values() {
        let values = ValuesMap::from_yaml_str(
            r#"
name: Alice
age: 42
ratio: 0.5
active: true
nothing: ~
items: [a, b, c]
owner:
  team: platform
"#,
        )
        .unwrap();

        assert_eq!(values.len(), 7);
        assert_eq!(values.get("name"), Some(&Value::from("Alice")));
        assert_eq!(values.get("age"), Some(&Value::Integer(42)));
        assert_eq!(values.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(values.get("active"), Some(&Value::Bool(true)));
        assert_eq!(values.get("nothing"), Some(&Value::Null));
        assert_eq!(values.get("items"), Some(&Value::from(vec!["a", "b", "c"])));

        match values.get("owner") {
            Some(Value::Mapping(owner)) => {
                assert_eq!(owner.get("team").and_then(Value::as_str), Some("platform"));
            }
            other => panic!("Expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let err = ValuesMap::from_yaml_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ValuesError::NotAMapping { found: "sequence" }));

        let err = ValuesMap::from_yaml_str("just a string").unwrap_err();
        assert!(matches!(err, ValuesError::NotAMapping { found: "string" }));

        let err = ValuesMap::from_json_str("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("must be a mapping"));
    }

    #[test]
    fn test_empty_document_is_empty_map() {
        assert!(ValuesMap::from_yaml_str("").unwrap().is_empty());
        assert!(ValuesMap::from_yaml_str("  \n").unwrap().is_empty());
        assert!(ValuesMap::from_yaml_str("~").unwrap().is_empty());
        assert!(ValuesMap::from_json_str("null").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let err = ValuesMap::from_yaml_str("items: [a, b\nname: x").unwrap_err();
        assert!(matches!(err, ValuesError::Yaml(_)));
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let values = ValuesMap::from_yaml_str("1: one\ntrue: yes\n").unwrap();
        assert_eq!(values.get("1"), Some(&Value::from("one")));
        assert!(values.get("true").is_some());
    }

    #[test]
    fn test_sequence_keys_are_rejected() {
        let err = ValuesMap::from_yaml_str("? [a, b]\n: value\n").unwrap_err();
        assert!(matches!(err, ValuesError::UnsupportedKey { found: "sequence" }));
    }

    #[test]
    fn test_tags_are_stripped() {
        let values = ValuesMap::from_yaml_str("port: !custom 8080\n").unwrap();
        assert_eq!(values.get("port"), Some(&Value::Integer(8080)));
    }

    #[test]
    fn test_json_document() {
        let values =
            ValuesMap::from_json_str(r#"{"name": "Bob", "tags": ["x", 2, false]}"#).unwrap();
        assert_eq!(values.get("name"), Some(&Value::from("Bob")));
        assert_eq!(
            values.get("tags"),
            Some(&Value::Sequence(vec![
                Value::from("x"),
                Value::Integer(2),
                Value::Bool(false),
            ]))
        );
    }

    #[test]
    fn test_serializes_as_plain_data() {
        let values: ValuesMap = [("name", Value::from("Alice")), ("n", Value::Integer(3))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"n":3,"name":"Alice"}"#);
    }

    #[test]
    fn test_merge_keys_are_resolved() {
        let values =
            ValuesMap::from_yaml_str("base: &b\n  x: 1\nchild:\n  <<: *b\n  y: 2\n").unwrap();

        match values.get("child") {
            Some(Value::Mapping(child)) => {
                assert_eq!(child.get("x"), Some(&Value::Integer(1)));
                assert_eq!(child.get("y"), Some(&Value::Integer(2)));
                assert!(child.get("<<").is_none());
            }
            other => panic!("Expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_large_integers_keep_precision() {
        let values = ValuesMap::from_yaml_str("n: 18446744073709551615\n").unwrap();
        assert_eq!(values.get("n"), Some(&Value::Unsigned(u64::MAX)));

        let values = ValuesMap::from_json_str(r#"{"n": 18446744073709551615}"#).unwrap();
        assert_eq!(values.get("n"), Some(&Value::Unsigned(u64::MAX)));
        assert_eq!(
            serde_json::to_string(&values).unwrap(),
            r#"{"n":18446744073709551615}"#
        );
    }

    #[test]
    fn test_first_yaml_document_is_used() {
        let values = ValuesMap::from_yaml_str("a: 1\n---\nb: 2\n").unwrap();
        assert_eq!(values.get("a"), Some(&Value::Integer(1)));
        assert!(values.get("b").is_none());
    }

    #[test]
    fn test_parse_error_is_not_repeated_in_source_chain() {
        use std::error::Error;

        let err = ValuesMap::from_yaml_str("items: [a, b\nname: x").unwrap_err();
        let inner = err.source().map(|s| s.to_string());
        assert_ne!(inner.as_deref(), Some(err.to_string().as_str()));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ValuesFormat::from_path("values.json"), ValuesFormat::Json);
        assert_eq!(ValuesFormat::from_path("VALUES.JSON"), ValuesFormat::Json);
        assert_eq!(ValuesFormat::from_path("values.yaml"), ValuesFormat::Yaml);
        assert_eq!(ValuesFormat::from_path("values.yml"), ValuesFormat::Yaml);
        assert_eq!(ValuesFormat::from_path("values"), ValuesFormat::Yaml);
    }
}
