//! Flat records - the unit of data exchanged across the adapter boundary
//!
//! Every source adapter normalizes its API's response into flat records:
//! mappings from field name to a scalar value, never nested. Downstream
//! comparison and formatting assume scalar values, so nesting is rejected
//! at the conversion boundary rather than tolerated and flattened later.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Error converting external data into a flat record
#[derive(Debug, Error)]
pub enum RecordError {
    /// A field held an array or object; flat records hold scalars only
    #[error("nested value at field '{0}': flat records hold scalars only")]
    Nested(String),

    /// The top-level JSON value was not an object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// A single scalar value within a flat record
///
/// The closed set of value shapes a source may report for one field.
/// Keeping this a small sum type (rather than a fully dynamic value) keeps
/// corroboration and conflict comparisons type-safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Text value
    Str(String),
    /// Numeric value (integers widen to f64)
    Num(f64),
    /// Boolean value
    Bool(bool),
    /// Explicit null reported by the source
    Null,
}

impl Scalar {
    /// Whether this value is the explicit null
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Borrow the text value, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether this value carries displayable content
    ///
    /// Null and empty/whitespace-only strings do not.
    pub fn has_content(&self) -> bool {
        match self {
            Scalar::Str(s) => !s.trim().is_empty(),
            Scalar::Null => false,
            _ => true,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => write!(f, "{}", s),
            Scalar::Num(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null => write!(f, "null"),
        }
    }
}

impl TryFrom<serde_json::Value> for Scalar {
    type Error = RecordError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(s) => Ok(Scalar::Str(s)),
            serde_json::Value::Number(n) => {
                // Arbitrary-precision integers outside f64 range are not
                // expected from the upstream APIs; widen lossily.
                Ok(Scalar::Num(n.as_f64().unwrap_or(f64::NAN)))
            }
            serde_json::Value::Bool(b) => Ok(Scalar::Bool(b)),
            serde_json::Value::Null => Ok(Scalar::Null),
            serde_json::Value::Array(_) => Err(RecordError::Nested("array".to_string())),
            serde_json::Value::Object(_) => Err(RecordError::Nested("object".to_string())),
        }
    }
}

/// A flat key → scalar record
///
/// Field iteration is in sorted key order, which keeps everything derived
/// from record traversal (fallback content extraction, conflict field
/// comparison) deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlatRecord(BTreeMap<String, Scalar>);

impl FlatRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a field, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Scalar) {
        self.0.insert(key.into(), value);
    }

    /// Get a field's value
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key)
    }

    /// Get a field rendered as display text, if it carries content
    ///
    /// Returns `None` for absent fields, nulls, and empty strings, so a
    /// field-priority search can fall through to the next candidate.
    pub fn display_field(&self, key: &str) -> Option<String> {
        let value = self.0.get(key)?;
        if value.has_content() {
            Some(value.to_string())
        } else {
            None
        }
    }

    /// Iterate fields in sorted key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Scalar)> {
        self.0.iter()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a record from a JSON object, rejecting nested values
    pub fn from_json(value: serde_json::Value) -> Result<Self, RecordError> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Array(_) => return Err(RecordError::NotAnObject("array")),
            serde_json::Value::String(_) => return Err(RecordError::NotAnObject("string")),
            serde_json::Value::Number(_) => return Err(RecordError::NotAnObject("number")),
            serde_json::Value::Bool(_) => return Err(RecordError::NotAnObject("boolean")),
            serde_json::Value::Null => return Err(RecordError::NotAnObject("null")),
        };

        let mut record = FlatRecord::new();
        for (key, value) in map {
            match Scalar::try_from(value) {
                Ok(scalar) => record.insert(key, scalar),
                Err(_) => return Err(RecordError::Nested(key)),
            }
        }
        Ok(record)
    }
}

impl FromIterator<(String, Scalar)> for FlatRecord {
    fn from_iter<T: IntoIterator<Item = (String, Scalar)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Str("hello".to_string()).to_string(), "hello");
        assert_eq!(Scalar::Num(42.0).to_string(), "42");
        assert_eq!(Scalar::Num(0.5).to_string(), "0.5");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Null.to_string(), "null");
    }

    #[test]
    fn test_scalar_content() {
        assert!(Scalar::Str("x".to_string()).has_content());
        assert!(Scalar::Num(0.0).has_content());
        assert!(Scalar::Bool(false).has_content());
        assert!(!Scalar::Str("   ".to_string()).has_content());
        assert!(!Scalar::Null.has_content());
    }

    #[test]
    fn test_display_field_falls_through_empty() {
        let mut record = FlatRecord::new();
        record.insert("title", Scalar::Str("".to_string()));
        record.insert("name", Scalar::Str("Aurora".to_string()));

        assert_eq!(record.display_field("title"), None);
        assert_eq!(record.display_field("name"), Some("Aurora".to_string()));
        assert_eq!(record.display_field("missing"), None);
    }

    #[test]
    fn test_from_json_object() {
        let record = FlatRecord::from_json(json!({
            "name": "Aurora",
            "imo": 9321483,
            "sanctioned": true,
            "flag": null,
        }))
        .unwrap();

        assert_eq!(record.len(), 4);
        assert_eq!(record.get("name"), Some(&Scalar::Str("Aurora".to_string())));
        assert_eq!(record.get("imo"), Some(&Scalar::Num(9321483.0)));
        assert_eq!(record.get("sanctioned"), Some(&Scalar::Bool(true)));
        assert_eq!(record.get("flag"), Some(&Scalar::Null));
    }

    #[test]
    fn test_from_json_rejects_nesting() {
        let result = FlatRecord::from_json(json!({
            "name": "Aurora",
            "owners": ["a", "b"],
        }));

        assert!(matches!(result, Err(RecordError::Nested(field)) if field == "owners"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            FlatRecord::from_json(json!([1, 2])),
            Err(RecordError::NotAnObject("array"))
        ));
        assert!(matches!(
            FlatRecord::from_json(json!("text")),
            Err(RecordError::NotAnObject("string"))
        ));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut record = FlatRecord::new();
        record.insert("zeta", Scalar::Num(1.0));
        record.insert("alpha", Scalar::Num(2.0));
        record.insert("mid", Scalar::Num(3.0));

        let keys: Vec<&str> = record.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }
}
