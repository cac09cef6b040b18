//! Polymorphic field values for dynamic field access
//!
//! Resources expose selected fields by name (see [`crate::core::Queryable`])
//! so that server-side filter parameters and client-side joins can work
//! without knowing the concrete entity type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float if possible (integers are widened)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Compare against a raw query-string value (e.g. `?countryId=<uuid>`)
    ///
    /// The query side is always a string; the typed side decides how to
    /// interpret it. A null value never matches anything.
    pub fn matches_query(&self, query: &str) -> bool {
        match self {
            FieldValue::String(s) => s == query,
            FieldValue::Integer(i) => query.parse::<i64>().map(|q| q == *i).unwrap_or(false),
            FieldValue::Float(f) => query.parse::<f64>().map(|q| q == *f).unwrap_or(false),
            FieldValue::Boolean(b) => query.parse::<bool>().map(|q| q == *b).unwrap_or(false),
            FieldValue::Uuid(u) => Uuid::parse_str(query).map(|q| q == *u).unwrap_or(false),
            FieldValue::Null => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_integer(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_integer() {
        let value = FieldValue::Integer(42);
        assert_eq!(value.as_integer(), Some(42));
        assert_eq!(value.as_float(), Some(42.0));
        assert_eq!(value.as_string(), None);
    }

    #[test]
    fn test_field_value_null() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert_eq!(value.as_string(), None);
    }

    #[test]
    fn test_matches_query_string() {
        let value = FieldValue::String("Beach".to_string());
        assert!(value.matches_query("Beach"));
        assert!(!value.matches_query("beach"));
    }

    #[test]
    fn test_matches_query_uuid() {
        let id = Uuid::new_v4();
        let value = FieldValue::Uuid(id);
        assert!(value.matches_query(&id.to_string()));
        assert!(!value.matches_query(&Uuid::new_v4().to_string()));
        assert!(!value.matches_query("not-a-uuid"));
    }

    #[test]
    fn test_matches_query_numbers() {
        assert!(FieldValue::Integer(4).matches_query("4"));
        assert!(!FieldValue::Integer(4).matches_query("5"));
        assert!(FieldValue::Float(87.5).matches_query("87.5"));
        assert!(!FieldValue::Float(87.5).matches_query("x"));
    }

    #[test]
    fn test_matches_query_null_never_matches() {
        assert!(!FieldValue::Null.matches_query(""));
        assert!(!FieldValue::Null.matches_query("null"));
    }

    #[test]
    fn test_serde_roundtrip() {
        for original in [
            FieldValue::String("hello".to_string()),
            FieldValue::Integer(7),
            FieldValue::Float(2.5),
            FieldValue::Boolean(true),
            FieldValue::Null,
        ] {
            let json = serde_json::to_string(&original).expect("serialize should succeed");
            let restored: FieldValue =
                serde_json::from_str(&json).expect("deserialize should succeed");
            assert_eq!(original, restored);
        }
    }
}
