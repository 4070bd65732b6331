//! Scalar values and projected records.
//!
//! The engine models JSON scalars as a tagged [`Scalar`] variant and emits
//! records as flat maps from destination key to scalar. Only the string case
//! is ever bound by the current projection rules; the other variants exist so
//! that non-string scalars traverse correctly and so that hosts see a typed
//! value rather than a stringly-encoded one.

use std::collections::BTreeMap;

/// A flat record produced by the projection engine.
///
/// Keys are the schema's destination keys; every emitted record carries the
/// complete destination key set.
pub type Record = BTreeMap<String, Scalar>;

/// A JSON scalar value.
///
/// # Examples
///
/// ```
/// use jsonloom::Scalar;
///
/// let s = Scalar::String("hello".to_string());
/// assert_eq!(s.as_str(), Some("hello"));
/// assert_eq!(s.kind(), "string");
/// ```
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(untagged)
)]
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// A JSON `null`.
    Null,
    /// A JSON `true` or `false`.
    Boolean(bool),
    /// A JSON number.
    Number(f64),
    /// A JSON string, fully decoded.
    String(String),
}

impl Scalar {
    /// Returns the string content if this scalar is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Returns `true` if the scalar is a string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// A short label for the scalar's type, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_untagged() {
        let mut record = Record::new();
        record.insert("id".to_string(), Scalar::from("1"));
        record.insert("n".to_string(), Scalar::Number(2.5));
        record.insert("ok".to_string(), Scalar::Boolean(true));
        record.insert("gap".to_string(), Scalar::Null);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"gap":null,"id":"1","n":2.5,"ok":true}"#);
    }
}
