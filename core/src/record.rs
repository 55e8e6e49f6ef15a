//! Raw records: untyped field mappings as decoded from a source.
//!
//! A raw record only lives between reading and conversion. Values are
//! integers or text, which is what the flat JSON sources contain; decimals
//! travel as text (`"1500.00"`) so they are never routed through a float.
//! Any other JSON value (floats, `null`, booleans, integers beyond `i64`,
//! arrays, objects) is kept as [`FieldValue::Other`] so that only the record
//! holding it is rejected, never the whole source.

use crate::error::FieldError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A single field value of a raw record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integral JSON number
    Integer(i64),
    /// JSON string
    Text(String),
    /// Any other JSON value; every accessor and rule refuses it
    Other(serde_json::Value),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "\"{value}\""),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Text(value.to_string())
    }
}

/// Untyped mapping of field name to value
///
/// Field order is kept sorted so that written records and log output are
/// stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(BTreeMap<String, FieldValue>);

impl RawRecord {
    /// Creates an empty record
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts or replaces a field
    pub fn insert(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.0.insert(field.to_string(), value.into());
    }

    /// Removes a field, returning its previous value
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.0.remove(field)
    }

    /// Raw access to a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Whether the field is present
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    fn require(&self, field: &str) -> Result<&FieldValue, FieldError> {
        self.0
            .get(field)
            .ok_or_else(|| FieldError::Missing(field.to_string()))
    }

    /// Reads a text field
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Missing`] if absent and [`FieldError::WrongType`]
    /// if the value is not text.
    pub fn text(&self, field: &str) -> Result<&str, FieldError> {
        match self.require(field)? {
            FieldValue::Text(value) => Ok(value),
            FieldValue::Integer(_) | FieldValue::Other(_) => Err(FieldError::WrongType {
                field: field.to_string(),
                expected: "a string",
            }),
        }
    }

    /// Reads an integer field, accepting integer text such as `"101"`
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Missing`] if absent,
    /// [`FieldError::Unparsable`] if text does not hold an integer and
    /// [`FieldError::WrongType`] for any other value.
    pub fn integer(&self, field: &str) -> Result<i64, FieldError> {
        match self.require(field)? {
            FieldValue::Integer(value) => Ok(*value),
            FieldValue::Text(value) => {
                value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| FieldError::Unparsable {
                        field: field.to_string(),
                        value: value.clone(),
                    })
            },
            FieldValue::Other(_) => Err(FieldError::WrongType {
                field: field.to_string(),
                expected: "an integer",
            }),
        }
    }

    /// Reads an exact decimal field, accepting integers as whole amounts
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Missing`] if absent,
    /// [`FieldError::Unparsable`] if text does not hold a decimal and
    /// [`FieldError::WrongType`] for any other value. Floats are refused
    /// rather than rounded.
    pub fn decimal(&self, field: &str) -> Result<Decimal, FieldError> {
        match self.require(field)? {
            FieldValue::Integer(value) => Ok(Decimal::from(*value)),
            FieldValue::Text(value) => {
                Decimal::from_str(value.trim()).map_err(|_| FieldError::Unparsable {
                    field: field.to_string(),
                    value: value.clone(),
                })
            },
            FieldValue::Other(_) => Err(FieldError::WrongType {
                field: field.to_string(),
                expected: "a decimal string or an integer",
            }),
        }
    }
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{name}\": {value}")?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
