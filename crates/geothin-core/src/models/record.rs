use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single attribute cell. Missing cells and JSON `null` are both `Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Label form used for stratification. `None` for `Null`.
    ///
    /// The label carries the value's type, so `1`, `"1"` and `true` never
    /// share a stratum.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(format!("bool:{b}")),
            Self::Number(n) => Some(format!("number:{n}")),
            Self::Text(s) => Some(format!("text:{s}")),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One row of the record table.
///
/// Coordinates are optional here so validation can report missing values;
/// every other column rides along untouched in `attributes` and is re-emitted
/// for survivors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub key: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[serde(default, flatten)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl RecordRow {
    pub fn new(key: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            key: key.into(),
            x: Some(x),
            y: Some(y),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, column: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(column.into(), value.into());
        self
    }

    /// Attribute lookup; an absent column reads as `Null`.
    pub fn attribute(&self, column: &str) -> &AttributeValue {
        self.attributes.get(column).unwrap_or(&AttributeValue::Null)
    }
}

/// One row of the sparse composition table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    pub key: String,
    pub category: String,
    pub weight: Option<f64>,
}

impl CompositionRow {
    pub fn new(key: impl Into<String>, category: impl Into<String>, weight: f64) -> Self {
        Self {
            key: key.into(),
            category: category.into(),
            weight: Some(weight),
        }
    }
}

/// The two input tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThinningInput {
    pub records: Vec<RecordRow>,
    pub compositions: Vec<CompositionRow>,
}
