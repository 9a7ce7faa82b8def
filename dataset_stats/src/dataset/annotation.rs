use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Kind of an annotation attached to a dataset item.
#[derive(
    Debug,
    Display,
    EnumIter,
    EnumString,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnnotationType {
    Label,
    Mask,
    Points,
    Polygon,
    Polyline,
    Bbox,
    Caption,
    #[serde(rename = "cuboid_3d")]
    #[strum(serialize = "cuboid_3d")]
    Cuboid3d,
}

/// Attribute value of an annotation.
///
/// Every variant has a string form (see the `Display` impl), which is what
/// attribute tallies are keyed by. Booleans print as `True`/`False` so keys
/// line up with reports written by earlier tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(true) => f.write_str("True"),
            AttributeValue::Bool(false) => f.write_str("False"),
            AttributeValue::Int(v) => write!(f, "{}", v),
            // Debug keeps the fractional part of integral floats ("2.0").
            AttributeValue::Float(v) => write!(f, "{:?}", v),
            AttributeValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: AnnotationType,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Annotation {
    pub fn new(kind: AnnotationType) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }
}
