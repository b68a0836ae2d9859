//! Cell value and kind tags

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Represents the value stored in a cell
///
/// Serialized untagged, so a value reads like plain JSON (`42`, `"Sales"`,
/// `null` for [`CellValue::Empty`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Boolean value
    Boolean(bool),

    /// Numeric value
    Number(f64),

    /// Text value
    Text(String),

    /// Ordered list of values
    Array(Vec<CellValue>),

    /// Keyed record of values
    Object(BTreeMap<String, CellValue>),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Boolean(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
            CellValue::Array(_) => "array",
            CellValue::Object(_) => "object",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            CellValue::Object(_) => match serde_json::to_string(self) {
                Ok(json) => f.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// What a cell holds, independent of the value's data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellContentKind {
    /// A literal value
    #[default]
    Value,
    /// A formula (stored, not evaluated)
    Formula,
    /// An error; the cell carries a [`CellErrorInfo`]
    Error,
    /// An embedded image
    Image,
    /// An embedded chart
    Chart,
    /// In-cell sparklines
    Sparklines,
    /// A host-defined widget
    CustomWidget,
}

impl CellContentKind {
    /// Get the string tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            CellContentKind::Value => "value",
            CellContentKind::Formula => "formula",
            CellContentKind::Error => "error",
            CellContentKind::Image => "image",
            CellContentKind::Chart => "chart",
            CellContentKind::Sparklines => "sparklines",
            CellContentKind::CustomWidget => "custom_widget",
        }
    }
}

impl fmt::Display for CellContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared data type of a cell's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellDataKind {
    Number,
    #[default]
    Text,
    Boolean,
    Date,
    Datetime,
    Currency,
    Percentage,
    Array,
    Object,
    Geospatial,
    MediaReference,
    Custom,
}

impl CellDataKind {
    /// Get the string tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            CellDataKind::Number => "number",
            CellDataKind::Text => "text",
            CellDataKind::Boolean => "boolean",
            CellDataKind::Date => "date",
            CellDataKind::Datetime => "datetime",
            CellDataKind::Currency => "currency",
            CellDataKind::Percentage => "percentage",
            CellDataKind::Array => "array",
            CellDataKind::Object => "object",
            CellDataKind::Geospatial => "geospatial",
            CellDataKind::MediaReference => "media_reference",
            CellDataKind::Custom => "custom",
        }
    }

    /// Numeric kinds are right-aligned by default when displayed
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellDataKind::Number | CellDataKind::Currency | CellDataKind::Percentage
        )
    }
}

impl fmt::Display for CellDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error descriptor attached to a cell whose content kind is [`CellContentKind::Error`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellErrorInfo {
    /// Short error kind (e.g. "#REF!", "parse")
    pub kind: String,
    /// Human-readable message shown in place of the value
    pub message: String,
}

impl CellErrorInfo {
    /// Create a new error descriptor
    pub fn new<K: Into<String>, M: Into<String>>(kind: K, message: M) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}
