//! Cell record and partial updates

use serde::{Deserialize, Serialize};

use super::{CellContentKind, CellDataKind, CellErrorInfo, CellValue, Coordinates};
use crate::error::{Error, Result};
use crate::style::CellStyle;

/// Text shown for an error cell that has no message
pub const ERROR_PLACEHOLDER: &str = "#ERROR!";

/// Complete data for a single cell
///
/// `label` always equals the encoded position the cell is stored under;
/// [`crate::Sheet`] maintains this when it creates or updates cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Label of the cell's position ("B3")
    pub label: String,
    /// The cell's value, typed per `data_kind`
    #[serde(default)]
    pub value: CellValue,
    /// Formula text including the leading `=`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Text as the user typed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_input: Option<String>,
    /// Content kind tag
    #[serde(rename = "type", default)]
    pub content_kind: CellContentKind,
    /// Data kind tag
    #[serde(default)]
    pub data_kind: CellDataKind,
    /// Cell formatting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
    /// Labels this cell depends on (not populated: formulas are not evaluated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    /// Error descriptor, required when `content_kind` is `Error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CellErrorInfo>,
}

impl Cell {
    /// Create an empty cell at a position
    pub fn new(coords: Coordinates) -> Self {
        Self {
            label: coords.label(),
            ..Default::default()
        }
    }

    /// Create a value cell, inferring the data kind from the value
    pub fn with_value<V: Into<CellValue>>(coords: Coordinates, value: V) -> Self {
        let value = value.into();
        Self {
            label: coords.label(),
            data_kind: infer_data_kind(&value),
            value,
            ..Default::default()
        }
    }

    /// Decode the cell's label back into coordinates
    pub fn coordinates(&self) -> Result<Coordinates> {
        Coordinates::parse(&self.label)
    }

    /// Check if the cell holds formula text
    pub fn has_formula(&self) -> bool {
        self.formula.is_some() || self.content_kind == CellContentKind::Formula
    }

    /// Check if the cell is an error cell
    pub fn is_error(&self) -> bool {
        self.content_kind == CellContentKind::Error
    }

    /// Validate the cell's invariants
    ///
    /// An error cell must carry an error descriptor.
    pub fn check(&self) -> Result<()> {
        if self.is_error() && self.error.is_none() {
            return Err(Error::other(format!(
                "cell {} has error content but no error descriptor",
                self.label
            )));
        }
        Ok(())
    }

    /// The evaluation error carried by an error cell, if any
    pub fn evaluation_error(&self) -> Option<Error> {
        if !self.is_error() {
            return None;
        }
        let message = self
            .error
            .as_ref()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| ERROR_PLACEHOLDER.to_string());
        Some(Error::CellEvaluation {
            label: self.label.clone(),
            message,
        })
    }

    /// Text shown in the grid for this cell
    pub fn display_text(&self) -> String {
        if self.is_error() {
            return self
                .error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| ERROR_PLACEHOLDER.to_string());
        }
        self.value.to_string()
    }

    /// Text loaded into the formula bar when the cell becomes active
    ///
    /// Formula first, then the raw input, then the value's text.
    pub fn edit_text(&self) -> String {
        if let Some(formula) = self.formula.as_deref().filter(|f| !f.is_empty()) {
            return formula.to_string();
        }
        if let Some(raw) = self.raw_input.as_deref().filter(|r| !r.is_empty()) {
            return raw.to_string();
        }
        self.value.to_string()
    }
}

/// Infer a data kind for a bare value
pub fn infer_data_kind(value: &CellValue) -> CellDataKind {
    match value {
        CellValue::Number(_) => CellDataKind::Number,
        CellValue::Boolean(_) => CellDataKind::Boolean,
        CellValue::Array(_) => CellDataKind::Array,
        CellValue::Object(_) => CellDataKind::Object,
        CellValue::Empty | CellValue::Text(_) => CellDataKind::Text,
    }
}

/// Partial cell data merged onto an existing cell
///
/// Every field left as `None` keeps the cell's current value. For the
/// optional cell fields, `Some(None)` clears the field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellPatch {
    pub value: Option<CellValue>,
    pub formula: Option<Option<String>>,
    pub raw_input: Option<Option<String>>,
    pub content_kind: Option<CellContentKind>,
    pub data_kind: Option<CellDataKind>,
    pub style: Option<Option<CellStyle>>,
    pub dependencies: Option<Option<Vec<String>>>,
    pub error: Option<Option<CellErrorInfo>>,
}

impl CellPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value
    pub fn value<V: Into<CellValue>>(mut self, value: V) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the formula text
    pub fn formula<S: Into<String>>(mut self, formula: S) -> Self {
        self.formula = Some(Some(formula.into()));
        self
    }

    /// Remove any formula text
    pub fn clear_formula(mut self) -> Self {
        self.formula = Some(None);
        self
    }

    /// Set the raw input text
    pub fn raw_input<S: Into<String>>(mut self, raw: S) -> Self {
        self.raw_input = Some(Some(raw.into()));
        self
    }

    /// Set the content kind
    pub fn content_kind(mut self, kind: CellContentKind) -> Self {
        self.content_kind = Some(kind);
        self
    }

    /// Set the data kind
    pub fn data_kind(mut self, kind: CellDataKind) -> Self {
        self.data_kind = Some(kind);
        self
    }

    /// Replace the whole style record
    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = Some(Some(style));
        self
    }

    /// Attach an error descriptor (and mark the cell as an error cell)
    pub fn error(mut self, error: CellErrorInfo) -> Self {
        self.content_kind = Some(CellContentKind::Error);
        self.error = Some(Some(error));
        self
    }

    /// Remove any error descriptor
    pub fn clear_error(mut self) -> Self {
        self.error = Some(None);
        self
    }

    /// Merge this patch onto a cell (shallow: present fields overwrite)
    pub fn apply(&self, cell: &mut Cell) {
        if let Some(value) = &self.value {
            cell.value = value.clone();
        }
        if let Some(formula) = &self.formula {
            cell.formula = formula.clone();
        }
        if let Some(raw) = &self.raw_input {
            cell.raw_input = raw.clone();
        }
        if let Some(kind) = self.content_kind {
            cell.content_kind = kind;
        }
        if let Some(kind) = self.data_kind {
            cell.data_kind = kind;
        }
        if let Some(style) = &self.style {
            cell.style = style.clone();
        }
        if let Some(deps) = &self.dependencies {
            cell.dependencies = deps.clone();
        }
        if let Some(error) = &self.error {
            cell.error = error.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_with_value_infers_kind() {
        let cell = Cell::with_value(Coordinates::new(1, 1), 12500);
        assert_eq!(cell.label, "B2");
        assert_eq!(cell.data_kind, CellDataKind::Number);
        assert_eq!(cell.content_kind, CellContentKind::Value);
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let mut cell = Cell::with_value(Coordinates::new(0, 0), "Sales");
        cell.raw_input = Some("Sales".into());

        CellPatch::new().value(42).apply(&mut cell);

        assert_eq!(cell.value, CellValue::Number(42.0));
        assert_eq!(cell.raw_input.as_deref(), Some("Sales"));
        assert_eq!(cell.label, "A1");
    }

    #[test]
    fn test_patch_can_clear_optional_fields() {
        let mut cell = Cell::new(Coordinates::new(0, 0));
        cell.formula = Some("=B2-B3".into());

        CellPatch::new().clear_formula().apply(&mut cell);
        assert_eq!(cell.formula, None);
    }

    #[test]
    fn test_error_cell_invariant() {
        let mut cell = Cell::new(Coordinates::new(0, 0));
        cell.content_kind = CellContentKind::Error;
        assert!(cell.check().is_err());
        assert_eq!(cell.display_text(), ERROR_PLACEHOLDER);

        CellPatch::new()
            .error(CellErrorInfo::new("#REF!", "Reference is invalid"))
            .apply(&mut cell);
        assert!(cell.check().is_ok());
        assert_eq!(cell.display_text(), "Reference is invalid");
        assert_eq!(
            cell.evaluation_error(),
            Some(Error::CellEvaluation {
                label: "A1".into(),
                message: "Reference is invalid".into(),
            })
        );
    }

    #[test]
    fn test_edit_text_prefers_formula_then_raw_input() {
        let mut cell = Cell::with_value(Coordinates::new(3, 1), 7700);
        assert_eq!(cell.edit_text(), "7700");

        cell.raw_input = Some("7,700".into());
        assert_eq!(cell.edit_text(), "7,700");

        cell.formula = Some("=B2-B3".into());
        assert_eq!(cell.edit_text(), "=B2-B3");
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let cell = Cell::with_value(Coordinates::new(1, 1), 12500);
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["label"], "B2");
        assert_eq!(json["type"], "value");
        assert_eq!(json["dataKind"], "number");
        assert!(json.get("formula").is_none());
    }
}
