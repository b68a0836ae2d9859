//! Formula bar input parsing
//!
//! Turns the text a user submits for a cell into a [`CellPatch`].
//! Formulas are stored, not evaluated.

use ledger_sheets_core::{CellContentKind, CellDataKind, CellPatch, CellValue};

/// How submitted text was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Formula,
    Number,
    Text,
    Empty,
}

/// Classify submitted text
pub fn classify_input(text: &str) -> InputKind {
    if text.starts_with('=') {
        InputKind::Formula
    } else if text.trim().is_empty() {
        InputKind::Empty
    } else if parse_number(text).is_some() {
        InputKind::Number
    } else {
        InputKind::Text
    }
}

/// Parse text as a finite number, ignoring surrounding whitespace
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Build the patch that storing `text` in a cell applies
///
/// - `=...` stores a formula: the value is the text after `=`, the formula
///   is the full text
/// - a finite number stores a number
/// - blank input clears the value
/// - anything else is stored as text
///
/// The raw input always holds the text as typed, and any previous formula
/// or error on the cell is cleared.
pub fn parse_input(text: &str) -> CellPatch {
    let patch = CellPatch::new()
        .raw_input(text)
        .clear_error()
        .content_kind(CellContentKind::Value);

    match classify_input(text) {
        InputKind::Formula => patch
            .value(CellValue::text(&text[1..]))
            .formula(text)
            .content_kind(CellContentKind::Formula)
            .data_kind(CellDataKind::Text),
        InputKind::Number => match parse_number(text) {
            Some(n) => patch
                .value(n)
                .clear_formula()
                .data_kind(CellDataKind::Number),
            None => text_patch(patch, text),
        },
        InputKind::Empty => patch
            .value(CellValue::Empty)
            .clear_formula()
            .data_kind(CellDataKind::Text),
        InputKind::Text => text_patch(patch, text),
    }
}

fn text_patch(patch: CellPatch, text: &str) -> CellPatch {
    patch
        .value(text)
        .clear_formula()
        .data_kind(CellDataKind::Text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_sheets_core::{Cell, Coordinates};
    use pretty_assertions::assert_eq;

    fn stored(text: &str) -> Cell {
        let mut cell = Cell::new(Coordinates::new(0, 0));
        parse_input(text).apply(&mut cell);
        cell
    }

    #[test]
    fn test_formula_is_stored_unevaluated() {
        let cell = stored("=B2-B3");
        assert_eq!(cell.content_kind, CellContentKind::Formula);
        assert_eq!(cell.value, CellValue::text("B2-B3"));
        assert_eq!(cell.formula.as_deref(), Some("=B2-B3"));
        assert_eq!(cell.raw_input.as_deref(), Some("=B2-B3"));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(stored("42").value, CellValue::Number(42.0));
        assert_eq!(stored(" 1.5e3 ").value, CellValue::Number(1500.0));
        assert_eq!(stored("-7").data_kind, CellDataKind::Number);
        assert_eq!(classify_input("inf"), InputKind::Text);
        assert_eq!(classify_input("NaN"), InputKind::Text);
    }

    #[test]
    fn test_text_and_empty() {
        let cell = stored("Sales");
        assert_eq!(cell.value, CellValue::text("Sales"));
        assert_eq!(cell.data_kind, CellDataKind::Text);

        let cell = stored("   ");
        assert_eq!(cell.value, CellValue::Empty);
        assert_eq!(cell.raw_input.as_deref(), Some("   "));
    }

    #[test]
    fn test_plain_value_replaces_formula() {
        let mut cell = stored("=SUM(A1:A3)");
        parse_input("10").apply(&mut cell);
        assert_eq!(cell.formula, None);
        assert_eq!(cell.content_kind, CellContentKind::Value);
        assert_eq!(cell.edit_text(), "10");
    }
}
