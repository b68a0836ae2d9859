//! # ledger-sheets-core
//!
//! Core data structures for the ledger-sheets workbook engine.
//!
//! This crate provides the fundamental types used throughout ledger-sheets:
//! - [`Coordinates`] and the label codec ([`encode`] / [`decode`])
//! - [`CellRange`] - Inclusive rectangle of cells on one sheet
//! - [`Cell`], [`CellValue`] and [`CellPatch`] - Cell records and partial updates
//! - [`CellStyle`] - Cell formatting, merged field by field
//! - [`Workbook`], [`Sheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use ledger_sheets_core::{CellPatch, CellValue, Coordinates, Workbook};
//!
//! let mut workbook = Workbook::new("wb-1", "Budget");
//! let sheet = workbook.sheet_mut("sheet-1").unwrap();
//!
//! sheet.update_cell(Coordinates::new(2, 2), &CellPatch::new().value(42));
//! assert_eq!(sheet.cell("C3").unwrap().unwrap().value, CellValue::Number(42.0));
//! ```

pub mod cell;
pub mod error;
pub mod named_range;
pub mod sheet;
pub mod style;
pub mod workbook;

// Re-exports for convenience
pub use cell::{
    column_to_letters, decode, encode, letters_to_column, Cell, CellContentKind, CellDataKind,
    CellErrorInfo, CellPatch, CellRange, CellValue, Coordinates, ERROR_PLACEHOLDER,
};
pub use error::{Error, Result};
pub use named_range::{NamedRange, NamedRangeCollection};
pub use sheet::{CellValueChange, Dimensions, LineMetadata, Sheet};
pub use workbook::{Collaborator, Workbook};

pub use style::{
    CellStyle, Color, FontSlant, FontWeight, TextAlign, TextDecoration, VerticalAlign,
};

/// Default number of rows in a new sheet
pub const DEFAULT_ROWS: u32 = 100;

/// Default number of columns in a new sheet
pub const DEFAULT_COLS: u32 = 26;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
