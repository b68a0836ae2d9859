//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Coordinates`] and the label codec ([`encode`] / [`decode`])
//! - [`CellRange`] - An inclusive rectangle of cells on one sheet
//! - [`CellValue`] and the content/data kind tags
//! - [`Cell`] - The stored cell record, and [`CellPatch`] for partial updates

mod address;
mod data;
mod value;

pub use address::{
    column_to_letters, decode, encode, letters_to_column, CellRange, CellRangeIterator,
    Coordinates,
};
pub use data::{infer_data_kind, Cell, CellPatch, ERROR_PLACEHOLDER};
pub use value::{CellContentKind, CellDataKind, CellErrorInfo, CellValue};
