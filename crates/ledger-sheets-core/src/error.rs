//! Error types for ledger-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ledger-sheets-core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed cell label (e.g. "1A", "A0", "B")
    #[error("Invalid cell label: {0}")]
    InvalidLabel(String),

    /// Malformed or inconsistent cell range
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// An operation referenced a sheet id that does not exist
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Invalid named range
    #[error("Invalid named range: {0}")]
    InvalidName(String),

    /// Named range already defined
    #[error("Named range already exists: {0}")]
    DuplicateName(String),

    /// Colour string could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Merged region overlaps an existing one
    #[error("Range {0} overlaps an existing merged region")]
    MergedCellConflict(String),

    /// An edit was requested with no active cell
    #[error("No active cell")]
    NoActiveCell,

    /// A cell carries an evaluation error
    #[error("Evaluation error in {label}: {message}")]
    CellEvaluation { label: String, message: String },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
