//! Prelude module - common imports for ledger-sheets users
//!
//! ```rust
//! use ledger_sheets::prelude::*;
//! ```

pub use crate::{
    // Session types
    Action,
    Store,
    StoreState,
    EditMode,
    History,
    HistoryEntry,
    ChangeKind,

    // Assistant
    Assistant,
    AssistantPanel,

    // Cell types
    Cell,
    CellPatch,
    CellRange,
    CellValue,
    Coordinates,

    // Style types
    CellStyle,
    Color,

    // Main types
    Sheet,
    Workbook,

    // Error types
    Error,
    Result,
};
