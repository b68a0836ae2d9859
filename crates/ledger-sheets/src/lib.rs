//! # ledger-sheets
//!
//! Session layer for the ledger-sheets workbook editor.
//!
//! A session holds one [`Workbook`] in a [`Store`]. Every change is an
//! [`Action`]; the store runs it through a pure reducer, keeps the
//! resulting immutable [`StoreState`] snapshot and records workbook
//! mutations in a [`History`] log.
//!
//! ## Features
//!
//! - Typed actions for cell updates, range styling, sheet switching and view state
//! - Edit state machine (viewing / editing) driven by the formula bar
//! - Append-only history log with an optional retention bound
//! - Subscribers notified with each new snapshot
//! - Assistant boundary for an external text-completion service
//! - TOML session configuration
//!
//! Formulas are stored as typed; they are not evaluated.
//!
//! ## Example
//!
//! ```rust
//! use ledger_sheets::prelude::*;
//!
//! let mut store = Store::new(Workbook::new("wb-1", "Budget"));
//!
//! // Type "=B2-B3" into C3 through the formula bar
//! store.dispatch(Action::SetActiveCell(Coordinates::new(2, 2))).unwrap();
//! store.dispatch(Action::BeginEdit).unwrap();
//! store.dispatch(Action::SetFormulaBarValue("=B2-B3".into())).unwrap();
//! store.dispatch(Action::SubmitEdit).unwrap();
//!
//! let cell = store.state().active_cell_data().unwrap();
//! assert_eq!(cell.formula.as_deref(), Some("=B2-B3"));
//! assert_eq!(store.history().len(), 1);
//! ```

pub mod action;
pub mod assistant;
pub mod config;
pub mod editor;
pub mod history;
pub mod prelude;
pub mod reducer;
pub mod sample;
pub mod state;
pub mod store;

pub use action::Action;
pub use assistant::{
    build_prompt, formula_prompt, sheet_context, suggest_formula, Assistant, AssistantError,
    AssistantPanel, CommandAssistant,
};
pub use config::{ConfigError, SessionConfig};
pub use editor::{classify_input, parse_input, InputKind};
pub use history::{Change, ChangeKind, History, HistoryEntry};
pub use reducer::{reduce, PendingEntry, Transition};
pub use state::{
    Dialog, EditMode, Notification, NotificationLevel, RibbonTab, SidebarContent, StoreState,
    UserIdentity,
};
pub use store::{Store, SubscriptionId};

// Re-export core types
pub use ledger_sheets_core::{
    // Cell types
    Cell,
    CellContentKind,
    CellDataKind,
    CellErrorInfo,
    CellPatch,
    CellRange,
    CellValue,
    Coordinates,
    // Style types
    CellStyle,
    Color,
    FontSlant,
    FontWeight,
    TextAlign,
    TextDecoration,
    VerticalAlign,
    // Main types
    Collaborator,
    Dimensions,
    NamedRange,
    Sheet,
    Workbook,
    // Error types
    Error,
    Result,
    // Codec
    column_to_letters,
    decode,
    encode,
    // Constants
    DEFAULT_COLS,
    DEFAULT_ROWS,
    MAX_SHEET_NAME_LEN,
};
