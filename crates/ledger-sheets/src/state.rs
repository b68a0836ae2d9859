//! Store state snapshot
//!
//! A [`StoreState`] is an immutable snapshot: the reducer builds a new one
//! for every applied action and the store hands it out behind an `Arc`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ledger_sheets_core::{Cell, CellRange, Coordinates, Error, Result, Sheet, Workbook};

/// Smallest allowed zoom level
pub const MIN_ZOOM: f64 = 0.25;
/// Largest allowed zoom level
pub const MAX_ZOOM: f64 = 4.0;

/// Edit state of the active cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

/// Panel shown in the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarContent {
    AiAssistant,
    Other(String),
}

impl SidebarContent {
    pub fn as_str(&self) -> &str {
        match self {
            SidebarContent::AiAssistant => "ai_assistant",
            SidebarContent::Other(name) => name,
        }
    }
}

impl From<&str> for SidebarContent {
    fn from(s: &str) -> Self {
        match s {
            "ai_assistant" | "ai" | "assistant" => SidebarContent::AiAssistant,
            other => SidebarContent::Other(other.to_string()),
        }
    }
}

/// Ribbon tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RibbonTab {
    #[default]
    Home,
    Insert,
    Data,
    Formulas,
    View,
    Ai,
}

impl RibbonTab {
    /// All tabs in display order
    pub const ALL: [RibbonTab; 6] = [
        RibbonTab::Home,
        RibbonTab::Insert,
        RibbonTab::Data,
        RibbonTab::Formulas,
        RibbonTab::View,
        RibbonTab::Ai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RibbonTab::Home => "home",
            RibbonTab::Insert => "insert",
            RibbonTab::Data => "data",
            RibbonTab::Formulas => "formulas",
            RibbonTab::View => "view",
            RibbonTab::Ai => "ai",
        }
    }
}

impl fmt::Display for RibbonTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RibbonTab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        RibbonTab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == lower)
            .ok_or_else(|| Error::other(format!("Unknown ribbon tab: {}", s)))
    }
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new<S: Into<String>>(id: u64, level: NotificationLevel, message: S) -> Self {
        Self {
            id,
            level,
            message: message.into(),
        }
    }
}

/// An open modal dialog
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    /// Dialog kind (e.g. "conditionalFormatting")
    pub kind: String,
    pub props: BTreeMap<String, String>,
}

impl Dialog {
    pub fn new<S: Into<String>>(kind: S) -> Self {
        Self {
            kind: kind.into(),
            props: BTreeMap::new(),
        }
    }

    pub fn with_prop<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

/// The user driving the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
}

impl UserIdentity {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Default for UserIdentity {
    fn default() -> Self {
        Self::new("user-1", "Master Admin")
    }
}

/// Complete session state: the workbook plus view state
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    pub workbook: Workbook,
    /// Active cell on the active sheet
    pub active_cell: Option<Coordinates>,
    pub selection: Option<CellRange>,
    /// Text in the formula bar
    pub formula_bar: String,
    pub edit_mode: EditMode,
    pub dialog: Option<Dialog>,
    pub sidebar_open: bool,
    pub sidebar_content: Option<SidebarContent>,
    pub ribbon_tab: RibbonTab,
    pub notifications: Vec<Notification>,
    pub zoom: f64,
    pub user: UserIdentity,
}

impl StoreState {
    /// Create the initial state for a workbook
    pub fn new(workbook: Workbook, user: UserIdentity) -> Self {
        Self {
            workbook,
            active_cell: None,
            selection: None,
            formula_bar: String::new(),
            edit_mode: EditMode::Viewing,
            dialog: None,
            sidebar_open: false,
            sidebar_content: None,
            ribbon_tab: RibbonTab::Home,
            notifications: Vec::new(),
            zoom: 1.0,
            user,
        }
    }

    /// Set the initial zoom level (clamped)
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        if zoom.is_finite() {
            self.zoom = clamp_zoom(zoom);
        }
        self
    }

    /// The active sheet
    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.workbook.active_sheet()
    }

    /// The stored cell under the active cell, if any
    pub fn active_cell_data(&self) -> Option<&Cell> {
        let coords = self.active_cell?;
        self.active_sheet()?.cell_at(coords)
    }

    /// Check if the active cell is being edited
    pub fn is_editing(&self) -> bool {
        self.edit_mode == EditMode::Editing
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new(Workbook::default(), UserIdentity::default())
    }
}

/// Clamp a zoom level to the supported range
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}
