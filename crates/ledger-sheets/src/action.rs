//! Actions accepted by the store

use ledger_sheets_core::{CellPatch, CellRange, CellStyle, Coordinates, Workbook};

use crate::state::{Dialog, Notification, RibbonTab, SidebarContent};

/// A single state change request
///
/// Workbook mutations are recorded in the history log; view actions only
/// change session state. [`Action::SubmitEdit`] writes the formula bar
/// into the active cell and is recorded as a cell edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // === Workbook mutations ===
    /// Switch the active sheet; clears the active cell and selection
    SetActiveSheet { sheet_id: String },
    /// Merge a patch onto one cell
    UpdateCell {
        sheet_id: String,
        coords: Coordinates,
        patch: CellPatch,
    },
    /// Merge a style delta onto every cell of a range
    ApplyCellStyle {
        sheet_id: String,
        range: CellRange,
        style: CellStyle,
    },
    /// Show or hide a sheet's gridlines
    ToggleGridlines { sheet_id: String, visible: bool },
    /// Append a new sheet (generated name when `None`)
    AddSheet { name: Option<String> },

    // === Session ===
    /// Swap in a whole workbook; clears the active cell and selection
    ReplaceWorkbook(Box<Workbook>),
    SetActiveCell(Coordinates),
    SetSelection(CellRange),
    ClearSelection,
    SetFormulaBarValue(String),
    BeginEdit,
    CancelEdit,
    SubmitEdit,
    /// Open/close the sidebar, optionally switching its content
    ToggleSidebar(Option<SidebarContent>),
    /// Set the sidebar content; `None` closes the sidebar
    SetSidebarContent(Option<SidebarContent>),
    SetRibbonTab(RibbonTab),
    AddNotification(Notification),
    RemoveNotification(u64),
    SetZoom(f64),
    OpenDialog(Dialog),
    CloseDialog,
}

impl Action {
    /// Build an `UpdateCell` action
    pub fn update_cell<S: Into<String>>(sheet_id: S, coords: Coordinates, patch: CellPatch) -> Self {
        Action::UpdateCell {
            sheet_id: sheet_id.into(),
            coords,
            patch,
        }
    }

    /// Build an `ApplyCellStyle` action for a range (on the range's sheet)
    pub fn apply_style(range: CellRange, style: CellStyle) -> Self {
        Action::ApplyCellStyle {
            sheet_id: range.sheet_id.clone(),
            range,
            style,
        }
    }

    /// Build a `SetActiveSheet` action
    pub fn set_active_sheet<S: Into<String>>(sheet_id: S) -> Self {
        Action::SetActiveSheet {
            sheet_id: sheet_id.into(),
        }
    }

    /// Build a `ToggleGridlines` action
    pub fn toggle_gridlines<S: Into<String>>(sheet_id: S, visible: bool) -> Self {
        Action::ToggleGridlines {
            sheet_id: sheet_id.into(),
            visible,
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetActiveSheet { .. } => "set_active_sheet",
            Action::UpdateCell { .. } => "update_cell",
            Action::ApplyCellStyle { .. } => "apply_cell_style",
            Action::ToggleGridlines { .. } => "toggle_gridlines",
            Action::AddSheet { .. } => "add_sheet",
            Action::ReplaceWorkbook(_) => "replace_workbook",
            Action::SetActiveCell(_) => "set_active_cell",
            Action::SetSelection(_) => "set_selection",
            Action::ClearSelection => "clear_selection",
            Action::SetFormulaBarValue(_) => "set_formula_bar_value",
            Action::BeginEdit => "begin_edit",
            Action::CancelEdit => "cancel_edit",
            Action::SubmitEdit => "submit_edit",
            Action::ToggleSidebar(_) => "toggle_sidebar",
            Action::SetSidebarContent(_) => "set_sidebar_content",
            Action::SetRibbonTab(_) => "set_ribbon_tab",
            Action::AddNotification(_) => "add_notification",
            Action::RemoveNotification(_) => "remove_notification",
            Action::SetZoom(_) => "set_zoom",
            Action::OpenDialog(_) => "open_dialog",
            Action::CloseDialog => "close_dialog",
        }
    }

    /// Check if applying this action appends a history entry
    pub fn is_recorded(&self) -> bool {
        matches!(
            self,
            Action::SetActiveSheet { .. }
                | Action::UpdateCell { .. }
                | Action::ApplyCellStyle { .. }
                | Action::ToggleGridlines { .. }
                | Action::AddSheet { .. }
                | Action::SubmitEdit
        )
    }
}
