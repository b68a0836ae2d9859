//! Pure state transitions
//!
//! [`reduce`] applies one [`Action`] to a snapshot and returns the next
//! snapshot. The input snapshot is never modified; sheets that an action
//! does not touch stay shared between the two.

use ledger_sheets_core::{CellRange, Coordinates, Error, Result};

use crate::action::Action;
use crate::editor::parse_input;
use crate::history::Change;
use crate::state::{clamp_zoom, EditMode, StoreState};

/// A mutation to append to the history log
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEntry {
    pub sheet_id: String,
    pub change: Change,
}

/// Result of applying one action
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: StoreState,
    /// History entry produced by a workbook mutation
    pub record: Option<PendingEntry>,
}

impl Transition {
    fn view(state: StoreState) -> Self {
        Self {
            state,
            record: None,
        }
    }

    fn recorded<S: Into<String>>(state: StoreState, sheet_id: S, change: Change) -> Self {
        Self {
            state,
            record: Some(PendingEntry {
                sheet_id: sheet_id.into(),
                change,
            }),
        }
    }
}

/// Apply an action to a state snapshot
///
/// On error the caller keeps the prior snapshot; nothing was changed.
pub fn reduce(state: &StoreState, action: &Action) -> Result<Transition> {
    let mut next = state.clone();

    match action {
        Action::SetActiveSheet { sheet_id } => {
            let before = next.workbook.set_active_sheet(sheet_id)?;
            reset_cursor(&mut next);
            Ok(Transition::recorded(
                next,
                sheet_id.clone(),
                Change::ActiveSheetChanged {
                    before,
                    after: sheet_id.clone(),
                },
            ))
        }

        Action::UpdateCell {
            sheet_id,
            coords,
            patch,
        } => {
            let change = next.workbook.sheet_mut(sheet_id)?.update_cell(*coords, patch);
            Ok(Transition::recorded(
                next,
                sheet_id.clone(),
                Change::CellEdit {
                    label: change.label,
                    before: change.before,
                    after: change.after,
                },
            ))
        }

        Action::ApplyCellStyle {
            sheet_id,
            range,
            style,
        } => {
            let previous = next.workbook.sheet_mut(sheet_id)?.apply_style(range, style)?;
            Ok(Transition::recorded(
                next,
                sheet_id.clone(),
                Change::StyleApplied {
                    range: range.clone(),
                    delta: style.clone(),
                    previous,
                },
            ))
        }

        Action::ToggleGridlines { sheet_id, visible } => {
            let before = next
                .workbook
                .sheet_mut(sheet_id)?
                .set_show_gridlines(*visible);
            Ok(Transition::recorded(
                next,
                sheet_id.clone(),
                Change::GridlinesToggled {
                    before,
                    after: *visible,
                },
            ))
        }

        Action::AddSheet { name } => {
            let sheet_id = next.workbook.add_sheet(name.as_deref())?;
            let name = next
                .workbook
                .sheet(&sheet_id)
                .map(|s| s.name().to_string())
                .unwrap_or_default();
            Ok(Transition::recorded(
                next,
                sheet_id.clone(),
                Change::SheetAdded { sheet_id, name },
            ))
        }

        Action::ReplaceWorkbook(workbook) => {
            if workbook.active_sheet().is_none() {
                return Err(Error::SheetNotFound(workbook.active_sheet_id().to_string()));
            }
            next.workbook = workbook.as_ref().clone();
            reset_cursor(&mut next);
            Ok(Transition::view(next))
        }

        Action::SetActiveCell(coords) => {
            check_in_active_sheet(&next, coords)?;
            next.active_cell = Some(*coords);
            next.selection = Some(coords.to_range(next.workbook.active_sheet_id()));
            next.formula_bar = active_edit_text(&next);
            next.edit_mode = EditMode::Viewing;
            Ok(Transition::view(next))
        }

        Action::SetSelection(range) => {
            check_range_on_active_sheet(&next, range)?;
            next.selection = Some(range.clone());
            Ok(Transition::view(next))
        }

        Action::ClearSelection => {
            next.selection = None;
            Ok(Transition::view(next))
        }

        Action::SetFormulaBarValue(text) => {
            next.formula_bar = text.clone();
            Ok(Transition::view(next))
        }

        Action::BeginEdit => {
            if next.active_cell.is_none() {
                return Err(Error::NoActiveCell);
            }
            next.edit_mode = EditMode::Editing;
            Ok(Transition::view(next))
        }

        Action::CancelEdit => {
            next.edit_mode = EditMode::Viewing;
            next.formula_bar = active_edit_text(&next);
            Ok(Transition::view(next))
        }

        Action::SubmitEdit => {
            let coords = next.active_cell.ok_or(Error::NoActiveCell)?;
            let sheet_id = next.workbook.active_sheet_id().to_string();
            let patch = parse_input(&next.formula_bar);
            let change = next.workbook.sheet_mut(&sheet_id)?.update_cell(coords, &patch);
            next.edit_mode = EditMode::Viewing;
            Ok(Transition::recorded(
                next,
                sheet_id,
                Change::CellEdit {
                    label: change.label,
                    before: change.before,
                    after: change.after,
                },
            ))
        }

        Action::ToggleSidebar(content) => {
            next.sidebar_open = !next.sidebar_open;
            if content.is_some() {
                next.sidebar_content = content.clone();
            }
            Ok(Transition::view(next))
        }

        Action::SetSidebarContent(content) => {
            next.sidebar_open = content.is_some();
            next.sidebar_content = content.clone();
            Ok(Transition::view(next))
        }

        Action::SetRibbonTab(tab) => {
            next.ribbon_tab = *tab;
            Ok(Transition::view(next))
        }

        Action::AddNotification(notification) => {
            next.notifications.push(notification.clone());
            Ok(Transition::view(next))
        }

        Action::RemoveNotification(id) => {
            next.notifications.retain(|n| n.id != *id);
            Ok(Transition::view(next))
        }

        Action::SetZoom(zoom) => {
            if !zoom.is_finite() {
                return Err(Error::other(format!("Invalid zoom level: {}", zoom)));
            }
            next.zoom = clamp_zoom(*zoom);
            Ok(Transition::view(next))
        }

        Action::OpenDialog(dialog) => {
            next.dialog = Some(dialog.clone());
            Ok(Transition::view(next))
        }

        Action::CloseDialog => {
            next.dialog = None;
            Ok(Transition::view(next))
        }
    }
}

/// Clear the active cell, selection and formula bar
fn reset_cursor(state: &mut StoreState) {
    state.active_cell = None;
    state.selection = None;
    state.formula_bar.clear();
    state.edit_mode = EditMode::Viewing;
}

/// Formula bar text for the active cell (empty without one)
fn active_edit_text(state: &StoreState) -> String {
    state
        .active_cell_data()
        .map(|cell| cell.edit_text())
        .unwrap_or_default()
}

fn check_in_active_sheet(state: &StoreState, coords: &Coordinates) -> Result<()> {
    let sheet = state
        .active_sheet()
        .ok_or_else(|| Error::SheetNotFound(state.workbook.active_sheet_id().to_string()))?;
    if !sheet.in_bounds(coords) {
        let dims = sheet.dimensions();
        return Err(Error::InvalidRange(format!(
            "{} is outside the sheet ({} rows x {} columns)",
            coords, dims.rows, dims.cols
        )));
    }
    Ok(())
}

fn check_range_on_active_sheet(state: &StoreState, range: &CellRange) -> Result<()> {
    if range.sheet_id != state.workbook.active_sheet_id() {
        return Err(Error::InvalidRange(format!(
            "{} is on sheet '{}', not the active sheet",
            range, range.sheet_id
        )));
    }
    check_in_active_sheet(state, &range.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{RibbonTab, SidebarContent};
    use ledger_sheets_core::{CellPatch, CellValue, Workbook};

    fn state() -> StoreState {
        StoreState::default()
    }

    #[test]
    fn test_prior_state_is_untouched() {
        let before = state();
        let action = Action::update_cell("sheet-1", Coordinates::new(0, 0), CellPatch::new().value(1));
        let t = reduce(&before, &action).unwrap();

        assert_eq!(before.workbook.sheet("sheet-1").unwrap().cell_count(), 0);
        assert_eq!(t.state.workbook.sheet("sheet-1").unwrap().cell_count(), 1);
        assert!(t.record.is_some());
    }

    #[test]
    fn test_unknown_sheet_is_reported() {
        let s = state();
        let action = Action::update_cell("sheet-9", Coordinates::new(0, 0), CellPatch::new().value(1));
        assert_eq!(
            reduce(&s, &action),
            Err(Error::SheetNotFound("sheet-9".into()))
        );
        assert_eq!(
            reduce(&s, &Action::toggle_gridlines("sheet-9", false)),
            Err(Error::SheetNotFound("sheet-9".into()))
        );
    }

    #[test]
    fn test_set_active_cell_loads_formula_bar() {
        let s = reduce(
            &state(),
            &Action::update_cell(
                "sheet-1",
                Coordinates::new(3, 1),
                CellPatch::new().value(7700).formula("=B2-B3"),
            ),
        )
        .unwrap()
        .state;

        let t = reduce(&s, &Action::SetActiveCell(Coordinates::new(3, 1))).unwrap();
        assert_eq!(t.state.formula_bar, "=B2-B3");
        assert_eq!(t.state.selection.unwrap().to_a1_string(), "B4");
        assert!(t.record.is_none());
    }

    #[test]
    fn test_set_active_cell_out_of_bounds() {
        let err = reduce(&state(), &Action::SetActiveCell(Coordinates::new(100, 0))).unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
    }

    #[test]
    fn test_edit_requires_active_cell() {
        assert_eq!(reduce(&state(), &Action::BeginEdit), Err(Error::NoActiveCell));
        assert_eq!(reduce(&state(), &Action::SubmitEdit), Err(Error::NoActiveCell));
    }

    #[test]
    fn test_submit_writes_active_cell() {
        let mut s = reduce(&state(), &Action::SetActiveCell(Coordinates::new(2, 2)))
            .unwrap()
            .state;
        for action in [
            Action::BeginEdit,
            Action::SetFormulaBarValue("42".into()),
        ] {
            s = reduce(&s, &action).unwrap().state;
        }
        assert!(s.is_editing());

        let t = reduce(&s, &Action::SubmitEdit).unwrap();
        assert!(!t.state.is_editing());
        assert_eq!(
            t.state.active_cell_data().unwrap().value,
            CellValue::Number(42.0)
        );
        assert!(matches!(
            t.record,
            Some(PendingEntry {
                change: Change::CellEdit { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_cancel_restores_formula_bar() {
        let mut s = state();
        for action in [
            Action::update_cell("sheet-1", Coordinates::new(0, 0), CellPatch::new().value("Sales")),
            Action::SetActiveCell(Coordinates::new(0, 0)),
            Action::BeginEdit,
            Action::SetFormulaBarValue("Revenue".into()),
            Action::CancelEdit,
        ] {
            s = reduce(&s, &action).unwrap().state;
        }
        assert_eq!(s.formula_bar, "Sales");
        assert_eq!(s.edit_mode, EditMode::Viewing);
        assert_eq!(
            s.active_cell_data().unwrap().value,
            CellValue::text("Sales")
        );
    }

    #[test]
    fn test_set_active_sheet_clears_cursor() {
        let mut s = state();
        for action in [
            Action::AddSheet { name: None },
            Action::SetActiveCell(Coordinates::new(1, 1)),
        ] {
            s = reduce(&s, &action).unwrap().state;
        }
        let t = reduce(&s, &Action::set_active_sheet("sheet-2")).unwrap();
        assert_eq!(t.state.workbook.active_sheet_id(), "sheet-2");
        assert_eq!(t.state.active_cell, None);
        assert_eq!(t.state.selection, None);
        assert_eq!(
            t.record.unwrap().change,
            Change::ActiveSheetChanged {
                before: "sheet-1".into(),
                after: "sheet-2".into()
            }
        );
    }

    #[test]
    fn test_selection_must_be_on_active_sheet() {
        let range = CellRange::parse("A1:B2", "sheet-2").unwrap();
        assert!(matches!(
            reduce(&state(), &Action::SetSelection(range)),
            Err(Error::InvalidRange(_))
        ));
    }

    #[test]
    fn test_sidebar_actions() {
        let s = reduce(&state(), &Action::SetSidebarContent(Some(SidebarContent::AiAssistant)))
            .unwrap()
            .state;
        assert!(s.sidebar_open);

        let s = reduce(&s, &Action::ToggleSidebar(None)).unwrap().state;
        assert!(!s.sidebar_open);
        assert_eq!(s.sidebar_content, Some(SidebarContent::AiAssistant));

        let s = reduce(&s, &Action::SetSidebarContent(None)).unwrap().state;
        assert!(!s.sidebar_open);
        assert_eq!(s.sidebar_content, None);
    }

    #[test]
    fn test_zoom_and_ribbon() {
        let s = reduce(&state(), &Action::SetZoom(10.0)).unwrap().state;
        assert_eq!(s.zoom, 4.0);
        assert!(reduce(&s, &Action::SetZoom(f64::NAN)).is_err());

        let s = reduce(&s, &Action::SetRibbonTab(RibbonTab::Ai)).unwrap().state;
        assert_eq!(s.ribbon_tab, RibbonTab::Ai);
    }

    #[test]
    fn test_replace_workbook_resets_cursor() {
        let s = reduce(&state(), &Action::SetActiveCell(Coordinates::new(0, 0)))
            .unwrap()
            .state;
        let replacement = Workbook::new("wb-2", "Other");
        let t = reduce(&s, &Action::ReplaceWorkbook(Box::new(replacement))).unwrap();
        assert_eq!(t.state.workbook.id(), "wb-2");
        assert_eq!(t.state.active_cell, None);
        assert!(t.record.is_none());
    }
}
