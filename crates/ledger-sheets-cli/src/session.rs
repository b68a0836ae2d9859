//! Runs script commands against a store

use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};
use ledger_sheets::assistant::Assistant;
use ledger_sheets::{
    column_to_letters, parse_input, Action, AssistantPanel, Cell, Coordinates, Sheet,
    SidebarContent, Store, StoreState,
};

use crate::commands::{parse_line, Area, Command, HELP};

/// Whether to keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive editing session
pub struct Session {
    store: Store,
    panel: AssistantPanel,
    assistant: Option<Box<dyn Assistant>>,
}

impl Session {
    pub fn new(store: Store, assistant: Option<Box<dyn Assistant>>) -> Self {
        Self {
            store,
            panel: AssistantPanel::new(),
            assistant,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run every line of `input`, returning the number of failed commands
    ///
    /// Output goes to `out`; each failure is reported on `err` and
    /// processing continues with the next line.
    pub fn run<R, W, E>(&mut self, input: R, out: &mut W, err: &mut E) -> Result<usize>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut failures = 0;
        for (index, line) in input.lines().enumerate() {
            let line = line.context("Failed to read command")?;
            let outcome = parse_line(&line).and_then(|command| match command {
                Some(command) => self.execute(command, out),
                None => Ok(Flow::Continue),
            });
            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => {
                    failures += 1;
                    writeln!(err, "error: line {}: {:#}", index + 1, e)?;
                }
            }
        }
        Ok(failures)
    }

    /// Execute one command
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Select(area) => {
                // Both dispatches must succeed, so check the far corner first.
                let sheet = active_sheet(self.store.state())?;
                if !sheet.in_bounds(&area.end) {
                    let dimensions = sheet.dimensions();
                    return Err(anyhow!(
                        "Invalid range: {} is outside the sheet ({} rows x {} columns)",
                        area.on(sheet.id()),
                        dimensions.rows,
                        dimensions.cols
                    ));
                }
                self.store.dispatch(Action::SetActiveCell(area.start))?;
                if !area.is_single() {
                    let range = area.on(self.active_sheet_id().as_str());
                    self.store.dispatch(Action::SetSelection(range))?;
                }
            }
            Command::Edit => {
                self.store.dispatch(Action::BeginEdit)?;
            }
            Command::Type(text) => {
                self.store.dispatch(Action::SetFormulaBarValue(text))?;
            }
            Command::Submit => {
                let state = self.store.dispatch(Action::SubmitEdit)?;
                if let Some(cell) = state.active_cell_data() {
                    writeln!(out, "{} = {}", cell.label, cell.display_text())?;
                }
            }
            Command::Cancel => {
                self.store.dispatch(Action::CancelEdit)?;
            }
            Command::Set { coords, text } => {
                let sheet_id = self.active_sheet_id();
                self.store
                    .dispatch(Action::update_cell(sheet_id, coords, parse_input(&text)))?;
            }
            Command::Style { area, style } => {
                let range = area.on(self.active_sheet_id().as_str());
                self.store.dispatch(Action::apply_style(range, style))?;
            }
            Command::Sheet(target) => {
                let sheet_id = self.resolve_sheet(&target);
                self.store.dispatch(Action::set_active_sheet(sheet_id))?;
            }
            Command::AddSheet(name) => {
                self.store.dispatch(Action::AddSheet { name })?;
                if let Some(entry) = self.store.history().last() {
                    writeln!(out, "added {}", entry.change)?;
                }
            }
            Command::Gridlines(visible) => {
                let sheet_id = self.active_sheet_id();
                self.store
                    .dispatch(Action::toggle_gridlines(sheet_id, visible))?;
            }
            Command::Show(area) => self.show(area, out)?,
            Command::Cell(coords) => {
                let state = self.store.state();
                let sheet = active_sheet(state)?;
                match sheet.cell_at(coords) {
                    Some(cell) => write_cell(cell, out)?,
                    None => writeln!(out, "{} is empty", coords)?,
                }
            }
            Command::History => {
                for entry in self.store.history().iter() {
                    writeln!(out, "{}", entry)?;
                }
            }
            Command::Ask(prompt) => self.ask(prompt, out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn active_sheet_id(&self) -> String {
        self.store.state().workbook.active_sheet_id().to_string()
    }

    /// Accept a sheet id or a sheet name
    fn resolve_sheet(&self, target: &str) -> String {
        let workbook = &self.store.state().workbook;
        match workbook.sheet(target).or_else(|| workbook.sheet_by_name(target)) {
            Some(sheet) => sheet.id().to_string(),
            None => target.to_string(),
        }
    }

    fn show<W: Write>(&self, area: Option<Area>, out: &mut W) -> Result<()> {
        let state = self.store.state();
        let sheet = active_sheet(state)?;
        let range = match area {
            Some(area) => area.on(sheet.id()),
            None => match sheet.used_range() {
                Some(range) => range,
                None => {
                    writeln!(out, "(empty)")?;
                    return Ok(());
                }
            },
        };

        let cols = range.start.col..=range.end.col;
        let header: Vec<String> = cols.clone().map(column_to_letters).collect();
        writeln!(out, "\t{}", header.join("\t"))?;
        for row in range.start.row..=range.end.row {
            let cells: Vec<String> = cols
                .clone()
                .map(|col| {
                    sheet
                        .cell_at(Coordinates::new(row, col))
                        .map(Cell::display_text)
                        .unwrap_or_default()
                })
                .collect();
            writeln!(out, "{}\t{}", u64::from(row) + 1, cells.join("\t"))?;
        }
        Ok(())
    }

    fn ask<W: Write>(&mut self, prompt: String, out: &mut W) -> Result<()> {
        let assistant = self
            .assistant
            .as_deref()
            .ok_or_else(|| anyhow!("No assistant configured (use --assistant-cmd)"))?;
        self.store
            .dispatch(Action::SetSidebarContent(Some(SidebarContent::AiAssistant)))?;

        let state = self.store.state();
        let sheet = active_sheet(state)?;
        self.panel.set_prompt(prompt);
        let response = self.panel.ask(assistant, sheet)?;
        writeln!(out, "{}", response.trim_end())?;
        Ok(())
    }
}

fn active_sheet(state: &StoreState) -> Result<&Sheet> {
    state
        .active_sheet()
        .ok_or_else(|| anyhow!("Active sheet is missing"))
}

fn write_cell<W: Write>(cell: &Cell, out: &mut W) -> Result<()> {
    writeln!(out, "{}", cell.label)?;
    writeln!(out, "  value: {}", cell.display_text())?;
    if let Some(formula) = &cell.formula {
        writeln!(out, "  formula: {}", formula)?;
    }
    writeln!(out, "  type: {} / {}", cell.content_kind, cell.data_kind)?;
    if let Some(style) = cell.style.as_ref().filter(|s| !s.is_empty()) {
        writeln!(out, "  style: {}", serde_json::to_string(style)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_sheets::assistant::AssistantError;
    use ledger_sheets::sample::ledger_workbook;
    use ledger_sheets::CellValue;
    use pretty_assertions::assert_eq;

    fn run(session: &mut Session, script: &str) -> (String, String, usize) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let failures = session.run(script.as_bytes(), &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            failures,
        )
    }

    #[test]
    fn test_edit_flow() {
        let mut session = Session::new(Store::new(ledger_workbook()), None);
        let (out, _, failures) = run(&mut session, "select c3\nedit\ntype 42\nsubmit\n");
        assert_eq!(failures, 0);
        assert_eq!(out, "C3 = 42\n");

        let sheet = session.store().state().active_sheet().unwrap();
        assert_eq!(sheet.cell("C3").unwrap().unwrap().value, CellValue::Number(42.0));
        assert_eq!(session.store().history().len(), 1);
    }

    #[test]
    fn test_show_range() {
        let mut session = Session::new(Store::new(ledger_workbook()), None);
        let (out, _, _) = run(&mut session, "show A2:B3");
        assert_eq!(out, "\tA\tB\n2\tSales\t12500\n3\tExpenses\t4800\n");
    }

    #[test]
    fn test_show_last_row() {
        let mut session = Session::new(Store::new(ledger_workbook()), None);
        let (out, _, failures) = run(&mut session, "show A4294967296");
        assert_eq!(failures, 0);
        assert_eq!(out, "\tA\n4294967296\t\n");
    }

    #[test]
    fn test_rejected_select_keeps_state() {
        let mut session = Session::new(Store::default(), None);
        let (_, _, failures) = run(&mut session, "select B2\nselect C3:C500\n");
        assert_eq!(failures, 1);

        let state = session.store().state();
        assert_eq!(state.active_cell, Some(Coordinates::new(1, 1)));
        assert_eq!(state.selection.as_ref().unwrap().to_a1_string(), "B2");
    }

    #[test]
    fn test_failures_do_not_stop_the_script() {
        let mut session = Session::new(Store::new(ledger_workbook()), None);
        let (out, err, failures) = run(
            &mut session,
            "sheet sheet-9\nsubmit\nset A9 hello\nquit\nset A10 ignored\n",
        );
        assert_eq!(failures, 2);
        assert_eq!(out, "");
        assert!(err.contains("error: line 1: Sheet not found"), "{}", err);
        assert!(err.contains("error: line 2:"), "{}", err);

        let sheet = session.store().state().active_sheet().unwrap();
        assert!(sheet.cell("A9").unwrap().is_some());
        assert!(sheet.cell("A10").unwrap().is_none());
    }

    #[test]
    fn test_ask_uses_assistant() {
        let assistant = |prompt: &str| -> std::result::Result<String, AssistantError> {
            assert!(prompt.contains("\"B4\""));
            Ok("=B2-B3\n".to_string())
        };
        let mut session = Session::new(Store::new(ledger_workbook()), Some(Box::new(assistant)));
        let (out, _, failures) = run(&mut session, "ask formula for profit");
        assert_eq!(failures, 0);
        assert_eq!(out, "=B2-B3\n");
        assert!(session.store().state().sidebar_open);
    }

    #[test]
    fn test_ask_without_assistant_fails() {
        let mut session = Session::new(Store::new(ledger_workbook()), None);
        let (_, err, failures) = run(&mut session, "ask anything");
        assert_eq!(failures, 1);
        assert!(err.contains("No assistant configured"));
    }
}
