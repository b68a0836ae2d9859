//! Workbook type - the main document structure

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cell::CellRange;
use crate::error::{Error, Result};
use crate::named_range::{NamedRange, NamedRangeCollection};
use crate::sheet::{Dimensions, Sheet};
use crate::style::Color;
use crate::MAX_SHEET_NAME_LEN;

/// A person working on the workbook (data only; presence is not tracked)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Collaborator {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
        }
    }
}

/// A workbook (spreadsheet document)
///
/// Sheets are held behind [`Arc`], so cloning a workbook is cheap and a
/// change through [`Workbook::sheet_mut`] copies only the sheet it touches.
/// There is always at least one sheet, and the active sheet id always
/// names one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    id: String,
    name: String,
    sheets: Vec<Arc<Sheet>>,
    active_sheet_id: String,
    /// Dimensions given to newly added sheets
    sheet_dimensions: Dimensions,
    collaborators: Vec<Collaborator>,
    settings: BTreeMap<String, String>,
    named_ranges: NamedRangeCollection,
}

impl Workbook {
    /// Create a workbook with one empty sheet ("Sheet1", id "sheet-1")
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self::with_dimensions(id, name, Dimensions::default())
    }

    /// Create a workbook whose sheets use the given dimensions
    pub fn with_dimensions<I: Into<String>, N: Into<String>>(
        id: I,
        name: N,
        dimensions: Dimensions,
    ) -> Self {
        let first = Sheet::with_dimensions("sheet-1", "Sheet1", dimensions);
        Self::from_sheet(id, name, first, dimensions)
    }

    /// Create a workbook around an existing sheet, which becomes active
    pub fn from_sheet<I: Into<String>, N: Into<String>>(
        id: I,
        name: N,
        sheet: Sheet,
        sheet_dimensions: Dimensions,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active_sheet_id: sheet.id().to_string(),
            sheets: vec![Arc::new(sheet)],
            sheet_dimensions,
            collaborators: Vec::new(),
            settings: BTreeMap::new(),
            named_ranges: NamedRangeCollection::new(),
        }
    }

    /// Get the workbook id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the workbook name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the workbook name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Sheets ===

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Iterate over sheets in tab order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter().map(|s| s.as_ref())
    }

    /// Get a sheet by id
    pub fn sheet(&self, id: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id() == id).map(|s| s.as_ref())
    }

    /// Get the shared handle of a sheet by id
    pub fn sheet_handle(&self, id: &str) -> Option<&Arc<Sheet>> {
        self.sheets.iter().find(|s| s.id() == id)
    }

    /// Get a mutable sheet by id
    ///
    /// The sheet is copied first if another workbook snapshot shares it.
    pub fn sheet_mut(&mut self, id: &str) -> Result<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.id() == id)
            .map(Arc::make_mut)
            .ok_or_else(|| Error::SheetNotFound(id.to_string()))
    }

    /// Get a sheet by name (case-insensitive)
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        let lower = name.to_lowercase();
        self.sheets()
            .find(|s| s.name().to_lowercase() == lower)
    }

    /// Get the tab index of a sheet by id
    pub fn sheet_index(&self, id: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.id() == id)
    }

    /// Get the active sheet id
    pub fn active_sheet_id(&self) -> &str {
        &self.active_sheet_id
    }

    /// Get the active sheet
    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.sheet(&self.active_sheet_id)
    }

    /// Switch the active sheet, returning the previous active sheet id
    pub fn set_active_sheet(&mut self, id: &str) -> Result<String> {
        if self.sheet_index(id).is_none() {
            return Err(Error::SheetNotFound(id.to_string()));
        }
        Ok(std::mem::replace(&mut self.active_sheet_id, id.to_string()))
    }

    /// Dimensions given to newly added sheets
    pub fn sheet_dimensions(&self) -> Dimensions {
        self.sheet_dimensions
    }

    /// Add a new empty sheet and return its id
    ///
    /// Without a name the sheet is called `SheetN`; its id is `sheet-N`
    /// with the first unused N.
    pub fn add_sheet(&mut self, name: Option<&str>) -> Result<String> {
        let name = match name {
            Some(name) => {
                self.validate_sheet_name(name)?;
                name.to_string()
            }
            None => self.generate_sheet_name(),
        };
        let id = self.generate_sheet_id();
        self.sheets.push(Arc::new(Sheet::with_dimensions(
            id.clone(),
            name,
            self.sheet_dimensions,
        )));
        Ok(id)
    }

    /// Add an existing sheet; its id and name must both be unused
    pub fn add_existing_sheet(&mut self, sheet: Sheet) -> Result<usize> {
        self.validate_sheet_name(sheet.name())?;
        if self.sheet_index(sheet.id()).is_some() {
            return Err(Error::other(format!("Sheet id already exists: {}", sheet.id())));
        }
        self.sheets.push(Arc::new(sheet));
        Ok(self.sheets.len() - 1)
    }

    /// Rename a sheet
    pub fn rename_sheet(&mut self, id: &str, new_name: &str) -> Result<()> {
        let index = self
            .sheet_index(id)
            .ok_or_else(|| Error::SheetNotFound(id.to_string()))?;
        self.validate_sheet_name_excluding(new_name, Some(index))?;
        Arc::make_mut(&mut self.sheets[index]).set_name(new_name);
        Ok(())
    }

    /// Validate a sheet name
    pub fn validate_sheet_name(&self, name: &str) -> Result<()> {
        self.validate_sheet_name_excluding(name, None)
    }

    /// Validate a sheet name, optionally excluding a sheet from duplicate check
    fn validate_sheet_name_excluding(
        &self,
        name: &str,
        exclude_index: Option<usize>,
    ) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        // Case-insensitive
        let name_lower = name.to_lowercase();
        for (i, sheet) in self.sheets.iter().enumerate() {
            if Some(i) != exclude_index && sheet.name().to_lowercase() == name_lower {
                return Err(Error::DuplicateSheetName(name.into()));
            }
        }

        Ok(())
    }

    /// Generate a unique sheet name
    fn generate_sheet_name(&self) -> String {
        let mut n = self.sheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if self.validate_sheet_name(&name).is_ok() {
                return name;
            }
            n += 1;
        }
    }

    /// Generate a unique sheet id
    fn generate_sheet_id(&self) -> String {
        let mut n = self.sheets.len() + 1;
        loop {
            let id = format!("sheet-{}", n);
            if self.sheet_index(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }

    // === Collaborators ===

    /// Get the collaborator list
    pub fn collaborators(&self) -> &[Collaborator] {
        &self.collaborators
    }

    /// Add or replace a collaborator (matched by id)
    pub fn upsert_collaborator(&mut self, collaborator: Collaborator) {
        match self
            .collaborators
            .iter_mut()
            .find(|c| c.id == collaborator.id)
        {
            Some(existing) => *existing = collaborator,
            None => self.collaborators.push(collaborator),
        }
    }

    // === Settings ===

    /// Get all workbook settings
    pub fn settings(&self) -> &BTreeMap<String, String> {
        &self.settings
    }

    /// Get one setting
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Set a setting, returning the previous value
    pub fn set_setting<K: Into<String>, V: Into<String>>(
        &mut self,
        key: K,
        value: V,
    ) -> Option<String> {
        self.settings.insert(key.into(), value.into())
    }

    // ==================== Named Ranges ====================

    /// Define a named range
    ///
    /// # Example
    /// ```
    /// use ledger_sheets_core::{CellRange, Workbook};
    ///
    /// let mut wb = Workbook::new("wb-1", "Budget");
    /// wb.define_name("Revenue", CellRange::parse("B2:B5", "sheet-1").unwrap()).unwrap();
    /// assert!(wb.named_range("revenue").is_some());
    /// ```
    pub fn define_name(&mut self, name: &str, range: CellRange) -> Result<()> {
        if self.sheet_index(&range.sheet_id).is_none() {
            return Err(Error::SheetNotFound(range.sheet_id));
        }
        self.named_ranges.define(NamedRange::new(name, range))
    }

    /// Get a named range by name (case-insensitive)
    pub fn named_range(&self, name: &str) -> Option<&NamedRange> {
        self.named_ranges.get(name)
    }

    /// Remove a named range
    pub fn remove_name(&mut self, name: &str) -> Option<NamedRange> {
        self.named_ranges.remove(name)
    }

    /// Get the named range collection (read-only)
    pub fn named_ranges(&self) -> &NamedRangeCollection {
        &self.named_ranges
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new("workbook-1", "Untitled")
    }
}
