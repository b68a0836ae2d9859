//! Sheet type

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellPatch, CellRange, CellValue, Coordinates};
use crate::error::{Error, Result};
use crate::style::CellStyle;
use crate::{DEFAULT_COLS, DEFAULT_ROWS};

static EMPTY: CellValue = CellValue::Empty;

/// Row and column counts of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: u32,
    pub cols: u32,
}

impl Dimensions {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Check if a position falls inside these dimensions
    pub fn contains(&self, coords: &Coordinates) -> bool {
        coords.row < self.rows && coords.col < self.cols
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

/// Per-row or per-column settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineMetadata {
    /// Custom height (rows) or width (columns); `None` = default
    pub size: Option<f64>,
    /// Line is hidden
    pub hidden: bool,
}

impl LineMetadata {
    /// Check if this line has any custom settings
    pub fn is_default(&self) -> bool {
        self.size.is_none() && !self.hidden
    }
}

/// Value of one cell before and after an update
#[derive(Debug, Clone, PartialEq)]
pub struct CellValueChange {
    pub label: String,
    pub before: CellValue,
    pub after: CellValue,
}

/// A sheet (single tab in a workbook)
///
/// Cells are keyed by label; the key and the cell's `label` field always
/// agree.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Stable identifier ("sheet-1")
    id: String,
    /// Display name ("Financials")
    name: String,
    /// Cell storage keyed by label
    cells: AHashMap<String, Cell>,
    dimensions: Dimensions,
    merged: Vec<CellRange>,
    row_metadata: BTreeMap<u32, LineMetadata>,
    col_metadata: BTreeMap<u32, LineMetadata>,
    show_gridlines: bool,
    display_formulas: bool,
}

impl Sheet {
    /// Create a new sheet with the default dimensions
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Self::with_dimensions(id, name, Dimensions::default())
    }

    /// Create a new sheet with the given dimensions
    pub fn with_dimensions<I: Into<String>, N: Into<String>>(
        id: I,
        name: N,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cells: AHashMap::new(),
            dimensions,
            merged: Vec::new(),
            row_metadata: BTreeMap::new(),
            col_metadata: BTreeMap::new(),
            show_gridlines: true,
            display_formulas: false,
        }
    }

    /// Get the sheet id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name (the workbook validates names before calling this)
    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Get the row/column counts
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Check if a position lies inside the sheet
    pub fn in_bounds(&self, coords: &Coordinates) -> bool {
        self.dimensions.contains(coords)
    }

    // === Cell Access ===

    /// Get a cell by label (e.g., "A1"); labels are matched case-insensitively
    pub fn cell(&self, label: &str) -> Result<Option<&Cell>> {
        let coords = Coordinates::parse(label)?;
        Ok(self.cell_at(coords))
    }

    /// Get a cell by position
    pub fn cell_at(&self, coords: Coordinates) -> Option<&Cell> {
        self.cells.get(&coords.label())
    }

    /// Get a cell's value by position (`Empty` when no cell is stored)
    pub fn value_at(&self, coords: Coordinates) -> &CellValue {
        self.cell_at(coords).map(|c| &c.value).unwrap_or(&EMPTY)
    }

    /// Iterate over stored cells (unordered)
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Stored cells with their positions, in row-major order
    pub fn sorted_cells(&self) -> Vec<(Coordinates, &Cell)> {
        let mut cells: Vec<_> = self
            .cells
            .values()
            .filter_map(|c| c.coordinates().ok().map(|pos| (pos, c)))
            .collect();
        cells.sort_by_key(|(pos, _)| *pos);
        cells
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    // === Cell Modification ===

    /// Merge a patch onto the cell at `coords`, creating the cell if absent
    ///
    /// Returns the cell's value before and after the update.
    pub fn update_cell(&mut self, coords: Coordinates, patch: &CellPatch) -> CellValueChange {
        let label = coords.label();
        let cell = self
            .cells
            .entry(label.clone())
            .or_insert_with(|| Cell::new(coords));
        let before = cell.value.clone();
        patch.apply(cell);
        CellValueChange {
            label,
            before,
            after: cell.value.clone(),
        }
    }

    /// Store a whole cell at `coords`, replacing any existing one
    ///
    /// The cell's label is rewritten to match the position.
    pub fn put_cell(&mut self, coords: Coordinates, mut cell: Cell) -> Option<Cell> {
        cell.label = coords.label();
        self.cells.insert(cell.label.clone(), cell)
    }

    /// Remove the cell at `coords`
    pub fn clear_cell(&mut self, coords: Coordinates) -> Option<Cell> {
        self.cells.remove(&coords.label())
    }

    /// Merge a style delta onto every cell of `range`, row by row
    ///
    /// Cells that do not exist yet are created. Returns each cell's label
    /// with its style before the merge, in the order visited. Fails if the
    /// range belongs to another sheet or extends past the sheet's
    /// dimensions; nothing is changed in that case.
    pub fn apply_style(
        &mut self,
        range: &CellRange,
        delta: &CellStyle,
    ) -> Result<Vec<(String, Option<CellStyle>)>> {
        if range.sheet_id != self.id {
            return Err(Error::InvalidRange(format!(
                "{} belongs to sheet '{}', not '{}'",
                range, range.sheet_id, self.id
            )));
        }
        if !self.in_bounds(&range.end) {
            return Err(Error::InvalidRange(format!(
                "{} is outside the sheet ({} rows x {} columns)",
                range, self.dimensions.rows, self.dimensions.cols
            )));
        }

        let mut previous = Vec::with_capacity(range.cells().len());
        for coords in range.cells() {
            let cell = self
                .cells
                .entry(coords.label())
                .or_insert_with(|| Cell::new(coords));
            previous.push((cell.label.clone(), cell.style.clone()));
            let style = cell.style.get_or_insert_with(CellStyle::default);
            style.merge(delta);
        }
        Ok(previous)
    }

    // === Range Operations ===

    /// Get the used range (bounds of all stored cells)
    pub fn used_range(&self) -> Option<CellRange> {
        let mut positions = self.cells.values().filter_map(|c| c.coordinates().ok());
        let first = positions.next()?;
        let (min, max) = positions.fold((first, first), |(min, max), p| {
            (
                Coordinates::new(min.row.min(p.row), min.col.min(p.col)),
                Coordinates::new(max.row.max(p.row), max.col.max(p.col)),
            )
        });
        Some(CellRange::new(min, max, self.id.clone()))
    }

    // === Row/Column Metadata ===

    /// Settings for a row, if any were customised
    pub fn row_metadata(&self, row: u32) -> Option<&LineMetadata> {
        self.row_metadata.get(&row)
    }

    /// Settings for a column, if any were customised
    pub fn col_metadata(&self, col: u32) -> Option<&LineMetadata> {
        self.col_metadata.get(&col)
    }

    /// Set row height
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        Self::update_line(&mut self.row_metadata, row, |m| m.size = Some(height));
    }

    /// Set row hidden state
    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        Self::update_line(&mut self.row_metadata, row, |m| m.hidden = hidden);
    }

    /// Check if row is hidden
    pub fn is_row_hidden(&self, row: u32) -> bool {
        self.row_metadata.get(&row).map_or(false, |m| m.hidden)
    }

    /// Set column width
    pub fn set_column_width(&mut self, col: u32, width: f64) {
        Self::update_line(&mut self.col_metadata, col, |m| m.size = Some(width));
    }

    /// Set column hidden state
    pub fn set_column_hidden(&mut self, col: u32, hidden: bool) {
        Self::update_line(&mut self.col_metadata, col, |m| m.hidden = hidden);
    }

    /// Check if column is hidden
    pub fn is_column_hidden(&self, col: u32) -> bool {
        self.col_metadata.get(&col).map_or(false, |m| m.hidden)
    }

    fn update_line(
        lines: &mut BTreeMap<u32, LineMetadata>,
        index: u32,
        f: impl FnOnce(&mut LineMetadata),
    ) {
        let meta = lines.entry(index).or_default();
        f(meta);
        if meta.is_default() {
            lines.remove(&index);
        }
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged
    }

    /// The merged region covering a position, if any
    pub fn merged_region_at(&self, coords: &Coordinates) -> Option<&CellRange> {
        self.merged.iter().find(|r| r.contains(coords))
    }

    /// Merge cells
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if range.sheet_id != self.id {
            return Err(Error::InvalidRange(format!(
                "{} belongs to sheet '{}'",
                range, range.sheet_id
            )));
        }
        if self.merged.iter().any(|existing| range.overlaps(existing)) {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.merged.push(range.clone());
        Ok(())
    }

    /// Unmerge cells; returns false if the region was not merged
    pub fn unmerge_cells(&mut self, range: &CellRange) -> bool {
        match self.merged.iter().position(|existing| existing == range) {
            Some(i) => {
                self.merged.remove(i);
                true
            }
            None => false,
        }
    }

    // === Display Flags ===

    /// Check if gridlines are shown
    pub fn show_gridlines(&self) -> bool {
        self.show_gridlines
    }

    /// Show or hide gridlines, returning the previous setting
    pub fn set_show_gridlines(&mut self, visible: bool) -> bool {
        std::mem::replace(&mut self.show_gridlines, visible)
    }

    /// Check if formulas are displayed instead of values
    pub fn display_formulas(&self) -> bool {
        self.display_formulas
    }

    /// Set formula display
    pub fn set_display_formulas(&mut self, display: bool) {
        self.display_formulas = display;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, FontWeight};
    use pretty_assertions::assert_eq;

    fn sheet() -> Sheet {
        Sheet::new("sheet-1", "Sheet1")
    }

    #[test]
    fn test_new_sheet_defaults() {
        let s = sheet();
        assert_eq!(s.dimensions(), Dimensions::new(100, 26));
        assert!(s.show_gridlines());
        assert!(!s.display_formulas());
        assert_eq!(s.used_range(), None);
    }

    #[test]
    fn test_update_cell_creates_and_reports_values() {
        let mut s = sheet();
        let pos = Coordinates::new(2, 2);

        let change = s.update_cell(pos, &CellPatch::new().value(42));
        assert_eq!(change.label, "C3");
        assert_eq!(change.before, CellValue::Empty);
        assert_eq!(change.after, CellValue::Number(42.0));
        assert_eq!(s.cell("C3").unwrap().unwrap().label, "C3");

        let change = s.update_cell(pos, &CellPatch::new().value("x"));
        assert_eq!(change.before, CellValue::Number(42.0));
        assert_eq!(s.value_at(pos), &CellValue::text("x"));
        assert_eq!(s.cell_count(), 1);
    }

    #[test]
    fn test_apply_style_preserves_other_keys() {
        let mut s = sheet();
        s.apply_style(
            &CellRange::parse("A1", "sheet-1").unwrap(),
            &CellStyle::new().font_size(16.0),
        )
        .unwrap();

        let prior = s
            .apply_style(
                &CellRange::parse("A1:B2", "sheet-1").unwrap(),
                &CellStyle::new().bold(true),
            )
            .unwrap();

        let labels: Vec<_> = prior.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["A1", "B1", "A2", "B2"]);
        assert_eq!(prior[0].1, Some(CellStyle::new().font_size(16.0)));
        assert_eq!(prior[1].1, None);

        let a1 = s.cell_at(Coordinates::new(0, 0)).unwrap();
        let style = a1.style.as_ref().unwrap();
        assert_eq!(style.font_size, Some(16.0));
        assert_eq!(style.font_weight, Some(FontWeight::Bold));
        assert_eq!(s.cell_count(), 4);
    }

    #[test]
    fn test_apply_style_rejects_foreign_or_out_of_bounds_range() {
        let mut s = Sheet::with_dimensions("sheet-1", "Small", Dimensions::new(5, 5));
        let delta = CellStyle::new().color(Color::RED);

        let foreign = CellRange::parse("A1", "sheet-2").unwrap();
        assert!(matches!(
            s.apply_style(&foreign, &delta),
            Err(Error::InvalidRange(_))
        ));

        let too_big = CellRange::parse("A1:F1", "sheet-1").unwrap();
        assert!(matches!(
            s.apply_style(&too_big, &delta),
            Err(Error::InvalidRange(_))
        ));
        assert_eq!(s.cell_count(), 0);
    }

    #[test]
    fn test_used_range() {
        let mut s = sheet();
        s.update_cell(Coordinates::new(3, 1), &CellPatch::new().value(1));
        s.update_cell(Coordinates::new(1, 4), &CellPatch::new().value(2));
        assert_eq!(s.used_range().unwrap().to_a1_string(), "B2:E4");
    }

    #[test]
    fn test_sorted_cells_are_row_major() {
        let mut s = sheet();
        for label in ["B2", "A2", "C1"] {
            s.update_cell(Coordinates::parse(label).unwrap(), &CellPatch::new().value(1));
        }
        let labels: Vec<_> = s.sorted_cells().iter().map(|(_, c)| c.label.clone()).collect();
        assert_eq!(labels, vec!["C1", "A2", "B2"]);
    }

    #[test]
    fn test_merge_cells_rejects_overlap() {
        let mut s = sheet();
        s.merge_cells(&CellRange::parse("A1:B2", "sheet-1").unwrap())
            .unwrap();
        assert_eq!(
            s.merge_cells(&CellRange::parse("B2:C3", "sheet-1").unwrap()),
            Err(Error::MergedCellConflict("B2:C3".into()))
        );
        assert!(s.merged_region_at(&Coordinates::new(1, 1)).is_some());
        assert!(s.unmerge_cells(&CellRange::parse("A1:B2", "sheet-1").unwrap()));
        assert!(s.merged_regions().is_empty());
    }

    #[test]
    fn test_line_metadata() {
        let mut s = sheet();
        s.set_row_hidden(3, true);
        s.set_column_width(1, 120.0);
        assert!(s.is_row_hidden(3));
        assert_eq!(s.col_metadata(1).unwrap().size, Some(120.0));

        s.set_row_hidden(3, false);
        assert!(s.row_metadata(3).is_none());
    }

    #[test]
    fn test_toggle_gridlines_returns_previous() {
        let mut s = sheet();
        assert!(s.set_show_gridlines(false));
        assert!(!s.set_show_gridlines(false));
        assert!(!s.show_gridlines());
    }
}
