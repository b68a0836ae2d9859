//! Cell coordinates, labels and ranges
//!
//! A label is column letters followed by a 1-based row number ("B3").
//! Coordinates are the zero-based `(row, col)` pair behind it. Column
//! letters use A=1..Z=26 digits accumulated as `value * 26 + digit`, with
//! the column index being `value - 1`, so `Z` is 25 and `AA` is 26.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Zero-based position of a cell
///
/// Ordering is row-major: `(row, col)` compared lexicographically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coordinates {
    /// Row index (0-based internally, 1-based in labels)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., Z=25, AA=26)
    pub col: u32,
}

impl Coordinates {
    /// Create new coordinates
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Format as a label ("A1")
    pub fn label(&self) -> String {
        encode(*self)
    }

    /// Parse a label into coordinates
    ///
    /// # Examples
    /// ```
    /// use ledger_sheets_core::Coordinates;
    ///
    /// let c = Coordinates::parse("C3").unwrap();
    /// assert_eq!(c, Coordinates::new(2, 2));
    /// ```
    pub fn parse(label: &str) -> Result<Self> {
        decode(label)
    }

    /// Create a single-cell range at this position
    pub fn to_range<S: Into<String>>(&self, sheet_id: S) -> CellRange {
        CellRange::single(*self, sheet_id)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_to_letters(self.col), self.row as u64 + 1)
    }
}

impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

/// Convert coordinates to a label (`{row: 9, col: 26}` -> "AA10")
pub fn encode(coords: Coordinates) -> String {
    coords.to_string()
}

/// Convert a label back to coordinates
///
/// Letters are case-insensitive. Fails with [`Error::InvalidLabel`] when the
/// label has no alphabetic prefix, no numeric suffix, trailing characters,
/// a row number of 0, or a value that does not fit in `u32`.
pub fn decode(label: &str) -> Result<Coordinates> {
    let bytes = label.as_bytes();
    let letters_end = bytes
        .iter()
        .position(|b| !b.is_ascii_alphabetic())
        .unwrap_or(bytes.len());

    if letters_end == 0 {
        return Err(Error::InvalidLabel(format!(
            "no column letters in '{}'",
            label
        )));
    }

    let digits = &label[letters_end..];
    if digits.is_empty() {
        return Err(Error::InvalidLabel(format!("no row number in '{}'", label)));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidLabel(format!(
            "unexpected characters after column letters in '{}'",
            label
        )));
    }

    let col = letters_to_column(&label[..letters_end])?;

    let row_number: u64 = digits
        .parse()
        .map_err(|_| Error::InvalidLabel(format!("row number out of range in '{}'", label)))?;
    if row_number == 0 {
        return Err(Error::InvalidLabel(format!(
            "row number must be >= 1 in '{}'",
            label
        )));
    }
    let row = u32::try_from(row_number - 1)
        .map_err(|_| Error::InvalidLabel(format!("row number out of range in '{}'", label)))?;

    Ok(Coordinates { row, col })
}

/// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col as u64 + 1;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidLabel("empty column letters".into()));
    }

    let mut value: u64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidLabel(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        let digit = c.to_ascii_uppercase() as u64 - 'A' as u64 + 1;
        value = value
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| Error::InvalidLabel(format!("column '{}' out of range", letters)))?;
    }

    u32::try_from(value - 1)
        .map_err(|_| Error::InvalidLabel(format!("column '{}' out of range", letters)))
}

/// An inclusive rectangle of cells on one sheet (e.g. "A1:B10" on "sheet-1")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    /// Top-left corner
    pub start: Coordinates,
    /// Bottom-right corner
    pub end: Coordinates,
    /// Owning sheet id
    pub sheet_id: String,
}

impl CellRange {
    /// Create a new cell range
    ///
    /// The corners are normalized so `start` is top-left and `end` is bottom-right.
    pub fn new<S: Into<String>>(a: Coordinates, b: Coordinates, sheet_id: S) -> Self {
        Self {
            start: Coordinates::new(a.row.min(b.row), a.col.min(b.col)),
            end: Coordinates::new(a.row.max(b.row), a.col.max(b.col)),
            sheet_id: sheet_id.into(),
        }
    }

    /// Create a single-cell range
    pub fn single<S: Into<String>>(coords: Coordinates, sheet_id: S) -> Self {
        Self {
            start: coords,
            end: coords,
            sheet_id: sheet_id.into(),
        }
    }

    /// Parse a range from "A1:B10" notation (a bare label is a 1x1 range)
    pub fn parse<S: Into<String>>(s: &str, sheet_id: S) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((a, b)) => {
                let start = decode(a.trim())
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                let end = decode(b.trim())
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                Ok(Self::new(start, end, sheet_id))
            }
            None => {
                let coords =
                    decode(s).map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                Ok(Self::single(coords, sheet_id))
            }
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, coords: &Coordinates) -> bool {
        coords.row >= self.start.row
            && coords.row <= self.end.row
            && coords.col >= self.start.col
            && coords.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u64 {
        self.end.row.saturating_sub(self.start.row) as u64 + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u64 {
        self.end.col.saturating_sub(self.start.col) as u64 + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count().saturating_mul(self.col_count())
    }

    /// Check if this range overlaps with another on the same sheet
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.sheet_id == other.sheet_id
            && self.start.row <= other.end.row
            && self.end.row >= other.start.row
            && self.start.col <= other.end.col
            && self.end.col >= other.start.col
    }

    /// Iterate over all coordinates in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            start_col: self.start.col,
            end: self.end,
            next: Some(self.start),
            remaining: self.cell_count(),
        }
    }

    /// Format as "A1:B10" (or "A1" for a single cell)
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.to_string()
        } else {
            format!("{}:{}", self.start, self.end)
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

/// Row-major iterator over the coordinates of a [`CellRange`]
pub struct CellRangeIterator {
    start_col: u32,
    end: Coordinates,
    next: Option<Coordinates>,
    remaining: u64,
}

impl Iterator for CellRangeIterator {
    type Item = Coordinates;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        self.next = if current.col < self.end.col {
            Some(Coordinates::new(current.row, current.col + 1))
        } else if current.row < self.end.row {
            Some(Coordinates::new(current.row + 1, self.start_col))
        } else {
            None
        };
        self.remaining = self.remaining.saturating_sub(1);

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl ExactSizeIterator for CellRangeIterator {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(1), "B");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(27), "AB");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(702), "AAA");
        assert_eq!(column_to_letters(16383), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 0);
        assert_eq!(letters_to_column("Z").unwrap(), 25);
        assert_eq!(letters_to_column("AA").unwrap(), 26);
        assert_eq!(letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(letters_to_column("AAA").unwrap(), 702);

        // Case insensitive
        assert_eq!(letters_to_column("a").unwrap(), 0);
        assert_eq!(letters_to_column("aA").unwrap(), 26);
    }

    #[test]
    fn test_letters_to_column_overflow() {
        let huge = "Z".repeat(20);
        assert!(matches!(
            letters_to_column(&huge),
            Err(Error::InvalidLabel(_))
        ));
    }

    #[test]
    fn test_encode_known_labels() {
        assert_eq!(encode(Coordinates::new(0, 0)), "A1");
        assert_eq!(encode(Coordinates::new(0, 25)), "Z1");
        assert_eq!(encode(Coordinates::new(9, 26)), "AA10");
        assert_eq!(encode(Coordinates::new(2, 2)), "C3");
    }

    #[test]
    fn test_decode_known_labels() {
        assert_eq!(decode("A1").unwrap(), Coordinates::new(0, 0));
        assert_eq!(decode("B3").unwrap(), Coordinates::new(2, 1));
        assert_eq!(decode("AA10").unwrap(), Coordinates::new(9, 26));
        assert_eq!(decode("c3").unwrap(), Coordinates::new(2, 2));
    }

    #[test]
    fn test_decode_invalid_labels() {
        for bad in ["", "1", "123", "A", "ABC", "1A", "A0", "A 1", "A1B", "A-1", "$A$1", "A+1"] {
            assert!(
                matches!(decode(bad), Err(Error::InvalidLabel(_))),
                "expected InvalidLabel for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_decode_row_out_of_range() {
        assert!(decode("A4294967297").is_err());
        assert_eq!(
            decode("A4294967296").unwrap(),
            Coordinates::new(u32::MAX, 0)
        );
    }

    #[test]
    fn test_coordinates_order_is_row_major() {
        assert!(Coordinates::new(0, 5) < Coordinates::new(1, 0));
        assert!(Coordinates::new(1, 0) < Coordinates::new(1, 1));
    }

    #[test]
    fn test_cell_range_normalizes() {
        let range = CellRange::new(Coordinates::new(4, 3), Coordinates::new(1, 1), "s");
        assert_eq!(range.start, Coordinates::new(1, 1));
        assert_eq!(range.end, Coordinates::new(4, 3));
    }

    #[test]
    fn test_cell_range_parse() {
        let range = CellRange::parse("A1:B2", "sheet-1").unwrap();
        assert_eq!(range.start, Coordinates::new(0, 0));
        assert_eq!(range.end, Coordinates::new(1, 1));
        assert_eq!(range.sheet_id, "sheet-1");

        let range = CellRange::parse("C3", "sheet-1").unwrap();
        assert_eq!(range.start, range.end);

        assert!(matches!(
            CellRange::parse("A1:", "sheet-1"),
            Err(Error::InvalidRange(_))
        ));
    }

    #[test]
    fn test_cell_range_contains_and_counts() {
        let range = CellRange::parse("B2:D4", "s").unwrap();
        assert!(range.contains(&Coordinates::new(1, 1)));
        assert!(range.contains(&Coordinates::new(3, 3)));
        assert!(!range.contains(&Coordinates::new(0, 0)));
        assert!(!range.contains(&Coordinates::new(4, 1)));
        assert_eq!(range.row_count(), 3);
        assert_eq!(range.col_count(), 3);
        assert_eq!(range.cell_count(), 9);
    }

    #[test]
    fn test_overlaps_requires_same_sheet() {
        let a = CellRange::parse("A1:B2", "s1").unwrap();
        let b = CellRange::parse("B2:C3", "s1").unwrap();
        let c = CellRange::parse("B2:C3", "s2").unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_cell_range_iterator_is_row_major() {
        let range = CellRange::parse("A1:B2", "s").unwrap();
        let cells: Vec<_> = range.cells().map(|c| c.to_string()).collect();
        assert_eq!(cells, vec!["A1", "B1", "A2", "B2"]);
        assert_eq!(range.cells().len(), 4);
    }

    #[test]
    fn test_cell_range_iterator_at_domain_edge() {
        let edge = Coordinates::new(u32::MAX, u32::MAX);
        let range = CellRange::single(edge, "s");
        let cells: Vec<_> = range.cells().collect();
        assert_eq!(cells, vec![edge]);
    }
}
