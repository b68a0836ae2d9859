//! History log
//!
//! An append-only record of applied workbook mutations. Entries carry the
//! before/after data needed for undo, but nothing replays them yet.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use ledger_sheets_core::{CellRange, CellStyle, CellValue};

/// Kind tag of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    CellEdit,
    StyleApplied,
    GridlinesToggled,
    ActiveSheetChanged,
    SheetAdded,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::CellEdit => "cell_edit",
            ChangeKind::StyleApplied => "style_applied",
            ChangeKind::GridlinesToggled => "gridlines_toggled",
            ChangeKind::ActiveSheetChanged => "active_sheet_changed",
            ChangeKind::SheetAdded => "sheet_added",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Before/after snapshot of one mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    CellEdit {
        label: String,
        before: CellValue,
        after: CellValue,
    },
    StyleApplied {
        range: CellRange,
        delta: CellStyle,
        /// Each cell's style before the merge, row-major
        previous: Vec<(String, Option<CellStyle>)>,
    },
    GridlinesToggled {
        before: bool,
        after: bool,
    },
    ActiveSheetChanged {
        before: String,
        after: String,
    },
    SheetAdded {
        sheet_id: String,
        name: String,
    },
}

impl Change {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::CellEdit { .. } => ChangeKind::CellEdit,
            Change::StyleApplied { .. } => ChangeKind::StyleApplied,
            Change::GridlinesToggled { .. } => ChangeKind::GridlinesToggled,
            Change::ActiveSheetChanged { .. } => ChangeKind::ActiveSheetChanged,
            Change::SheetAdded { .. } => ChangeKind::SheetAdded,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::CellEdit {
                label,
                before,
                after,
            } => write!(f, "{}: {:?} -> {:?}", label, before.to_string(), after.to_string()),
            Change::StyleApplied {
                range, previous, ..
            } => write!(f, "{} ({} cells)", range, previous.len()),
            Change::GridlinesToggled { before, after } => {
                write!(f, "gridlines {} -> {}", before, after)
            }
            Change::ActiveSheetChanged { before, after } => write!(f, "{} -> {}", before, after),
            Change::SheetAdded { sheet_id, name } => write!(f, "{} \"{}\"", sheet_id, name),
        }
    }
}

/// One recorded mutation
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Position in the log, starting at 1; never reused
    pub sequence: u64,
    /// Sheet the mutation applied to
    pub sheet_id: String,
    /// Id of the user whose action produced the entry
    pub author: String,
    pub change: Change,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn kind(&self) -> ChangeKind {
        self.change.kind()
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} [{}] {}",
            self.sequence,
            self.kind(),
            self.sheet_id,
            self.change
        )
    }
}

/// Append-only log of mutations
///
/// Unbounded by default. With a limit, the oldest entries are dropped once
/// the log holds more than `limit` entries; sequence numbers keep counting.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    next_sequence: u64,
    limit: Option<usize>,
}

impl History {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` entries (`None` = unbounded)
    ///
    /// A limit of 0 is raised to 1: the latest entry is always retained.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|l| l.max(1)),
            ..Self::default()
        }
    }

    /// Append an entry and return it
    pub fn record<S: Into<String>, A: Into<String>>(
        &mut self,
        sheet_id: S,
        author: A,
        change: Change,
    ) -> &HistoryEntry {
        self.next_sequence += 1;
        self.entries.push_back(HistoryEntry {
            sequence: self.next_sequence,
            sheet_id: sheet_id.into(),
            author: author.into(),
            change,
            recorded_at: Utc::now(),
        });
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
        &self.entries[self.entries.len() - 1]
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries ever recorded, including dropped ones
    pub fn total_recorded(&self) -> u64 {
        self.next_sequence
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Iterate oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Entries for one sheet, oldest first
    pub fn for_sheet<'a>(&'a self, sheet_id: &'a str) -> impl Iterator<Item = &'a HistoryEntry> {
        self.entries.iter().filter(move |e| e.sheet_id == sheet_id)
    }
}
