//! Named range definitions
//!
//! A named range gives a readable name to a range of cells on one sheet.
//! Names are case-insensitive: "TaxRate" and "TAXRATE" are the same name.

use ahash::AHashMap;

use crate::cell::{decode, CellRange};
use crate::error::{Error, Result};

/// A named range definition
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRange {
    /// The name as it was defined (e.g., "Revenue")
    pub name: String,
    /// The cells the name refers to, including the owning sheet id
    pub range: CellRange,
    /// Optional comment/description
    pub comment: Option<String>,
}

impl NamedRange {
    /// Create a new named range
    pub fn new(name: impl Into<String>, range: CellRange) -> Self {
        Self {
            name: name.into(),
            range,
            comment: None,
        }
    }

    /// Set a comment for this named range
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Check that a name is usable for a named range
///
/// A name starts with a letter or `_`, continues with letters, digits,
/// `_` or `.`, and must not read as a cell label.
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err(Error::InvalidName("name cannot be empty".into())),
        Some(c) if !(c.is_alphabetic() || c == '_') => {
            return Err(Error::InvalidName(format!(
                "'{}' must start with a letter or underscore",
                name
            )))
        }
        Some(_) => {}
    }
    if let Some(c) = chars.find(|c| !(c.is_alphanumeric() || *c == '_' || *c == '.')) {
        return Err(Error::InvalidName(format!(
            "'{}' contains invalid character '{}'",
            name, c
        )));
    }
    if decode(name).is_ok() {
        return Err(Error::InvalidName(format!(
            "'{}' conflicts with a cell label",
            name
        )));
    }
    Ok(())
}

/// Collection of named ranges with case-insensitive lookup
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NamedRangeCollection {
    /// Named ranges stored by lowercase name
    ranges: AHashMap<String, NamedRange>,
}

impl NamedRangeCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a new named range
    ///
    /// Fails if the name is invalid or already defined.
    pub fn define(&mut self, range: NamedRange) -> Result<()> {
        validate_name(&range.name)?;
        let key = range.name.to_lowercase();
        if self.ranges.contains_key(&key) {
            return Err(Error::DuplicateName(range.name));
        }
        self.ranges.insert(key, range);
        Ok(())
    }

    /// Get a named range by name
    pub fn get(&self, name: &str) -> Option<&NamedRange> {
        self.ranges.get(&name.to_lowercase())
    }

    /// Remove a named range
    pub fn remove(&mut self, name: &str) -> Option<NamedRange> {
        self.ranges.remove(&name.to_lowercase())
    }

    /// Check if a name is defined
    pub fn contains(&self, name: &str) -> bool {
        self.ranges.contains_key(&name.to_lowercase())
    }

    /// Iterate over all named ranges (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &NamedRange> {
        self.ranges.values()
    }

    /// Named ranges that point into a sheet
    pub fn for_sheet<'a>(&'a self, sheet_id: &'a str) -> impl Iterator<Item = &'a NamedRange> {
        self.ranges
            .values()
            .filter(move |r| r.range.sheet_id == sheet_id)
    }

    /// Get the number of named ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
