//! A1-style range addresses scoped to a sheet
//!
//! These render the strings the host's value endpoints accept, such as
//! `Sheet1!A1:CU` (open-ended downward) or `'Q1 Data'!B2:D10`.

use std::fmt;

use crate::column::column_to_letters;
use crate::error::{Error, ErrorKind, Result};

/// How many rows or columns an operation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extent {
    /// Everything from the first row/column onward
    #[default]
    All,
    /// A fixed number of rows/columns; `Count(0)` behaves like `All`
    Count(u32),
}

impl Extent {
    /// The explicit count, if any.
    pub fn count(self) -> Option<u32> {
        match self {
            Extent::Count(n) if n > 0 => Some(n),
            _ => None,
        }
    }

    /// The explicit count, or `default` for `All`.
    pub fn or(self, default: u32) -> u32 {
        self.count().unwrap_or(default)
    }

    /// Whether this extent covers everything.
    pub fn is_all(self) -> bool {
        self.count().is_none()
    }
}

impl From<u32> for Extent {
    fn from(n: u32) -> Self {
        if n == 0 {
            Extent::All
        } else {
            Extent::Count(n)
        }
    }
}

impl From<Option<u32>> for Extent {
    fn from(n: Option<u32>) -> Self {
        n.map_or(Extent::All, Extent::from)
    }
}

/// A rectangular region given by its 1-based top-left corner and its extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// First row (1-based)
    pub first_row: u32,
    /// First column (1-based, A = 1)
    pub first_col: u32,
    /// Number of rows
    pub rows: Extent,
    /// Number of columns
    pub columns: Extent,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            first_row: 1,
            first_col: 1,
            rows: Extent::All,
            columns: Extent::All,
        }
    }
}

impl Span {
    /// Create a span
    pub fn new(first_row: u32, first_col: u32, rows: Extent, columns: Extent) -> Self {
        Self {
            first_row,
            first_col,
            rows,
            columns,
        }
    }

    /// Span starting at the given corner and covering everything below/right of it
    pub fn from_corner(first_row: u32, first_col: u32) -> Self {
        Self {
            first_row,
            first_col,
            ..Self::default()
        }
    }

    /// Replace the row extent
    pub fn with_rows(mut self, rows: Extent) -> Self {
        self.rows = rows;
        self
    }

    /// Replace the column extent
    pub fn with_columns(mut self, columns: Extent) -> Self {
        self.columns = columns;
        self
    }

    /// Check that the corner is 1-based and that explicit extents end
    /// inside the `u32` index space.
    pub fn validate(&self) -> Result<()> {
        if self.first_row == 0 {
            return Err(Error::new(ErrorKind::InvalidRow, "first row must be >= 1"));
        }
        if self.first_col == 0 {
            return Err(Error::new(
                ErrorKind::InvalidColumn,
                "first column must be >= 1",
            ));
        }
        if let Some(rows) = self.rows.count() {
            last_index(self.first_row, rows, ErrorKind::InvalidRow)?;
        }
        if let Some(columns) = self.columns.count() {
            last_index(self.first_col, columns, ErrorKind::InvalidColumn)?;
        }
        Ok(())
    }
}

/// 1-based index of the last of `count` items starting at `first`.
fn last_index(first: u32, count: u32, kind: ErrorKind) -> Result<u32> {
    first
        .checked_add(count - 1)
        .ok_or_else(|| {
            Error::new(kind, format!("{count} items from {first} overflow the grid"))
        })
}

/// Quote a sheet name for use in an A1 address when it needs it.
///
/// Plain names (ASCII letters, digits and `_`, not starting with a digit) are
/// left alone; everything else is wrapped in single quotes with embedded
/// quotes doubled.
pub fn quote_sheet_name(name: &str) -> String {
    let plain = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !looks_like_cell(name);

    if plain {
        name.to_string()
    } else {
        quoted_sheet_name(name)
    }
}

/// Always wrap a sheet name in single quotes, doubling embedded quotes.
///
/// A quoted name is never read as a cell reference, so this is the safe form
/// for addressing a whole tab.
pub fn quoted_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// Whether `name` parses as an A1 (`AB12`) or R1C1 (`R1C1`, `RC`) cell.
fn looks_like_cell(name: &str) -> bool {
    let bytes = name.as_bytes();

    // A1: one to three letters, then digits
    let letters = bytes.iter().take_while(|b| b.is_ascii_alphabetic()).count();
    let a1 = (1..=3).contains(&letters)
        && bytes.len() > letters
        && bytes[letters..].iter().all(u8::is_ascii_digit);

    // R1C1: R, optional digits, C, optional digits
    let upper = name.to_ascii_uppercase();
    let r1c1 = upper
        .strip_prefix('R')
        .map(|rest| rest.trim_start_matches(|c: char| c.is_ascii_digit()))
        .and_then(|rest| rest.strip_prefix('C'))
        .is_some_and(|rest| rest.bytes().all(|b| b.is_ascii_digit()));

    a1 || r1c1
}

/// A single cell on a named sheet, e.g. `Sheet1!C5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct A1Cell {
    pub sheet_name: String,
    pub row: u32,
    pub col: u32,
}

impl A1Cell {
    /// Create a cell address, rejecting a zero row or column.
    pub fn new(sheet_name: impl Into<String>, row: u32, col: u32) -> Result<Self> {
        Span::from_corner(row, col).validate()?;
        Ok(Self {
            sheet_name: sheet_name.into(),
            row,
            col,
        })
    }
}

impl fmt::Display for A1Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!{}{}",
            quote_sheet_name(&self.sheet_name),
            column_to_letters(self.col),
            self.row
        )
    }
}

/// A rectangular range on a named sheet, e.g. `Sheet1!A1:CU` or `Sheet1!B2:D10`.
///
/// The column count is always concrete; an `All` row extent leaves the
/// trailing row number off so the range runs to the bottom of the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct A1Range {
    pub sheet_name: String,
    pub first_row: u32,
    pub first_col: u32,
    pub rows: Extent,
    pub columns: u32,
}

impl A1Range {
    /// Create a range address, rejecting a zero row, column or width and
    /// extents that run past `u32::MAX`.
    pub fn new(
        sheet_name: impl Into<String>,
        first_row: u32,
        first_col: u32,
        rows: Extent,
        columns: u32,
    ) -> Result<Self> {
        if columns == 0 {
            return Err(Error::new(
                ErrorKind::InvalidColumn,
                "column count must be >= 1",
            ));
        }
        Span::new(first_row, first_col, rows, Extent::Count(columns)).validate()?;
        Ok(Self {
            sheet_name: sheet_name.into(),
            first_row,
            first_col,
            rows,
            columns,
        })
    }

    /// Last column (1-based) covered by the range
    pub fn last_col(&self) -> u32 {
        self.first_col
            .saturating_add(self.columns.saturating_sub(1))
    }

    /// Last row (1-based), or `None` when the range is open-ended
    pub fn last_row(&self) -> Option<u32> {
        self.rows
            .count()
            .map(|n| self.first_row.saturating_add(n - 1))
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!{}{}:{}",
            quote_sheet_name(&self.sheet_name),
            column_to_letters(self.first_col),
            self.first_row,
            column_to_letters(self.last_col()),
        )?;
        if let Some(last_row) = self.last_row() {
            write!(f, "{}", last_row)?;
        }
        Ok(())
    }
}
