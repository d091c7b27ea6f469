//! Raw spreadsheet table model.
//!
//! This module contains the [`RawTable`] and [`Cell`] types that hold a
//! worksheet exactly as it was read, before any roster cleaning happens.

use serde::{Deserialize, Serialize};

static EMPTY_CELL: Cell = Cell::Empty;

/// A single spreadsheet cell value.
///
/// # Example
///
/// ```
/// use pto_burn::models::Cell;
///
/// assert_eq!(Cell::Number(40.0).raw_text(), "40");
/// assert_eq!(Cell::Number(1320.5).raw_text(), "1320.5");
/// assert_eq!(Cell::Text("12 0.5".to_string()).raw_text(), "12 0.5");
/// assert!(Cell::Text(String::new()).is_missing());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// No value in the cell.
    Empty,
    /// Text content.
    Text(String),
    /// Numeric content.
    Number(f64),
    /// Boolean content.
    Bool(bool),
}

impl Cell {
    /// Returns the string representation of the cell.
    ///
    /// Numbers use Rust's shortest round-trip formatting, so a whole
    /// number prints without a fractional part.
    pub fn raw_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(true) => "TRUE".to_string(),
            Cell::Bool(false) => "FALSE".to_string(),
        }
    }

    /// Returns true if the cell is empty or holds an empty string.
    ///
    /// Whitespace-only text is a value, not a missing cell.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the cell text, or `None` when the cell is missing.
    pub fn as_present_text(&self) -> Option<String> {
        if self.is_missing() {
            None
        } else {
            Some(self.raw_text())
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// A worksheet as read from a spreadsheet: one header row plus data rows.
///
/// Rows may be shorter than the header; absent trailing cells read as
/// [`Cell::Empty`].
///
/// # Example
///
/// ```
/// use pto_burn::models::{Cell, RawTable};
///
/// let table = RawTable::new(
///     vec!["Employee Name".to_string(), "Pay Type".to_string()],
///     vec![vec![Cell::from("Alice"), Cell::from("R")]],
/// );
/// assert_eq!(table.column_index("Pay Type"), Some(1));
/// assert_eq!(table.cell(0, 1), &Cell::from("R"));
/// assert_eq!(table.cell(0, 5), &Cell::Empty);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column names from the header row.
    pub headers: Vec<String>,
    /// Data rows in source order.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Creates a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows (the header is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds a column by header name, ignoring surrounding whitespace in the header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Returns the cell at `row`, `col`, or an empty cell when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Returns every cell of one column in row order.
    pub fn column(&self, col: usize) -> Vec<&Cell> {
        (0..self.rows.len()).map(|row| self.cell(row, col)).collect()
    }
}
