//! Request types for the PTO burn API.
//!
//! Spreadsheet endpoints take the file as the raw request body and their
//! options as query parameters. `/calculate` takes the table as JSON.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::CurrentHoursStrategy;
use crate::io::SpreadsheetFormat;
use crate::models::{Cell, RawTable};

use super::response::ApiError;

/// Query parameters accepted by the spreadsheet endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterQuery {
    /// Fixed current hours. When absent the weekly decay strategy is used.
    #[serde(default)]
    pub current_hours: Option<String>,
    /// Date to evaluate the weekly decay at; defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// Format of the uploaded body; detected from the content when absent.
    #[serde(default)]
    pub format: Option<SpreadsheetFormat>,
    /// Format of the exported file (export endpoint only); defaults to xlsx.
    #[serde(default)]
    pub export: Option<SpreadsheetFormat>,
}

impl RosterQuery {
    /// Builds the current-hours strategy, using `today` when no `as_of` is given.
    pub fn strategy(&self, today: NaiveDate) -> Result<CurrentHoursStrategy, ApiError> {
        let current_hours = match self.current_hours.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Decimal::from_str(raw).map_err(|_| {
                ApiError::validation_error(format!(
                    "current_hours must be a number, got '{}'",
                    raw
                ))
            })?),
        };
        Ok(CurrentHoursStrategy::from_inputs(
            current_hours,
            self.as_of.unwrap_or(today),
        ))
    }
}

/// A table cell in a JSON request: a number, boolean, string or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestCell {
    /// A numeric cell.
    Number(f64),
    /// A boolean cell.
    Bool(bool),
    /// A text cell.
    Text(String),
}

impl From<Option<RequestCell>> for Cell {
    fn from(cell: Option<RequestCell>) -> Self {
        match cell {
            None => Cell::Empty,
            Some(RequestCell::Number(n)) => Cell::Number(n),
            Some(RequestCell::Bool(b)) => Cell::Bool(b),
            Some(RequestCell::Text(s)) => Cell::from(s.as_str()),
        }
    }
}

/// Request body for the `/calculate` endpoint.
///
/// # Example
///
/// ```
/// use pto_burn::api::RosterRequest;
///
/// let request: RosterRequest = serde_json::from_str(r#"{
///     "current_hours": "580",
///     "headers": ["Employee Name", "Pay Type", "Regular Hours"],
///     "rows": [["Alice", "R", 1320.5], [null, "V", "8"]]
/// }"#).unwrap();
/// assert_eq!(request.rows.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRequest {
    /// Fixed current hours. When absent the weekly decay strategy is used.
    #[serde(default)]
    pub current_hours: Option<Decimal>,
    /// Date to evaluate the weekly decay at; defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// Column names.
    pub headers: Vec<String>,
    /// Data rows in source order.
    #[serde(default)]
    pub rows: Vec<Vec<Option<RequestCell>>>,
}

impl RosterRequest {
    /// The current-hours strategy requested, using `today` when no `as_of` is given.
    pub fn strategy(&self, today: NaiveDate) -> CurrentHoursStrategy {
        CurrentHoursStrategy::from_inputs(self.current_hours, self.as_of.unwrap_or(today))
    }

    /// Converts the request's table into a raw table.
    pub fn into_table(self) -> RawTable {
        let rows = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(Cell::from).collect())
            .collect();
        RawTable::new(self.headers, rows)
    }
}
