//! Roster cleaning and remaining-hours computation.
//!
//! Payroll exports print the employee name only on the first line of each
//! employee's block. The transform carries names down, keeps the regular
//! pay lines, parses their hours and appends remaining hours:
//!
//! 1. reject a table without data rows
//! 2. forward-fill `Employee Name` (empty cells inherit the name above)
//! 3. keep rows whose `Pay Type` is the policy's regular code
//! 4. drop rows that still have no non-blank name
//! 5. parse `Regular Hours` with all whitespace removed; one bad cell fails the upload
//! 6. compute `Remaining Hours`
//! 7. round both hour columns to 2 decimal places

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EMPLOYEE_NAME_COLUMN, PAY_TYPE_COLUMN, REGULAR_HOURS_COLUMN, RawTable, RosterRow, RosterTable,
    TransformSummary,
};

use super::accrual::AccrualCalculator;

/// Decimal places kept in the hour columns of the result.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Fills missing names from the nearest preceding present name.
///
/// Returns the filled names and how many cells were filled. Names before
/// the first present one stay `None`.
///
/// # Example
///
/// ```
/// use pto_burn::calculation::forward_fill_names;
///
/// let names = vec![Some("Alice".to_string()), None, None, Some("Bob".to_string()), None];
/// let (filled, count) = forward_fill_names(&names);
/// let filled: Vec<&str> = filled.iter().map(|n| n.as_deref().unwrap()).collect();
/// assert_eq!(filled, vec!["Alice", "Alice", "Alice", "Bob", "Bob"]);
/// assert_eq!(count, 3);
/// ```
pub fn forward_fill_names(names: &[Option<String>]) -> (Vec<Option<String>>, usize) {
    let mut last: Option<&String> = None;
    let mut filled_count = 0;

    let filled = names
        .iter()
        .map(|name| match name {
            Some(name) => {
                last = Some(name);
                Some(name.clone())
            }
            None => {
                if last.is_some() {
                    filled_count += 1;
                }
                last.cloned()
            }
        })
        .collect();

    (filled, filled_count)
}

/// Parses a `Regular Hours` cell after removing every whitespace character.
///
/// Plain decimals and scientific notation are accepted. Returns `None`
/// for empty or non-numeric text.
///
/// # Example
///
/// ```
/// use pto_burn::calculation::parse_regular_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(parse_regular_hours("12 0.5"), Some(Decimal::from_str("120.5").unwrap()));
/// assert_eq!(parse_regular_hours("abc"), None);
/// ```
pub fn parse_regular_hours(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Rounds an hours value to [`DISPLAY_DECIMAL_PLACES`], halves to even.
pub fn round_for_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

fn require_column(table: &RawTable, name: &str) -> EngineResult<usize> {
    table
        .column_index(name)
        .ok_or_else(|| EngineError::MissingColumn {
            column: name.to_string(),
        })
}

/// Cleans a raw payroll table and computes remaining hours for each regular line.
///
/// This is a pure function of its inputs: row order is preserved and the
/// output never has more rows than the input.
///
/// # Errors
///
/// - `EmptyInput` when the table has no data rows
/// - `MissingColumn` when `Employee Name`, `Pay Type` or `Regular Hours` is absent
/// - `NumericParse` when a kept row's `Regular Hours` is not a number
/// - `HoursOutOfRange` when a kept row's remaining hours overflow
///
/// # Example
///
/// ```
/// use pto_burn::calculation::{compute_roster, AccrualCalculator, CurrentHoursStrategy};
/// use pto_burn::config::AccrualPolicy;
/// use pto_burn::models::{Cell, RawTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = RawTable::new(
///     vec!["Employee Name".into(), "Pay Type".into(), "Regular Hours".into()],
///     vec![
///         vec![Cell::from("Alice"), Cell::from("R"), Cell::from("1320.5")],
///         vec![Cell::Empty, Cell::from("V"), Cell::from("8")],
///     ],
/// );
/// let calculator = AccrualCalculator::new(
///     AccrualPolicy::default(),
///     CurrentHoursStrategy::Fixed { current_hours: Decimal::from(580) },
/// ).unwrap();
///
/// let roster = compute_roster(&table, &calculator).unwrap();
/// assert_eq!(roster.rows.len(), 1);
/// assert_eq!(roster.rows[0].remaining_hours, Decimal::from_str("25.5").unwrap());
/// ```
pub fn compute_roster(table: &RawTable, calculator: &AccrualCalculator) -> EngineResult<RosterTable> {
    if table.is_empty() {
        return Err(EngineError::EmptyInput);
    }

    let name_col = require_column(table, EMPLOYEE_NAME_COLUMN)?;
    let pay_type_col = require_column(table, PAY_TYPE_COLUMN)?;
    let hours_col = require_column(table, REGULAR_HOURS_COLUMN)?;

    let regular_code = calculator.policy().regular_pay_type.as_str();
    let mut summary = TransformSummary {
        input_rows: table.row_count(),
        ..TransformSummary::default()
    };

    let names: Vec<Option<String>> = table
        .column(name_col)
        .into_iter()
        .map(|cell| cell.as_present_text())
        .collect();
    let (filled_names, names_filled) = forward_fill_names(&names);
    summary.names_filled = names_filled;

    let mut rows = Vec::new();
    for (idx, name) in filled_names.into_iter().enumerate() {
        let pay_type = table.cell(idx, pay_type_col).raw_text();
        if pay_type != regular_code {
            summary.filtered_pay_type += 1;
            continue;
        }

        let employee_name = match name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                summary.dropped_blank_name += 1;
                continue;
            }
        };

        let raw_hours = table.cell(idx, hours_col).raw_text();
        let regular_hours =
            parse_regular_hours(&raw_hours).ok_or_else(|| EngineError::NumericParse {
                row: idx + 1,
                value: raw_hours.clone(),
            })?;
        let remaining_hours = calculator.remaining_hours(regular_hours).ok_or_else(|| {
            EngineError::HoursOutOfRange {
                row: idx + 1,
                value: raw_hours.clone(),
            }
        })?;

        rows.push(RosterRow {
            employee_name,
            pay_type,
            regular_hours: round_for_display(regular_hours),
            remaining_hours: round_for_display(remaining_hours),
        });
    }

    summary.output_rows = rows.len();
    debug!(
        input_rows = summary.input_rows,
        names_filled = summary.names_filled,
        filtered_pay_type = summary.filtered_pay_type,
        dropped_blank_name = summary.dropped_blank_name,
        output_rows = summary.output_rows,
        "Roster transform completed"
    );

    Ok(RosterTable {
        rows,
        basis: calculator.basis().clone(),
        summary,
    })
}
