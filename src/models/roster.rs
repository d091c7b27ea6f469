//! Roster result models.
//!
//! This module contains the [`RosterTable`] produced by the roster transform,
//! its rows, and the metadata describing how the current-hours baseline was
//! obtained.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Source column holding the employee name.
pub const EMPLOYEE_NAME_COLUMN: &str = "Employee Name";
/// Source column holding the payroll pay type code.
pub const PAY_TYPE_COLUMN: &str = "Pay Type";
/// Source column holding worked regular hours.
pub const REGULAR_HOURS_COLUMN: &str = "Regular Hours";
/// Derived column with the remaining PTO balance.
pub const REMAINING_HOURS_COLUMN: &str = "Remaining Hours";

/// The four output columns, in order.
pub const ROSTER_COLUMNS: [&str; 4] = [
    EMPLOYEE_NAME_COLUMN,
    PAY_TYPE_COLUMN,
    REGULAR_HOURS_COLUMN,
    REMAINING_HOURS_COLUMN,
];

/// One cleaned payroll line for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    /// Employee name, inherited from the block above when the source cell was blank.
    pub employee_name: String,
    /// Pay type code (always the policy's regular code after filtering).
    pub pay_type: String,
    /// Regular hours worked, rounded to 2 decimal places.
    pub regular_hours: Decimal,
    /// Remaining PTO hours, rounded to 2 decimal places.
    pub remaining_hours: Decimal,
}

/// Which current-hours strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// A caller-supplied current hours value.
    Fixed,
    /// Current hours derived from the date by weekly decay.
    WeeklyDecay,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Fixed => write!(f, "fixed"),
            StrategyKind::WeeklyDecay => write!(f, "weekly_decay"),
        }
    }
}

/// How the current-hours baseline for a roster was obtained.
///
/// # Example
///
/// ```
/// use pto_burn::models::{AccrualBasis, StrategyKind};
/// use rust_decimal::Decimal;
///
/// let basis = AccrualBasis::fixed(Decimal::from(580));
/// assert_eq!(basis.strategy, StrategyKind::Fixed);
/// assert!(basis.reset_date.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualBasis {
    /// The strategy that was applied.
    pub strategy: StrategyKind,
    /// The resolved current hours value.
    pub current_hours: Decimal,
    /// The reset date the decay was measured from (decay only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_date: Option<NaiveDate>,
    /// The date the decay was evaluated at (decay only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    /// Whole weeks elapsed since the reset date (decay only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks_elapsed: Option<i64>,
}

impl AccrualBasis {
    /// A basis for a caller-supplied current hours value.
    pub fn fixed(current_hours: Decimal) -> Self {
        Self {
            strategy: StrategyKind::Fixed,
            current_hours,
            reset_date: None,
            as_of: None,
            weeks_elapsed: None,
        }
    }
}

/// Row counts recorded while transforming a roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSummary {
    /// Data rows in the uploaded table.
    pub input_rows: usize,
    /// Blank names filled from the row above.
    pub names_filled: usize,
    /// Rows removed because their pay type was not the regular code.
    pub filtered_pay_type: usize,
    /// Regular rows removed because no usable name was available.
    pub dropped_blank_name: usize,
    /// Rows in the result.
    pub output_rows: usize,
}

/// The cleaned roster with remaining hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterTable {
    /// Output rows in source order.
    pub rows: Vec<RosterRow>,
    /// How current hours were obtained.
    pub basis: AccrualBasis,
    /// Row counts from the transform.
    pub summary: TransformSummary,
}

impl RosterTable {
    /// Number of output rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when no rows survived filtering.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
