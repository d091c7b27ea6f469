//! Core data models for the PTO burn engine.
//!
//! This module contains all the domain models used throughout the engine.

mod raw_table;
mod roster;
mod view;

pub use raw_table::{Cell, RawTable};
pub use roster::{
    AccrualBasis, EMPLOYEE_NAME_COLUMN, PAY_TYPE_COLUMN, REGULAR_HOURS_COLUMN,
    REMAINING_HOURS_COLUMN, ROSTER_COLUMNS, RosterRow, RosterTable, StrategyKind,
    TransformSummary,
};
pub use view::RosterView;
