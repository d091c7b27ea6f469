//! Calculation logic for the PTO burn engine.
//!
//! This module contains the accrual rule (reset date selection, weekly
//! decay of current hours, remaining-hours formula), the roster transform
//! that cleans an uploaded payroll table, and the remaining-hours tier
//! classification used for highlighting.

mod accrual;
mod roster_transform;
mod tier;
mod weekly_decay;

pub use accrual::{AccrualCalculator, CurrentHoursStrategy};
pub use roster_transform::{
    DISPLAY_DECIMAL_PLACES, compute_roster, forward_fill_names, parse_regular_hours,
    round_for_display,
};
pub use tier::{HoursTier, classify_remaining_hours};
pub use weekly_decay::{decayed_current_hours, reset_date_for, weeks_elapsed};
