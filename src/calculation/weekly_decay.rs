//! Date-driven decay of the current-hours baseline.
//!
//! The accrual year runs from the reset date (May 17 by default) to the
//! day before the next one. Current hours start at the annual allotment on
//! the reset date and fall by the weekly decrement for every whole week
//! that has elapsed since, never going below zero.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::AccrualPolicy;
use crate::error::{EngineError, EngineResult};

/// Returns the most recent reset date on or before `today`.
///
/// The reset date of `today`'s year is used when `today` is on or after
/// it; otherwise the previous year's reset date applies.
///
/// # Errors
///
/// Returns `InvalidPolicy` when the policy's reset month/day does not
/// exist in the selected year (Feb 29 outside a leap year).
///
/// # Example
///
/// ```
/// use pto_burn::calculation::reset_date_for;
/// use pto_burn::config::AccrualPolicy;
/// use chrono::NaiveDate;
///
/// let policy = AccrualPolicy::default();
/// let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
///
/// assert_eq!(reset_date_for(day(2025, 5, 16), &policy).unwrap(), day(2024, 5, 17));
/// assert_eq!(reset_date_for(day(2025, 5, 17), &policy).unwrap(), day(2025, 5, 17));
/// ```
pub fn reset_date_for(today: NaiveDate, policy: &AccrualPolicy) -> EngineResult<NaiveDate> {
    let this_year = reset_date_in_year(today.year(), policy)?;
    if today < this_year {
        reset_date_in_year(today.year() - 1, policy)
    } else {
        Ok(this_year)
    }
}

fn reset_date_in_year(year: i32, policy: &AccrualPolicy) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, policy.reset_month, policy.reset_day).ok_or_else(|| {
        EngineError::InvalidPolicy {
            message: format!(
                "reset date {:02}-{:02} does not exist in {}",
                policy.reset_month, policy.reset_day, year
            ),
        }
    })
}

/// Whole weeks from `reset_date` to `today`.
///
/// Partial weeks are not counted. Elapsed days are floored toward negative
/// infinity and a negative result (today before the reset date) is clamped
/// to zero.
///
/// # Example
///
/// ```
/// use pto_burn::calculation::weeks_elapsed;
/// use chrono::NaiveDate;
///
/// let reset = NaiveDate::from_ymd_opt(2025, 5, 17).unwrap();
/// assert_eq!(weeks_elapsed(reset, NaiveDate::from_ymd_opt(2025, 5, 23).unwrap()), 0);
/// assert_eq!(weeks_elapsed(reset, NaiveDate::from_ymd_opt(2025, 5, 24).unwrap()), 1);
/// ```
pub fn weeks_elapsed(reset_date: NaiveDate, today: NaiveDate) -> i64 {
    let days = today.signed_duration_since(reset_date).num_days();
    days.div_euclid(7).max(0)
}

/// Current hours after `weeks` whole weeks of decay.
///
/// Computes `max(annual_allotment - weeks * weekly_decrement, 0)`. A
/// decrement too large to represent has used up the allotment, so the
/// result is zero.
///
/// # Example
///
/// ```
/// use pto_burn::calculation::decayed_current_hours;
/// use pto_burn::config::AccrualPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = AccrualPolicy::default();
/// assert_eq!(decayed_current_hours(46, &policy), Decimal::from(35));
/// assert_eq!(decayed_current_hours(47, &policy), Decimal::ZERO);
/// ```
pub fn decayed_current_hours(weeks: i64, policy: &AccrualPolicy) -> Decimal {
    let weeks = Decimal::from(weeks.max(0));
    weeks
        .checked_mul(policy.weekly_decrement_hours)
        .and_then(|decrement| policy.annual_allotment_hours.checked_sub(decrement))
        .map_or(Decimal::ZERO, |value| value.max(Decimal::ZERO))
}
