//! Remaining-hours calculation.
//!
//! Remaining hours reconcile a current-hours baseline and the regular hours
//! an employee has worked against the fixed annual allotment:
//!
//! ```text
//! remaining = current_hours + regular_hours - annual_allotment
//! ```
//!
//! The baseline comes from one of two named strategies: a value supplied by
//! the caller, or the weekly decay of the allotment since the last reset date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AccrualPolicy, PolicyLoader};
use crate::error::EngineResult;
use crate::models::{AccrualBasis, StrategyKind};

use super::weekly_decay::{decayed_current_hours, reset_date_for, weeks_elapsed};

/// How the current-hours baseline is obtained.
///
/// # Example
///
/// ```
/// use pto_burn::calculation::CurrentHoursStrategy;
/// use pto_burn::config::AccrualPolicy;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let policy = AccrualPolicy::default();
/// let as_of = NaiveDate::from_ymd_opt(2026, 4, 4).unwrap();
/// let basis = CurrentHoursStrategy::WeeklyDecay { as_of }.resolve(&policy).unwrap();
/// assert_eq!(basis.weeks_elapsed, Some(46));
/// assert_eq!(basis.current_hours, Decimal::from(35));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum CurrentHoursStrategy {
    /// Use the given current hours value as-is.
    Fixed {
        /// The caller-supplied current hours.
        current_hours: Decimal,
    },
    /// Decay the annual allotment weekly from the last reset date up to `as_of`.
    WeeklyDecay {
        /// The date to evaluate the decay at (normally today).
        as_of: NaiveDate,
    },
}

impl CurrentHoursStrategy {
    /// The strategy's name.
    pub fn kind(&self) -> StrategyKind {
        match self {
            CurrentHoursStrategy::Fixed { .. } => StrategyKind::Fixed,
            CurrentHoursStrategy::WeeklyDecay { .. } => StrategyKind::WeeklyDecay,
        }
    }

    /// Picks the fixed strategy when a value is given, otherwise weekly decay at `as_of`.
    pub fn from_inputs(current_hours: Option<Decimal>, as_of: NaiveDate) -> Self {
        match current_hours {
            Some(current_hours) => CurrentHoursStrategy::Fixed { current_hours },
            None => CurrentHoursStrategy::WeeklyDecay { as_of },
        }
    }

    /// Resolves the current hours value under `policy`.
    ///
    /// # Errors
    ///
    /// Weekly decay fails with `InvalidPolicy` when the reset date does not
    /// exist in the relevant year.
    pub fn resolve(&self, policy: &AccrualPolicy) -> EngineResult<AccrualBasis> {
        match *self {
            CurrentHoursStrategy::Fixed { current_hours } => Ok(AccrualBasis::fixed(current_hours)),
            CurrentHoursStrategy::WeeklyDecay { as_of } => {
                let reset_date = reset_date_for(as_of, policy)?;
                let weeks = weeks_elapsed(reset_date, as_of);
                let current_hours = decayed_current_hours(weeks, policy);
                debug!(
                    as_of = %as_of,
                    reset_date = %reset_date,
                    weeks_elapsed = weeks,
                    current_hours = %current_hours,
                    "Resolved decayed current hours"
                );
                Ok(AccrualBasis {
                    strategy: StrategyKind::WeeklyDecay,
                    current_hours,
                    reset_date: Some(reset_date),
                    as_of: Some(as_of),
                    weeks_elapsed: Some(weeks),
                })
            }
        }
    }
}

/// Computes remaining hours for regular hours worked.
///
/// The current-hours baseline is resolved once at construction, so every
/// row of a roster is evaluated against the same value.
///
/// # Example
///
/// ```
/// use pto_burn::calculation::{AccrualCalculator, CurrentHoursStrategy};
/// use pto_burn::config::AccrualPolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let calculator = AccrualCalculator::new(
///     AccrualPolicy::default(),
///     CurrentHoursStrategy::Fixed { current_hours: Decimal::from(580) },
/// ).unwrap();
///
/// let remaining = calculator.remaining_hours(Decimal::from_str("1320.5").unwrap());
/// assert_eq!(remaining, Some(Decimal::from_str("25.5").unwrap()));
/// assert_eq!(calculator.remaining_hours(Decimal::MAX), None);
/// ```
#[derive(Debug, Clone)]
pub struct AccrualCalculator {
    policy: AccrualPolicy,
    basis: AccrualBasis,
}

impl AccrualCalculator {
    /// Validates the policy and resolves the strategy's current hours.
    pub fn new(policy: AccrualPolicy, strategy: CurrentHoursStrategy) -> EngineResult<Self> {
        PolicyLoader::validate(&policy)?;
        let basis = strategy.resolve(&policy)?;
        Ok(Self { policy, basis })
    }

    /// `current_hours + regular_hours - annual_allotment`, unrounded.
    ///
    /// Returns `None` when the result does not fit in a `Decimal`.
    pub fn remaining_hours(&self, regular_hours: Decimal) -> Option<Decimal> {
        self.basis
            .current_hours
            .checked_add(regular_hours)?
            .checked_sub(self.policy.annual_allotment_hours)
    }

    /// The resolved current hours value.
    pub fn current_hours(&self) -> Decimal {
        self.basis.current_hours
    }

    /// How the current hours were obtained.
    pub fn basis(&self) -> &AccrualBasis {
        &self.basis
    }

    /// The policy in effect.
    pub fn policy(&self) -> &AccrualPolicy {
        &self.policy
    }
}
