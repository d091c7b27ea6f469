//! Remaining-hours tier classification.
//!
//! Renderers highlight the `Remaining Hours` column by tier; the
//! classification itself does not depend on any output format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AccrualPolicy;

/// Display tier of a remaining-hours value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursTier {
    /// Negative balance.
    OverThreshold,
    /// Zero up to (not including) the low balance threshold.
    Low,
    /// At or above the low balance threshold.
    Normal,
}

impl HoursTier {
    /// CSS class used by the HTML renderer.
    pub fn css_class(&self) -> &'static str {
        match self {
            HoursTier::OverThreshold => "tier-over",
            HoursTier::Low => "tier-low",
            HoursTier::Normal => "tier-normal",
        }
    }
}

impl std::fmt::Display for HoursTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoursTier::OverThreshold => write!(f, "over-threshold"),
            HoursTier::Low => write!(f, "low"),
            HoursTier::Normal => write!(f, "normal"),
        }
    }
}

/// Classifies a remaining-hours value.
///
/// `< 0` is over-threshold, `0 <= v < low_balance_threshold` is low, and
/// anything else is normal.
///
/// # Example
///
/// ```
/// use pto_burn::calculation::{classify_remaining_hours, HoursTier};
/// use pto_burn::config::AccrualPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = AccrualPolicy::default();
/// assert_eq!(classify_remaining_hours(Decimal::from(-5), &policy), HoursTier::OverThreshold);
/// assert_eq!(classify_remaining_hours(Decimal::ZERO, &policy), HoursTier::Low);
/// assert_eq!(classify_remaining_hours(Decimal::from(40), &policy), HoursTier::Normal);
/// ```
pub fn classify_remaining_hours(value: Decimal, policy: &AccrualPolicy) -> HoursTier {
    if value < Decimal::ZERO {
        HoursTier::OverThreshold
    } else if value < policy.low_balance_threshold {
        HoursTier::Low
    } else {
        HoursTier::Normal
    }
}
