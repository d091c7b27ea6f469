//! Policy types for PTO accrual.
//!
//! The constants of the accrual rule live here as named, deserializable
//! values so alternate policies can be loaded from YAML or built in tests.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default annual PTO allotment baseline, in hours.
pub const DEFAULT_ANNUAL_ALLOTMENT_HOURS: i64 = 1875;

/// Default reduction applied to current hours for every elapsed week.
pub const DEFAULT_WEEKLY_DECREMENT_HOURS: i64 = 40;

/// Default month of the annual reset date (May).
pub const DEFAULT_RESET_MONTH: u32 = 5;

/// Default day of month of the annual reset date.
pub const DEFAULT_RESET_DAY: u32 = 17;

/// Payroll code for regular worked hours.
pub const DEFAULT_REGULAR_PAY_TYPE: &str = "R";

/// Remaining hours below this value are reported in the low tier.
pub const DEFAULT_LOW_BALANCE_THRESHOLD: i64 = 40;

/// The accrual policy applied to a roster.
///
/// Every field falls back to the built-in policy when omitted from YAML,
/// so a policy file only needs to list the values it overrides.
///
/// # Example
///
/// ```
/// use pto_burn::config::AccrualPolicy;
/// use rust_decimal::Decimal;
///
/// let policy: AccrualPolicy = serde_yaml::from_str("weekly_decrement_hours: 38").unwrap();
/// assert_eq!(policy.weekly_decrement_hours, Decimal::from(38));
/// assert_eq!(policy.annual_allotment_hours, Decimal::from(1875));
/// assert_eq!(policy.reset_month, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccrualPolicy {
    /// Fixed annual PTO allotment subtracted from every balance.
    pub annual_allotment_hours: Decimal,
    /// Hours removed from the decaying current-hours value per whole week.
    pub weekly_decrement_hours: Decimal,
    /// Month (1-12) of the annual reset date.
    pub reset_month: u32,
    /// Day of month of the annual reset date.
    pub reset_day: u32,
    /// Pay type code of the rows that are kept.
    pub regular_pay_type: String,
    /// Boundary between the low and normal remaining-hours tiers.
    pub low_balance_threshold: Decimal,
}

impl Default for AccrualPolicy {
    fn default() -> Self {
        Self {
            annual_allotment_hours: Decimal::from(DEFAULT_ANNUAL_ALLOTMENT_HOURS),
            weekly_decrement_hours: Decimal::from(DEFAULT_WEEKLY_DECREMENT_HOURS),
            reset_month: DEFAULT_RESET_MONTH,
            reset_day: DEFAULT_RESET_DAY,
            regular_pay_type: DEFAULT_REGULAR_PAY_TYPE.to_string(),
            low_balance_threshold: Decimal::from(DEFAULT_LOW_BALANCE_THRESHOLD),
        }
    }
}
