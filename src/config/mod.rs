//! Accrual policy configuration for the PTO burn engine.
//!
//! This module holds the named policy values (annual allotment, weekly
//! decrement, reset date, pay type code, tier threshold) and loads them
//! from YAML.
//!
//! # Example
//!
//! ```no_run
//! use pto_burn::config::PolicyLoader;
//!
//! let loader = PolicyLoader::load("./config/policy.yaml").unwrap();
//! println!("Reset day: {}-{}", loader.policy().reset_month, loader.policy().reset_day);
//! ```

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{
    AccrualPolicy, DEFAULT_ANNUAL_ALLOTMENT_HOURS, DEFAULT_LOW_BALANCE_THRESHOLD,
    DEFAULT_REGULAR_PAY_TYPE, DEFAULT_RESET_DAY, DEFAULT_RESET_MONTH,
    DEFAULT_WEEKLY_DECREMENT_HOURS,
};
