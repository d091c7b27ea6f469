//! Policy loading functionality.
//!
//! This module provides the [`PolicyLoader`] type for loading an accrual
//! policy from a YAML file and validating it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::AccrualPolicy;

/// Loads and validates the accrual policy.
///
/// # Example
///
/// ```no_run
/// use pto_burn::config::PolicyLoader;
///
/// let loader = PolicyLoader::load("./config/policy.yaml").unwrap();
/// println!("Annual allotment: {}", loader.policy().annual_allotment_hours);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyLoader {
    policy: AccrualPolicy,
}

impl PolicyLoader {
    /// Loads a policy from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `PolicyLoader` instance on success, or an error if:
    /// - The file is missing (`PolicyNotFound`)
    /// - The file contains invalid YAML or wrongly typed values (`PolicyParseError`)
    /// - The values fail validation (`InvalidPolicy`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::PolicyNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|err| match err {
            EngineError::PolicyParseError { message, .. } => EngineError::PolicyParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses and validates a policy from YAML text.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let policy: AccrualPolicy =
            serde_yaml::from_str(content).map_err(|e| EngineError::PolicyParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::from_policy(policy)
    }

    /// Wraps an already-built policy after validating it.
    pub fn from_policy(policy: AccrualPolicy) -> EngineResult<Self> {
        Self::validate(&policy)?;
        Ok(Self { policy })
    }

    /// Checks the policy for values that would make the accrual rule meaningless.
    ///
    /// The reset month/day must name a real calendar day in a leap year;
    /// Feb 29 passes here and is rejected per year at calculation time.
    pub fn validate(policy: &AccrualPolicy) -> EngineResult<()> {
        if NaiveDate::from_ymd_opt(2000, policy.reset_month, policy.reset_day).is_none() {
            return Err(EngineError::InvalidPolicy {
                message: format!(
                    "reset date {:02}-{:02} is not a calendar day",
                    policy.reset_month, policy.reset_day
                ),
            });
        }

        if policy.weekly_decrement_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidPolicy {
                message: format!(
                    "weekly_decrement_hours must be positive, got {}",
                    policy.weekly_decrement_hours
                ),
            });
        }

        if policy.annual_allotment_hours < Decimal::ZERO {
            return Err(EngineError::InvalidPolicy {
                message: format!(
                    "annual_allotment_hours must not be negative, got {}",
                    policy.annual_allotment_hours
                ),
            });
        }

        if policy.regular_pay_type.trim().is_empty() {
            return Err(EngineError::InvalidPolicy {
                message: "regular_pay_type must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &AccrualPolicy {
        &self.policy
    }

    /// Consumes the loader, returning the policy.
    pub fn into_policy(self) -> AccrualPolicy {
        self.policy
    }
}
