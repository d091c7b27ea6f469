//! Application state for the PTO burn API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{AccrualPolicy, PolicyLoader};

/// Shared application state.
///
/// Holds the accrual policy, which is read-only for the lifetime of the
/// server. Every request computes its roster independently.
#[derive(Clone)]
pub struct AppState {
    /// The validated accrual policy.
    policy: Arc<AccrualPolicy>,
}

impl AppState {
    /// Creates a new application state from a loaded policy.
    pub fn new(loader: PolicyLoader) -> Self {
        Self {
            policy: Arc::new(loader.into_policy()),
        }
    }

    /// Returns the accrual policy.
    pub fn policy(&self) -> &AccrualPolicy {
        &self.policy
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PolicyLoader::default())
    }
}
