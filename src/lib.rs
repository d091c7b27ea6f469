//! PTO burn engine
//!
//! This crate computes remaining paid-time-off balances for a payroll roster:
//! it reads an uploaded spreadsheet, carries employee names down their pay
//! line blocks, keeps the regular-hours lines and reconciles each against
//! the annual PTO allotment and a current-hours baseline.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod render;
