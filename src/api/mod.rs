//! HTTP API module for the PTO burn engine.
//!
//! This module provides the REST endpoints that accept a payroll
//! spreadsheet upload and return the remaining-hours roster as JSON,
//! an HTML table, or a spreadsheet download.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{RequestCell, RosterQuery, RosterRequest};
pub use response::{ApiError, ApiErrorResponse, RosterResponse, RosterRowResponse};
pub use state::AppState;
