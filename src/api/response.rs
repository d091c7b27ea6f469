//! Response types for the PTO burn API.
//!
//! This module defines the roster payload returned by `/roster` and
//! `/calculate`, plus the error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::{HoursTier, classify_remaining_hours};
use crate::config::AccrualPolicy;
use crate::error::EngineError;
use crate::models::{AccrualBasis, RosterView, TransformSummary};
use crate::render::format_hours;

/// One roster row as sent to clients, with display strings and tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRowResponse {
    /// Employee name.
    pub employee_name: String,
    /// Pay type code.
    pub pay_type: String,
    /// Regular hours with two decimal places.
    pub regular_hours: String,
    /// Remaining hours with two decimal places.
    pub remaining_hours: String,
    /// Highlight tier of the remaining hours.
    pub tier: HoursTier,
}

/// Body of a successful roster request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RosterResponse {
    /// The computed roster.
    Table {
        /// How current hours were obtained.
        basis: AccrualBasis,
        /// Row counts from the transform.
        summary: TransformSummary,
        /// Output rows in source order.
        rows: Vec<RosterRowResponse>,
    },
    /// A single message for the user.
    Message {
        /// The message text.
        message: String,
    },
}

impl RosterResponse {
    /// Builds the payload for a view, classifying each row under `policy`.
    pub fn from_view(view: &RosterView, policy: &AccrualPolicy) -> Self {
        match view {
            RosterView::Message { message } => RosterResponse::Message {
                message: message.clone(),
            },
            RosterView::Table(table) => RosterResponse::Table {
                basis: table.basis.clone(),
                summary: table.summary,
                rows: table
                    .rows
                    .iter()
                    .map(|row| RosterRowResponse {
                        employee_name: row.employee_name.clone(),
                        pay_type: row.pay_type.clone(),
                        regular_hours: format_hours(row.regular_hours),
                        remaining_hours: format_hours(row.remaining_hours),
                        tier: classify_remaining_hours(row.remaining_hours, policy),
                    })
                    .collect(),
            },
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response for invalid request parameters.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

/// Maps engine errors to HTTP errors.
///
/// The handlers turn upload errors into a `message` view before this
/// conversion is reached, so in practice only policy and export failures
/// arrive here. Upload errors still map to 422 for callers that use
/// the conversion directly.
impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.user_message();
        let (status, code) = match &error {
            EngineError::Export { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR"),
            EngineError::PolicyNotFound { .. }
            | EngineError::PolicyParseError { .. }
            | EngineError::InvalidPolicy { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "POLICY_ERROR")
            }
            _ => (StatusCode::UNPROCESSABLE_ENTITY, "UPLOAD_ERROR"),
        };
        ApiErrorResponse {
            status,
            error: ApiError::with_details(code, message, error.to_string()),
        }
    }
}
