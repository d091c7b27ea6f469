//! HTTP request handlers for the PTO burn API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::post,
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{AccrualCalculator, CurrentHoursStrategy, compute_roster};
use crate::config::AccrualPolicy;
use crate::error::EngineResult;
use crate::io::{SpreadsheetFormat, export_spreadsheet, parse_spreadsheet};
use crate::models::{RawTable, RosterTable, RosterView};
use crate::render::render_html_page;

use super::request::{RosterQuery, RosterRequest};
use super::response::{ApiError, ApiErrorResponse, RosterResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/roster", post(roster_handler))
        .route("/roster/html", post(roster_html_handler))
        .route("/roster/export", post(roster_export_handler))
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Handler for POST /roster.
///
/// Reads the spreadsheet in the request body and returns the roster as JSON.
async fn roster_handler(
    State(state): State<AppState>,
    query: Result<Query<RosterQuery>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let policy = state.policy();
    match process_upload(policy, query, &headers, &body) {
        Ok(view) => (
            StatusCode::OK,
            Json(RosterResponse::from_view(&view, policy)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

/// Handler for POST /roster/html.
///
/// Reads the spreadsheet in the request body and returns an HTML page with
/// the highlighted roster table.
async fn roster_html_handler(
    State(state): State<AppState>,
    query: Result<Query<RosterQuery>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let policy = state.policy();
    match process_upload(policy, query, &headers, &body) {
        Ok(view) => Html(render_html_page(&view, policy)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Handler for POST /roster/export.
///
/// Reads the spreadsheet in the request body and returns the roster as a
/// spreadsheet download (xlsx unless `export=csv`).
async fn roster_export_handler(
    State(state): State<AppState>,
    query: Result<Query<RosterQuery>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let policy = state.policy();
    let export_format = match &query {
        Ok(Query(q)) => q.export.unwrap_or(SpreadsheetFormat::Excel),
        Err(_) => SpreadsheetFormat::Excel,
    };

    let view = match process_upload(policy, query, &headers, &body) {
        Ok(view) => view,
        Err(err) => return err.into_response(),
    };

    match export_spreadsheet(&view, export_format, policy) {
        Ok(bytes) => {
            let disposition = format!(
                "attachment; filename=\"pto_hours.{}\"",
                export_format.extension()
            );
            let mut response = (StatusCode::OK, bytes).into_response();
            let response_headers = response.headers_mut();
            response_headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(export_format.content_type()),
            );
            if let Ok(value) = HeaderValue::from_str(&disposition) {
                response_headers.insert(header::CONTENT_DISPOSITION, value);
            }
            response
        }
        Err(err) => {
            warn!(error = %err, "Export failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /calculate.
///
/// Accepts the roster table as JSON instead of a spreadsheet file.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<RosterRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let policy = state.policy();
    let strategy = request.strategy(today());
    let table = request.into_table();

    match run_roster(policy, strategy, &table, correlation_id) {
        Ok(view) => (
            StatusCode::OK,
            Json(RosterResponse::from_view(&view, policy)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

/// Parses the uploaded body and computes the roster view.
///
/// Upload problems become a message view; only bad parameters and
/// policy failures are returned as errors.
fn process_upload(
    policy: &AccrualPolicy,
    query: Result<Query<RosterQuery>, QueryRejection>,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<RosterView, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        body_bytes = body.len(),
        "Processing roster upload"
    );

    let Query(query) = query.map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Invalid query parameters"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;

    let strategy = query
        .strategy(today())
        .map_err(ApiErrorResponse::bad_request)?;

    if body.is_empty() {
        info!(correlation_id = %correlation_id, "No file provided");
        return Ok(RosterView::no_file());
    }

    let format = query
        .format
        .or_else(|| format_from_content_type(headers))
        .unwrap_or_else(|| SpreadsheetFormat::sniff(body));

    let table = match parse_spreadsheet(body, format) {
        Ok(table) => table,
        Err(err) => return recover(correlation_id, Err(err)),
    };

    run_roster(policy, strategy, &table, correlation_id)
}

/// Computes the roster for a parsed table and converts the outcome to a view.
fn run_roster(
    policy: &AccrualPolicy,
    strategy: CurrentHoursStrategy,
    table: &RawTable,
    correlation_id: Uuid,
) -> Result<RosterView, ApiErrorResponse> {
    let start_time = Instant::now();
    let calculator = AccrualCalculator::new(policy.clone(), strategy).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Policy rejected");
        ApiErrorResponse::from(err)
    })?;

    let result = compute_roster(table, &calculator);
    if let Ok(roster) = &result {
        info!(
            correlation_id = %correlation_id,
            strategy = %roster.basis.strategy,
            current_hours = %roster.basis.current_hours,
            input_rows = roster.summary.input_rows,
            output_rows = roster.summary.output_rows,
            duration_us = start_time.elapsed().as_micros(),
            "Roster computed successfully"
        );
    }
    recover(correlation_id, result)
}

fn recover(
    correlation_id: Uuid,
    result: EngineResult<RosterTable>,
) -> Result<RosterView, ApiErrorResponse> {
    if let Err(err) = &result {
        warn!(correlation_id = %correlation_id, error = %err, "Roster upload rejected");
    }
    RosterView::from_result(result).map_err(ApiErrorResponse::from)
}

fn format_from_content_type(headers: &HeaderMap) -> Option<SpreadsheetFormat> {
    let content_type = headers
        .get(header::CONTENT_TYPE)?
        .to_str()
        .ok()?
        .to_ascii_lowercase();

    if content_type.contains("csv") || content_type.starts_with("text/") {
        Some(SpreadsheetFormat::Csv)
    } else if content_type.contains("spreadsheet")
        || content_type.contains("ms-excel")
        || content_type.contains("opendocument")
    {
        Some(SpreadsheetFormat::Excel)
    } else {
        None
    }
}
