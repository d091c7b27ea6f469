//! Integration tests for the PTO burn API.
//!
//! This test suite drives the router end to end:
//! - CSV and xlsx uploads with fixed current hours
//! - Weekly decay of current hours by date
//! - Forward filling of names and pay type filtering
//! - Empty, missing-column, unparseable and out-of-range uploads
//! - HTML and spreadsheet output
//! - A custom accrual policy

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use rust_decimal::Decimal;
use rust_xlsxwriter::Workbook;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use pto_burn::api::{AppState, RosterResponse, create_router};
use pto_burn::config::PolicyLoader;
use pto_burn::io::{SpreadsheetFormat, parse_spreadsheet};
use pto_burn::models::Cell;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let loader = PolicyLoader::load("./config/policy.yaml").expect("Failed to load policy");
    AppState::new(loader)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

const ROSTER_CSV: &str = "Employee Name,Pay Type,Regular Hours\n\
                          Alice,R,1320.5\n\
                          ,V,16\n\
                          Bob,R,1200\n\
                          Carol,R,1400\n";

async fn post_body(
    router: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", content_type)
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

async fn post_roster(uri: &str, content_type: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let (status, _, body) = post_body(create_router_for_test(), uri, content_type, body).await;
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn post_calculate(body: Value) -> (StatusCode, Value) {
    post_roster("/calculate", "application/json", body.to_string()).await
}

fn build_xlsx(rows: &[(&str, &str, f64)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, name) in ["Employee Name", "Pay Type", "Regular Hours"].iter().enumerate() {
        worksheet.write_string(0, col as u16, *name).unwrap();
    }
    for (idx, (name, pay_type, hours)) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        if !name.is_empty() {
            worksheet.write_string(r, 0, *name).unwrap();
        }
        worksheet.write_string(r, 1, *pay_type).unwrap();
        worksheet.write_number(r, 2, *hours).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

// =============================================================================
// Fixed Current Hours
// =============================================================================

#[tokio::test]
async fn test_csv_upload_with_fixed_current_hours() {
    let (status, result) = post_roster("/roster?current_hours=580", "text/csv", ROSTER_CSV).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["status"], "table");
    assert_eq!(result["basis"]["strategy"], "fixed");

    let rows = result["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);

    // 580 + 1320.5 - 1875
    assert_eq!(rows[0]["employee_name"], "Alice");
    assert_eq!(rows[0]["regular_hours"], "1320.50");
    assert_eq!(rows[0]["remaining_hours"], "25.50");
    assert_eq!(rows[0]["tier"], "low");

    assert_eq!(rows[1]["employee_name"], "Bob");
    assert_eq!(rows[1]["remaining_hours"], "-95.00");
    assert_eq!(rows[1]["tier"], "over_threshold");

    assert_eq!(rows[2]["employee_name"], "Carol");
    assert_eq!(rows[2]["remaining_hours"], "105.00");
    assert_eq!(rows[2]["tier"], "normal");

    assert_eq!(result["summary"]["input_rows"], 4);
    assert_eq!(result["summary"]["names_filled"], 1);
    assert_eq!(result["summary"]["filtered_pay_type"], 1);
    assert_eq!(result["summary"]["output_rows"], 3);
}

#[tokio::test]
async fn test_xlsx_upload_detected_from_content() {
    let workbook = build_xlsx(&[("Alice", "R", 1320.5), ("", "OT", 12.0), ("Bob", "R", 1200.0)]);
    let (status, result) =
        post_roster("/roster?current_hours=580", "application/octet-stream", workbook).await;

    assert_eq!(status, StatusCode::OK);
    let rows = result["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["remaining_hours"], "25.50");
    assert_eq!(rows[1]["employee_name"], "Bob");
    assert_eq!(rows[1]["remaining_hours"], "-95.00");
}

#[tokio::test]
async fn test_remaining_hours_are_rounded_half_to_even() {
    let csv = "Employee Name,Pay Type,Regular Hours\nAlice,R,1300.125\nBob,R,1300.135\n";
    let (status, result) = post_roster("/roster?current_hours=580", "text/csv", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["rows"][0]["regular_hours"], "1300.12");
    assert_eq!(result["rows"][0]["remaining_hours"], "5.12");
    assert_eq!(result["rows"][1]["regular_hours"], "1300.14");
    assert_eq!(result["rows"][1]["remaining_hours"], "5.14");
}

// =============================================================================
// Weekly Decay
// =============================================================================

#[tokio::test]
async fn test_weekly_decay_as_of_date() {
    // 2025-05-17 to 2026-04-04 is 322 days, 46 whole weeks: 1875 - 46 * 40 = 35
    let csv = "Employee Name,Pay Type,Regular Hours\nAlice,R,1840\nBob,R,1900\n";
    let (status, _, body) =
        post_body(create_router_for_test(), "/roster?as_of=2026-04-04", "text/csv", csv).await;
    assert_eq!(status, StatusCode::OK);

    let result: RosterResponse = serde_json::from_slice(&body).unwrap();
    match result {
        RosterResponse::Table { basis, rows, .. } => {
            assert_eq!(basis.current_hours, decimal("35"));
            assert_eq!(basis.weeks_elapsed, Some(46));
            assert_eq!(
                basis.reset_date.map(|d| d.to_string()),
                Some("2025-05-17".to_string())
            );
            assert_eq!(rows[0].remaining_hours, "0.00");
            assert_eq!(rows[1].remaining_hours, "60.00");
        }
        other => panic!("Expected table, got {:?}", other),
    }
}

#[tokio::test]
async fn test_weekly_decay_on_reset_day_is_full_allotment() {
    let csv = "Employee Name,Pay Type,Regular Hours\nAlice,R,0\n";
    let (status, result) = post_roster("/roster?as_of=2025-05-17", "text/csv", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["basis"]["strategy"], "weekly_decay");
    assert_eq!(result["basis"]["weeks_elapsed"], 0);
    assert_eq!(result["rows"][0]["remaining_hours"], "0.00");
}

#[tokio::test]
async fn test_weekly_decay_before_reset_uses_previous_year() {
    // 2025-05-16 is 364 days after 2024-05-17: 52 weeks, decay floors at zero
    let csv = "Employee Name,Pay Type,Regular Hours\nAlice,R,1875\n";
    let (status, _, body) =
        post_body(create_router_for_test(), "/roster?as_of=2025-05-16", "text/csv", csv).await;
    assert_eq!(status, StatusCode::OK);

    let result: RosterResponse = serde_json::from_slice(&body).unwrap();
    match result {
        RosterResponse::Table { basis, rows, .. } => {
            assert_eq!(basis.weeks_elapsed, Some(52));
            assert_eq!(basis.current_hours, Decimal::ZERO);
            assert_eq!(rows[0].remaining_hours, "0.00");
        }
        other => panic!("Expected table, got {:?}", other),
    }
}

// =============================================================================
// JSON Input
// =============================================================================

#[tokio::test]
async fn test_calculate_forward_fills_names() {
    let (status, result) = post_calculate(json!({
        "current_hours": "580",
        "headers": ["Employee Name", "Pay Type", "Regular Hours"],
        "rows": [
            ["Alice", "V", 8],
            [null, "R", 1320.5],
            ["Bob", "R", "1200"],
            ["", "R", 10]
        ]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = result["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["employee_name"], "Alice");
    assert_eq!(rows[0]["remaining_hours"], "25.50");
    assert_eq!(rows[1]["employee_name"], "Bob");
    assert_eq!(rows[2]["employee_name"], "Bob");
    assert_eq!(rows[2]["regular_hours"], "10.00");
    assert_eq!(result["summary"]["names_filled"], 2);
}

#[tokio::test]
async fn test_calculate_drops_rows_before_first_name() {
    let (status, result) = post_calculate(json!({
        "current_hours": 580,
        "headers": ["Employee Name", "Pay Type", "Regular Hours"],
        "rows": [
            [null, "R", 100],
            ["Alice", "R", 1320.5]
        ]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = result["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["employee_name"], "Alice");
    assert_eq!(result["summary"]["dropped_blank_name"], 1);
}

// =============================================================================
// Upload Problems
// =============================================================================

#[tokio::test]
async fn test_header_only_upload_is_empty_message() {
    let csv = "Employee Name,Pay Type,Regular Hours\n";
    let (status, result) = post_roster("/roster?current_hours=580", "text/csv", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["status"], "message");
    assert_eq!(result["message"], "The uploaded file appears to be empty");
}

#[tokio::test]
async fn test_missing_column_message() {
    let csv = "Employee Name,Regular Hours\nAlice,1320.5\n";
    let (status, result) = post_roster("/roster?current_hours=580", "text/csv", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        result["message"],
        "Error processing file: Missing required column: Pay Type"
    );
}

#[tokio::test]
async fn test_unparseable_hours_message() {
    let csv = "Employee Name,Pay Type,Regular Hours\nAlice,R,abc\n";
    let (status, result) = post_roster("/roster?current_hours=580", "text/csv", csv).await;

    assert_eq!(status, StatusCode::OK);
    let message = result["message"].as_str().unwrap();
    assert!(message.starts_with("Error processing file: "));
    assert!(message.contains("'abc'"));
}

#[tokio::test]
async fn test_unreadable_workbook_message() {
    let mut bytes = b"PK\x03\x04".to_vec();
    bytes.extend_from_slice(b"not really a zip archive");
    let (status, result) =
        post_roster("/roster?current_hours=580", "application/octet-stream", bytes).await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        result["message"]
            .as_str()
            .unwrap()
            .starts_with("Error processing file: ")
    );
}

#[tokio::test]
async fn test_oversized_hours_value_is_message() {
    let csv = "Employee Name,Pay Type,Regular Hours\nAlice,R,79228162514264337593543950335\n";
    let (status, result) = post_roster("/roster?current_hours=580", "text/csv", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["status"], "message");
    let message = result["message"].as_str().unwrap();
    assert!(message.starts_with("Error processing file: "));
    assert!(message.contains("out of range"));
}

#[tokio::test]
async fn test_oversized_current_hours_is_message() {
    let csv = "Employee Name,Pay Type,Regular Hours\nAlice,R,1320.5\n";
    let (status, result) = post_roster(
        "/roster?current_hours=79228162514264337593543950335",
        "text/csv",
        csv,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["status"], "message");
    assert!(
        result["message"]
            .as_str()
            .unwrap()
            .contains("Remaining Hours for row 1 is out of range")
    );
}

#[tokio::test]
async fn test_oversized_weekly_decrement_decays_to_zero() {
    let loader =
        PolicyLoader::from_yaml_str("weekly_decrement_hours: \"79228162514264337593543950335\"\n")
            .unwrap();
    let router = create_router(AppState::new(loader));

    let csv = "Employee Name,Pay Type,Regular Hours\nAlice,R,1875\n";
    let (status, _, body) = post_body(router, "/roster?as_of=2025-08-16", "text/csv", csv).await;
    assert_eq!(status, StatusCode::OK);

    let result: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(result["status"], "table");
    assert_eq!(result["rows"][0]["remaining_hours"], "0.00");
}

#[tokio::test]
async fn test_calculate_without_rows_is_empty_message() {
    let (status, result) = post_calculate(json!({
        "current_hours": 580,
        "headers": ["Employee Name", "Pay Type", "Regular Hours"]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["message"], "The uploaded file appears to be empty");
}

// =============================================================================
// Output Formats
// =============================================================================

#[tokio::test]
async fn test_html_output_highlights_tiers() {
    let (status, headers, body) = post_body(
        create_router_for_test(),
        "/roster/html?current_hours=580",
        "text/csv",
        ROSTER_CSV,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<table class=\"table\">"));
    assert!(html.contains("<th>Remaining Hours</th>"));
    assert!(html.contains("<td class=\"tier-low\">25.50</td>"));
    assert!(html.contains(
        "<td class=\"tier-over\" style=\"background-color: lightgreen\">-95.00</td>"
    ));
    assert!(html.contains("<td class=\"tier-normal\">105.00</td>"));
}

#[tokio::test]
async fn test_html_output_for_missing_file() {
    let (status, _, body) = post_body(
        create_router_for_test(),
        "/roster/html",
        "text/csv",
        Body::empty(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<td>Please upload an Excel file</td>"));
}

#[tokio::test]
async fn test_xlsx_export_round_trips() {
    let (status, headers, body) = post_body(
        create_router_for_test(),
        "/roster/export?current_hours=580",
        "text/csv",
        ROSTER_CSV,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"pto_hours.xlsx\""
    );
    assert!(body.starts_with(b"PK"));

    let table = parse_spreadsheet(&body, SpreadsheetFormat::Excel).unwrap();
    assert_eq!(
        table.headers,
        vec!["Employee Name", "Pay Type", "Regular Hours", "Remaining Hours"]
    );
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.cell(0, 0), &Cell::Text("Alice".to_string()));
    assert_eq!(table.cell(0, 3), &Cell::Number(25.5));
    assert_eq!(table.cell(1, 3), &Cell::Number(-95.0));
}

// =============================================================================
// Policy
// =============================================================================

#[tokio::test]
async fn test_custom_policy_changes_results() {
    let loader = PolicyLoader::from_yaml_str(
        "annual_allotment_hours: 2000\nregular_pay_type: REG\nlow_balance_threshold: 10\n",
    )
    .unwrap();
    let router = create_router(AppState::new(loader));

    let csv = "Employee Name,Pay Type,Regular Hours\nAlice,REG,1425\nAlice,R,999\n";
    let (status, _, body) = post_body(router, "/roster?current_hours=580", "text/csv", csv).await;
    assert_eq!(status, StatusCode::OK);

    let result: Value = serde_json::from_slice(&body).unwrap();
    let rows = result["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["pay_type"], "REG");
    assert_eq!(rows[0]["remaining_hours"], "5.00");
    assert_eq!(rows[0]["tier"], "low");
}

#[tokio::test]
async fn test_invalid_reset_date_is_server_error() {
    let loader = PolicyLoader::from_yaml_str("reset_month: 2\nreset_day: 29\n").unwrap();
    let router = create_router(AppState::new(loader));

    let csv = "Employee Name,Pay Type,Regular Hours\nAlice,R,100\n";
    let (status, _, body) = post_body(router, "/roster?as_of=2025-06-01", "text/csv", csv).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "POLICY_ERROR");
}
