//! Excel import (xlsx, xls, xlsb, ods) and export (xlsx only)
//!
//! Import reads the first worksheet only; its first row is the header.
//! Export writes the roster with a fixed two-decimal number format and a
//! tier fill on Remaining Hours.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::calculation::{HoursTier, classify_remaining_hours};
use crate::config::AccrualPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{Cell, RawTable, ROSTER_COLUMNS, RosterTable, RosterView};

/// Worksheet name used for exports.
pub const EXPORT_SHEET_NAME: &str = "PTO Hours";

const HEADER_FILL: u32 = 0xF8F9FA;
const OVER_THRESHOLD_FILL: u32 = 0x90EE90;
const LOW_FILL: u32 = 0xFFF3CD;

/// Reads the first worksheet of a workbook into a raw table.
pub fn import_from_bytes(bytes: &[u8]) -> EngineResult<RawTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
        EngineError::SpreadsheetRead {
            message: format!("Failed to open Excel file: {}", e),
        }
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| EngineError::SpreadsheetRead {
            message: "Excel file contains no sheets".to_string(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| EngineError::SpreadsheetRead {
            message: format!("Failed to read sheet '{}': {}", sheet_name, e),
        })?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| header.iter().map(|c| to_cell(c).raw_text()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}

/// Writes a view to an in-memory xlsx file.
pub fn export_to_bytes(view: &RosterView, policy: &AccrualPolicy) -> EngineResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    write_view(worksheet, view, policy).map_err(|e| EngineError::Export {
        message: format!("Failed to write worksheet: {}", e),
    })?;

    workbook.save_to_buffer().map_err(|e| EngineError::Export {
        message: format!("Failed to save XLSX file: {}", e),
    })
}

fn write_view(
    worksheet: &mut Worksheet,
    view: &RosterView,
    policy: &AccrualPolicy,
) -> Result<(), XlsxError> {
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border_bottom(FormatBorder::Medium);

    match view {
        RosterView::Table(table) => write_table(worksheet, table, policy, &header_format),
        RosterView::Message { message } => {
            worksheet.write_string_with_format(0, 0, "Message", &header_format)?;
            worksheet.write_string(1, 0, message.as_str())?;
            worksheet.set_column_width(0, 60)?;
            Ok(())
        }
    }
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &RosterTable,
    policy: &AccrualPolicy,
    header_format: &Format,
) -> Result<(), XlsxError> {
    for (col, name) in ROSTER_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, header_format)?;
    }

    let hours = Format::new().set_num_format("0.00");
    let over = hours
        .clone()
        .set_background_color(Color::RGB(OVER_THRESHOLD_FILL));
    let low = hours.clone().set_background_color(Color::RGB(LOW_FILL));

    for (idx, row) in table.rows.iter().enumerate() {
        let r = idx as u32 + 1;
        worksheet.write_string(r, 0, row.employee_name.as_str())?;
        worksheet.write_string(r, 1, row.pay_type.as_str())?;
        worksheet.write_number_with_format(r, 2, to_f64(row.regular_hours), &hours)?;

        let remaining_format = match classify_remaining_hours(row.remaining_hours, policy) {
            HoursTier::OverThreshold => &over,
            HoursTier::Low => &low,
            HoursTier::Normal => &hours,
        };
        worksheet.write_number_with_format(r, 3, to_f64(row.remaining_hours), remaining_format)?;
    }

    worksheet.set_column_width(0, 28)?;
    worksheet.set_column_width(1, 10)?;
    worksheet.set_column_width(2, 16)?;
    worksheet.set_column_width(3, 18)?;
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
