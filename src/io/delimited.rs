//! CSV import/export.

use crate::error::{EngineError, EngineResult};
use crate::models::{Cell, RawTable, ROSTER_COLUMNS, RosterView};
use crate::render::format_hours;

/// Reads CSV bytes into a raw table; the first record is the header.
///
/// Fields are decoded as UTF-8, replacing invalid sequences, and rows may
/// have differing lengths.
pub fn import_from_bytes(bytes: &[u8]) -> EngineResult<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .byte_headers()
        .map_err(|e| EngineError::SpreadsheetRead {
            message: format!("Invalid CSV header: {}", e),
        })?
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect();

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|e| EngineError::SpreadsheetRead {
            message: format!("Invalid CSV record: {}", e),
        })?;
        rows.push(
            record
                .iter()
                .map(|field| Cell::from(String::from_utf8_lossy(field).as_ref()))
                .collect(),
        );
    }

    Ok(RawTable::new(headers, rows))
}

/// Writes a view as CSV; hour columns use two decimal places.
pub fn export_to_bytes(view: &RosterView) -> EngineResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_view(&mut writer, view).map_err(|e| EngineError::Export {
        message: e.to_string(),
    })?;
    writer.into_inner().map_err(|e| EngineError::Export {
        message: e.to_string(),
    })
}

fn write_view<W: std::io::Write>(writer: &mut csv::Writer<W>, view: &RosterView) -> csv::Result<()> {
    match view {
        RosterView::Table(table) => {
            writer.write_record(ROSTER_COLUMNS)?;
            for row in &table.rows {
                let regular = format_hours(row.regular_hours);
                let remaining = format_hours(row.remaining_hours);
                writer.write_record([
                    row.employee_name.as_str(),
                    row.pay_type.as_str(),
                    regular.as_str(),
                    remaining.as_str(),
                ])?;
            }
        }
        RosterView::Message { message } => {
            writer.write_record(["Message"])?;
            writer.write_record([message.as_str()])?;
        }
    }
    writer.flush()?;
    Ok(())
}
