//! Spreadsheet import and export.
//!
//! Uploaded rosters arrive as CSV or as an Excel-family workbook. Both are
//! read into a [`RawTable`]; results are written back as CSV or xlsx.

mod delimited;
mod excel;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AccrualPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{RawTable, RosterView};

pub use excel::EXPORT_SHEET_NAME;

/// Zip container signature (xlsx, xlsm, ods).
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE compound document signature (legacy xls).
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// The file formats the engine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadsheetFormat {
    /// Comma-separated values.
    Csv,
    /// Excel workbook; read as xlsx/xlsm/xlsb/xls/ods, written as xlsx.
    #[serde(alias = "xlsx", alias = "xls", alias = "ods")]
    Excel,
}

impl SpreadsheetFormat {
    /// Guesses the format from the leading bytes; anything that is not a
    /// zip or OLE container is treated as CSV.
    ///
    /// ```
    /// use pto_burn::io::SpreadsheetFormat;
    ///
    /// assert_eq!(SpreadsheetFormat::sniff(b"PK\x03\x04rest"), SpreadsheetFormat::Excel);
    /// assert_eq!(SpreadsheetFormat::sniff(b"Employee Name,Pay Type"), SpreadsheetFormat::Csv);
    /// ```
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            SpreadsheetFormat::Excel
        } else {
            SpreadsheetFormat::Csv
        }
    }

    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(SpreadsheetFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SpreadsheetFormat::Excel),
            _ => None,
        }
    }

    /// MIME type of files written in this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            SpreadsheetFormat::Csv => "text/csv; charset=utf-8",
            SpreadsheetFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// File extension of files written in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            SpreadsheetFormat::Csv => "csv",
            SpreadsheetFormat::Excel => "xlsx",
        }
    }
}

/// Parses spreadsheet bytes into a raw table.
pub fn parse_spreadsheet(bytes: &[u8], format: SpreadsheetFormat) -> EngineResult<RawTable> {
    match format {
        SpreadsheetFormat::Csv => delimited::import_from_bytes(bytes),
        SpreadsheetFormat::Excel => excel::import_from_bytes(bytes),
    }
}

/// Reads and parses a spreadsheet file, choosing the format by extension
/// and falling back to sniffing the content.
pub fn read_spreadsheet_file(path: &Path) -> EngineResult<RawTable> {
    let bytes = fs::read(path).map_err(|e| EngineError::SpreadsheetRead {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;
    if bytes.is_empty() {
        return Err(EngineError::NoFileProvided);
    }
    let format = SpreadsheetFormat::from_path(path).unwrap_or_else(|| SpreadsheetFormat::sniff(&bytes));
    parse_spreadsheet(&bytes, format)
}

/// Serializes a view to spreadsheet bytes.
pub fn export_spreadsheet(
    view: &RosterView,
    format: SpreadsheetFormat,
    policy: &AccrualPolicy,
) -> EngineResult<Vec<u8>> {
    match format {
        SpreadsheetFormat::Csv => delimited::export_to_bytes(view),
        SpreadsheetFormat::Excel => excel::export_to_bytes(view, policy),
    }
}

/// Writes a view to a file, choosing the format by extension (xlsx when unknown).
pub fn write_spreadsheet_file(
    path: &Path,
    view: &RosterView,
    policy: &AccrualPolicy,
) -> EngineResult<SpreadsheetFormat> {
    let format = SpreadsheetFormat::from_path(path).unwrap_or(SpreadsheetFormat::Excel);
    let bytes = export_spreadsheet(view, format, policy)?;
    fs::write(path, bytes).map_err(|e| EngineError::Export {
        message: format!("Failed to write {}: {}", path.display(), e),
    })?;
    Ok(format)
}
