//! Error types for the PTO burn engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while reading a roster and
//! computing remaining hours.

use thiserror::Error;

/// The main error type for the PTO burn engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use pto_burn::error::EngineError;
///
/// let error = EngineError::MissingColumn {
///     column: "Pay Type".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required column: Pay Type");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The uploaded table contained a header but no data rows.
    #[error("The uploaded file appears to be empty")]
    EmptyInput,

    /// No spreadsheet was supplied at all.
    #[error("Please upload an Excel file")]
    NoFileProvided,

    /// A required column was not present in the header row.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// A `Regular Hours` cell could not be parsed as a number.
    #[error("could not convert Regular Hours value '{value}' on row {row} to a number")]
    NumericParse {
        /// The 1-based data row (excluding the header) of the bad cell.
        row: usize,
        /// The raw cell text as read from the spreadsheet.
        value: String,
    },

    /// Remaining hours for a row fall outside the representable range.
    #[error("Remaining Hours for row {row} is out of range (Regular Hours value '{value}')")]
    HoursOutOfRange {
        /// The 1-based data row (excluding the header).
        row: usize,
        /// The raw `Regular Hours` cell text.
        value: String,
    },

    /// The uploaded bytes could not be read as a spreadsheet.
    #[error("Failed to read spreadsheet: {message}")]
    SpreadsheetRead {
        /// A description of the read failure.
        message: String,
    },

    /// Writing the result table back to a spreadsheet failed.
    #[error("Failed to export spreadsheet: {message}")]
    Export {
        /// A description of the export failure.
        message: String,
    },

    /// Policy file was not found at the specified path.
    #[error("Policy file not found: {path}")]
    PolicyNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Policy file could not be parsed.
    #[error("Failed to parse policy file '{path}': {message}")]
    PolicyParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Policy values are inconsistent or out of range.
    #[error("Invalid accrual policy: {message}")]
    InvalidPolicy {
        /// A description of what made the policy invalid.
        message: String,
    },
}

impl EngineError {
    /// Returns true for the conditions that are reported to the user as a
    /// plain message rather than as a processing error.
    pub fn is_notice(&self) -> bool {
        matches!(self, EngineError::EmptyInput | EngineError::NoFileProvided)
    }

    /// Returns true for errors caused by the uploaded file itself.
    pub fn is_upload_error(&self) -> bool {
        matches!(
            self,
            EngineError::EmptyInput
                | EngineError::NoFileProvided
                | EngineError::MissingColumn { .. }
                | EngineError::NumericParse { .. }
                | EngineError::HoursOutOfRange { .. }
                | EngineError::SpreadsheetRead { .. }
        )
    }

    /// The single message line shown to the user for this error.
    ///
    /// ```
    /// use pto_burn::error::EngineError;
    ///
    /// assert_eq!(
    ///     EngineError::EmptyInput.user_message(),
    ///     "The uploaded file appears to be empty"
    /// );
    /// let err = EngineError::MissingColumn { column: "Regular Hours".to_string() };
    /// assert_eq!(
    ///     err.user_message(),
    ///     "Error processing file: Missing required column: Regular Hours"
    /// );
    /// ```
    pub fn user_message(&self) -> String {
        if self.is_notice() {
            self.to_string()
        } else {
            format!("Error processing file: {}", self)
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
