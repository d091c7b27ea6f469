//! The outermost result handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::RosterTable;

/// Either a computed roster or a single user-facing message.
///
/// Upload problems (no file, empty file, missing column, unparseable
/// hours, unreadable spreadsheet) become a message; anything else is
/// still returned as an error for the caller to handle.
///
/// # Example
///
/// ```
/// use pto_burn::error::EngineError;
/// use pto_burn::models::RosterView;
///
/// let view = RosterView::from_result(Err(EngineError::EmptyInput)).unwrap();
/// assert_eq!(view.message(), Some("The uploaded file appears to be empty"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RosterView {
    /// The computed roster.
    Table(RosterTable),
    /// A single message row.
    Message {
        /// The text shown to the user.
        message: String,
    },
}

impl RosterView {
    /// Creates a message view.
    pub fn message_of(message: impl Into<String>) -> Self {
        RosterView::Message {
            message: message.into(),
        }
    }

    /// The prompt shown before any file has been supplied.
    pub fn no_file() -> Self {
        Self::message_of(EngineError::NoFileProvided.user_message())
    }

    /// Converts a transform result into a view, recovering upload errors as messages.
    pub fn from_result(result: EngineResult<RosterTable>) -> EngineResult<Self> {
        match result {
            Ok(table) => Ok(RosterView::Table(table)),
            Err(err) if err.is_upload_error() => Ok(Self::message_of(err.user_message())),
            Err(err) => Err(err),
        }
    }

    /// Returns the roster if this view holds one.
    pub fn table(&self) -> Option<&RosterTable> {
        match self {
            RosterView::Table(table) => Some(table),
            RosterView::Message { .. } => None,
        }
    }

    /// Returns the message if this view holds one.
    pub fn message(&self) -> Option<&str> {
        match self {
            RosterView::Table(_) => None,
            RosterView::Message { message } => Some(message),
        }
    }
}
