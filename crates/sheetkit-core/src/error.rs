//! Error types for sheetkit-core

use std::fmt;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Kinds of locally detected failures.
///
/// The user-facing text for each kind lives in [`ErrorKind::message`] so
/// control flow only ever matches on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No tab with the requested id or name exists in the document
    SheetNotFound,
    /// A sheet handle was requested without an id or name
    NeedSheetId,
    /// Column letters or number could not be interpreted
    InvalidColumn,
    /// Row number is zero or otherwise unusable
    InvalidRow,
    /// The host answered with a payload that is missing required parts
    UnexpectedResponse,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::SheetNotFound,
        ErrorKind::NeedSheetId,
        ErrorKind::InvalidColumn,
        ErrorKind::InvalidRow,
        ErrorKind::UnexpectedResponse,
    ];

    /// Display text for this kind.
    pub const fn message(self) -> &'static str {
        match self {
            ErrorKind::SheetNotFound => "Error: sheet not found",
            ErrorKind::NeedSheetId => "Error: enter sheet id or name",
            ErrorKind::InvalidColumn => "Error: invalid column",
            ErrorKind::InvalidRow => "Error: invalid row",
            ErrorKind::UnexpectedResponse => "Error: unexpected response from host",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors that can occur in sheetkit-core
#[derive(Debug, Error)]
pub enum Error {
    /// A classified failure with context (the offending input, usually)
    #[error("{kind} ({context})")]
    Kind { kind: ErrorKind, context: String },
}

impl Error {
    /// Build an error of the given kind with some context.
    pub fn new<S: Into<String>>(kind: ErrorKind, context: S) -> Self {
        Error::Kind {
            kind,
            context: context.into(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Kind { kind, .. } => *kind,
        }
    }
}
