//! Error types for sheetkit.

use sheetkit_core::ErrorKind;
use thiserror::Error;

/// Failures reported by a host service.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("host rejected the request: {0}")]
    Rejected(String),

    #[error("no active spreadsheet; pass a spreadsheet id")]
    NoActiveDocument,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "rest")]
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Errors returned by sheetkit handles.
#[derive(Debug, Error)]
pub enum Error {
    /// Local validation or lookup failure
    #[error(transparent)]
    Kind(#[from] sheetkit_core::Error),

    /// Host failure passed through unchanged
    #[error(transparent)]
    Host(#[from] HostError),

    /// Host failure caught and boxed together with the operation that hit it
    #[error("{function_name}() failed: {error}")]
    Operation {
        function_name: &'static str,
        error: HostError,
    },
}

impl Error {
    pub(crate) fn kind_with(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error::Kind(sheetkit_core::Error::new(kind, context))
    }

    pub(crate) fn boxed(function_name: &'static str) -> impl FnOnce(HostError) -> Self {
        move |error| Error::Operation {
            function_name,
            error,
        }
    }

    /// The classified kind, for local failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Kind(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// The operation name, for boxed host failures.
    pub fn function_name(&self) -> Option<&'static str> {
        match self {
            Error::Operation { function_name, .. } => Some(*function_name),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
