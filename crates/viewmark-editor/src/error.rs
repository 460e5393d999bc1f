//! Session and script errors.

use thiserror::Error;
use viewmark_core::{DocumentId, OptionError, ViewportId};

/// Errors from [`Session`](crate::session::Session) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no document named '{0}'")]
    NoSuchName(String),

    #[error("document name '{0}' already in use")]
    DuplicateName(String),

    #[error("unknown document {0}")]
    UnknownDocument(DocumentId),

    #[error("unknown viewport {0}")]
    UnknownViewport(ViewportId),

    #[error("cannot close the last viewport of a frame")]
    LastViewport,

    #[error("offset {offset} out of range for '{name}' (length {len})")]
    OutOfRange {
        name: String,
        offset: usize,
        len: usize,
    },

    #[error(transparent)]
    Option(#[from] OptionError),
}

/// Errors from parsing or running a script. Line numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Session {
        line: usize,
        #[source]
        source: SessionError,
    },

    #[error("line {line}: expected {viewport} at offset {expected}, found {found}")]
    Expectation {
        line: usize,
        viewport: ViewportId,
        expected: usize,
        found: usize,
    },
}

impl ScriptError {
    /// The script line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Parse { line, .. } | Self::Session { line, .. } | Self::Expectation { line, .. } => {
                *line
            }
        }
    }
}
