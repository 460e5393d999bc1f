//! Error types for the host seam and option parsing.
//!
//! Host errors never leave a hook: the recorder, watcher and restore policy
//! log them at `debug` and carry on. They exist so adapters can report
//! "that viewport vanished under me" without panicking.

use thiserror::Error;

use crate::id::{DocumentId, ViewportId};

/// Failures an adapter may report from [`Host`](crate::host::Host) calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The viewport is not (or no longer) known to the host.
    #[error("unknown viewport {0}")]
    UnknownViewport(ViewportId),

    /// The document was closed or destroyed.
    #[error("document {0} is dead")]
    DeadDocument(DocumentId),
}

/// Errors from applying `:set`-style option directives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// No option with this name or abbreviation.
    #[error("unknown option: {0}")]
    Unknown(String),

    /// The value could not be parsed for this option.
    #[error("invalid value for '{option}': {value}")]
    InvalidValue { option: String, value: String },
}
