//! # viewmark-editor: a scriptable host for per-viewport cursor memory
//!
//! A small in-memory editor that implements [`viewmark_core::Host`] and drives
//! the tracker hooks from its own commands:
//!
//! - **[`document`]**: `Document`, rope-backed text with a global point
//! - **[`layout`]**: `Split` tree of a frame's viewports
//! - **[`session`]**: `Session`, documents and frames that dispatch the hooks
//! - **[`command`]**: script line parser
//! - **[`runner`]**: run a script against a session
//! - **[`position`]**: `line:col` for reports
//!
//! ```text
//! script ──▶ command::parse_line ──▶ runner::execute ──▶ Session
//!                                                          │
//!                                   PointMemory hooks ◀────┘ (per frame)
//! ```

pub mod command;
pub mod document;
pub mod error;
pub mod layout;
pub mod position;
pub mod runner;
pub mod session;

pub use document::{Document, DocumentKind};
pub use error::{ScriptError, SessionError};
pub use layout::{Orientation, Split};
pub use session::{Frame, FrameId, Session, View};
