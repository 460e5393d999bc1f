//! The host seam: what the core needs from an editor.
//!
//! ```text
//! Tracker (core)                      Host (editor implements)
//! ┌──────────────────┐                ┌──────────────────────────────┐
//! │ record()         │───────────────▶│ live_viewports()             │
//! │ watch()          │                │ document_of(viewport)        │
//! │ restore()        │                │ cursor_offset(viewport)      │
//! │ collect()        │◀───────────────│ set_cursor_offset(vp, off)   │
//! └──────────────────┘                │ is_live(doc) / is_excluded() │
//!                                     └──────────────────────────────┘
//! ```
//!
//! A `Host` is scoped to one display context (a frame): `live_viewports`
//! enumerates only that context's viewports. Hosts with several top-level
//! frames run one [`Tracker`](crate::tracker::Tracker) per frame.

use crate::error::HostError;
use crate::id::{DocumentId, ViewportId};

/// Editor operations the core depends on.
pub trait Host {
    /// All currently visible viewports of this display context.
    fn live_viewports(&self) -> Vec<ViewportId>;

    /// The document `viewport` is showing.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownViewport`] if the viewport is gone.
    fn document_of(&self, viewport: ViewportId) -> Result<DocumentId, HostError>;

    /// The cursor's char offset within the viewport's document.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownViewport`] if the viewport is gone.
    fn cursor_offset(&self, viewport: ViewportId) -> Result<usize, HostError>;

    /// Move the viewport's cursor. The host clamps out-of-range offsets.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport or its document is gone.
    fn set_cursor_offset(&mut self, viewport: ViewportId, offset: usize) -> Result<(), HostError>;

    /// Whether `document` is still open.
    fn is_live(&self, document: DocumentId) -> bool;

    /// Whether `document` regenerates its content (directory listings and
    /// the like), making a remembered offset meaningless.
    fn is_excluded(&self, document: DocumentId) -> bool;
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------
