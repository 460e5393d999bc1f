//! Position markers: offsets that follow edits to their document.
//!
//! A [`Marker`] is a char offset attached to one document. The attachment is
//! fixed for the marker's lifetime; only the offset moves, either because
//! the store repositions it (a fresh snapshot) or because an [`Edit`] to the
//! attached document shifted the text around it.
//!
//! # Adjustment rules
//!
//! | Edit                      | Marker at `m`                              |
//! |---------------------------|--------------------------------------------|
//! | insert `len` chars at `a` | `m > a` → `m + len`; `m <= a` → unchanged  |
//! | delete `[s, e)`           | `m >= e` → `m - (e - s)`; `s < m < e` → `s` |
//!
//! A marker sitting exactly at an insertion point stays before the inserted
//! text. The host's own cursor usually advances past text it types, so the
//! remembered position for other viewports keeps pointing at what the user
//! last saw there.

use crate::id::DocumentId;

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// A change to a document's content, in char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// `len` chars inserted at offset `at`.
    Insert { at: usize, len: usize },

    /// The half-open range `[start, end)` removed.
    Delete { start: usize, end: usize },
}

impl Edit {
    /// An insertion of `len` chars at `at`.
    #[inline]
    #[must_use]
    pub const fn insert(at: usize, len: usize) -> Self {
        Self::Insert { at, len }
    }

    /// A deletion of `[a, b)`. The endpoints are ordered if given backwards.
    #[inline]
    #[must_use]
    pub const fn delete(a: usize, b: usize) -> Self {
        if a <= b {
            Self::Delete { start: a, end: b }
        } else {
            Self::Delete { start: b, end: a }
        }
    }

    /// True when the edit leaves every offset where it was.
    #[inline]
    #[must_use]
    pub const fn is_noop(self) -> bool {
        match self {
            Self::Insert { len, .. } => len == 0,
            Self::Delete { start, end } => start == end,
        }
    }

    /// Where `offset` ends up after this edit is applied.
    #[must_use]
    pub const fn map_offset(self, offset: usize) -> usize {
        match self {
            Self::Insert { at, len } => {
                if offset > at {
                    offset.saturating_add(len)
                } else {
                    offset
                }
            }
            Self::Delete { start, end } => {
                if offset >= end {
                    offset - (end - start)
                } else if offset > start {
                    start
                } else {
                    offset
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Marker
// ---------------------------------------------------------------------------

/// A self-adjusting location in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    document: DocumentId,
    offset: usize,
}

impl Marker {
    /// Create a marker at `offset` in `document`.
    #[must_use]
    pub const fn new(document: DocumentId, offset: usize) -> Self {
        Self { document, offset }
    }

    /// The document this marker is attached to.
    #[inline]
    #[must_use]
    pub const fn document(&self) -> DocumentId {
        self.document
    }

    /// Current char offset.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Move the marker to a new offset, keeping its document.
    #[inline]
    pub const fn reposition(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Shift the marker for an edit made to its document.
    #[inline]
    pub const fn apply(&mut self, edit: Edit) {
        self.offset = edit.map_offset(self.offset);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
