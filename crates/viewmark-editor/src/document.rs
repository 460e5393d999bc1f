//! Documents: rope-backed text with a name and a global point.
//!
//! A `Document` wraps a [`ropey::Rope`] and speaks char offsets, the unit the
//! position tracker stores. Every edit returns the [`Edit`] describing it so
//! the session can forward it to cursors and trackers.
//!
//! # Design choices
//!
//! - **Offsets are chars**, never bytes. `ropey` converts in O(log n).
//!
//! - **The global point** is where the document was last left off by any
//!   viewport. A viewport switching to the document starts there: that is
//!   the host's default position, which the tracker overrides when the
//!   viewport has its own memory.
//!
//! - **Out-of-range edits return `None`** instead of panicking; script input
//!   reaches these methods directly.

use std::fmt;

use ropey::Rope;
use viewmark_core::{DocumentId, Edit};

use crate::position::Position;

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// What a document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Ordinary editable text.
    Text,
    /// A directory listing or similar generated view. Its content is
    /// regenerated wholesale, so remembered offsets are not restored.
    Listing,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Listing => f.write_str("listing"),
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// An open document.
pub struct Document {
    id: DocumentId,
    name: String,
    kind: DocumentKind,
    rope: Rope,
    point: usize,
}

impl Document {
    // -- Construction -------------------------------------------------------

    #[must_use]
    pub fn new(id: DocumentId, name: impl Into<String>, text: &str, kind: DocumentKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            rope: Rope::from_str(text),
            point: 0,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Total char count.
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// True when the document contains no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Collect all text into a `String`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    /// Where the document was last left off.
    #[inline]
    #[must_use]
    pub const fn point(&self) -> usize {
        self.point
    }

    /// Record where the document was left off, clamped to its length.
    pub fn set_point(&mut self, offset: usize) {
        self.point = self.clamp(offset);
    }

    // -- Coordinates --------------------------------------------------------

    /// Clamp an offset to `0..=len_chars()`.
    #[inline]
    #[must_use]
    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.rope.len_chars())
    }

    /// Convert a char offset to a (line, col) position, clamping first.
    #[must_use]
    pub fn position_of(&self, offset: usize) -> Position {
        let idx = self.clamp(offset);
        let line = self.rope.char_to_line(idx);
        Position::new(line, idx - self.rope.line_to_char(line))
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at `at`. Returns `None` if `at` is past the end.
    ///
    /// The document's own point follows the marker rules of [`Edit`].
    pub fn insert(&mut self, at: usize, text: &str) -> Option<Edit> {
        if at > self.rope.len_chars() {
            return None;
        }
        self.rope.insert(at, text);
        let edit = Edit::insert(at, text.chars().count());
        self.point = edit.map_offset(self.point);
        Some(edit)
    }

    /// Delete the chars in `[start, end)`. Returns `None` if the range is
    /// out of bounds.
    pub fn delete(&mut self, start: usize, end: usize) -> Option<Edit> {
        let edit = Edit::delete(start, end);
        let Edit::Delete { start, end } = edit else {
            return None;
        };
        if end > self.rope.len_chars() {
            return None;
        }
        self.rope.remove(start..end);
        self.point = edit.map_offset(self.point);
        Some(edit)
    }

    /// Replace the whole content, the way a listing refreshes itself.
    ///
    /// Returns the delete and insert edits, in application order.
    pub fn regenerate(&mut self, text: &str) -> [Edit; 2] {
        let cleared = Edit::delete(0, self.rope.len_chars());
        self.rope = Rope::from_str(text);
        let filled = Edit::insert(0, self.rope.len_chars());
        self.point = self.clamp(self.point);
        [cleared, filled]
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("len_chars", &self.rope.len_chars())
            .field("point", &self.point)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::new(DocumentId(1), "notes", text, DocumentKind::Text)
    }

    // ── Basics ───────────────────────────────────────────────────────────

    #[test]
    fn new_document() {
        let d = doc("hello\nworld\n");
        assert_eq!(d.name(), "notes");
        assert_eq!(d.kind(), DocumentKind::Text);
        assert_eq!(d.len_chars(), 12);
        assert_eq!(d.point(), 0);
        assert!(!d.is_empty());
        assert!(doc("").is_empty());
    }

    #[test]
    fn position_of_counts_chars() {
        let d = doc("café\nbar");
        assert_eq!(d.position_of(3), Position::new(0, 3));
        assert_eq!(d.position_of(5), Position::new(1, 0));
        assert_eq!(d.position_of(99), Position::new(1, 3));
    }

    #[test]
    fn set_point_clamps() {
        let mut d = doc("abc");
        d.set_point(10);
        assert_eq!(d.point(), 3);
    }

    // ── Editing ──────────────────────────────────────────────────────────

    #[test]
    fn insert_reports_char_length() {
        let mut d = doc("ab");
        assert_eq!(d.insert(1, "éé"), Some(Edit::insert(1, 2)));
        assert_eq!(d.contents(), "aééb");
    }

    #[test]
    fn insert_past_end_is_rejected() {
        let mut d = doc("ab");
        assert_eq!(d.insert(3, "x"), None);
        assert_eq!(d.contents(), "ab");
    }

    #[test]
    fn insert_shifts_point_after_it() {
        let mut d = doc("abcdef");
        d.set_point(4);
        d.insert(1, "xx");
        assert_eq!(d.point(), 6);
        d.insert(6, "yy");
        assert_eq!(d.point(), 6);
    }

    #[test]
    fn delete_range() {
        let mut d = doc("abcdef");
        d.set_point(5);
        assert_eq!(d.delete(4, 1), Some(Edit::delete(1, 4)));
        assert_eq!(d.contents(), "aef");
        assert_eq!(d.point(), 2);
    }

    #[test]
    fn delete_out_of_bounds_is_rejected() {
        let mut d = doc("abc");
        assert_eq!(d.delete(1, 9), None);
        assert_eq!(d.contents(), "abc");
    }

    #[test]
    fn regenerate_replaces_everything() {
        let mut d = Document::new(DocumentId(2), "dir", "a.txt\nb.txt\n", DocumentKind::Listing);
        d.set_point(8);
        let edits = d.regenerate("c\n");
        assert_eq!(edits, [Edit::delete(0, 12), Edit::insert(0, 2)]);
        assert_eq!(d.contents(), "c\n");
        assert_eq!(d.point(), 2);
    }
}
