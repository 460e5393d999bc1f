//! Session: documents and frames driving the position-memory hooks.
//!
//! A `Session` is a small in-memory editor: a set of named [`Document`]s and
//! one or more frames, each an independent display context with its own
//! [`Split`] layout, per-viewport cursors, and [`PointMemory`].
//!
//! # Event model
//!
//! Every public mutating method is one "command". Within it:
//!
//! ```text
//! command ──▶ mutate documents / layout
//!          ├─▶ viewport set changed?  ──▶ PointMemory::on_configuration_change (that frame)
//!          ├─▶ text edited?           ──▶ PointMemory::on_edit (every frame)
//!          └─▶ always, at the end     ──▶ PointMemory::on_command (every frame)
//! ```
//!
//! Configuration hooks fire synchronously inside the command that changed the
//! layout, before the command hook records positions. Recording first would
//! overwrite the remembered position with the host default the moment a
//! viewport switched documents.
//!
//! # Host default position
//!
//! Each document keeps a global point: where any viewport last left it. A
//! viewport switching to a document starts there; the tracker then moves it
//! to the viewport's own remembered offset, if it has one.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use rustc_hash::FxHashMap;
use tracing::{debug, info};
use viewmark_core::watcher::WatchReport;
use viewmark_core::{
    DocumentId, Edit, Host, HostError, Options, PointMemory, Tracker, ViewportId,
};

use crate::document::{Document, DocumentKind};
use crate::error::SessionError;
use crate::layout::{Orientation, Split};

/// Name of the document a session starts with, and falls back to when the
/// last document is killed.
pub const SCRATCH: &str = "*scratch*";

type Documents = BTreeMap<DocumentId, Document>;

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Index of a frame within its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub usize);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {}", self.0)
    }
}

/// What a viewport is showing and where its cursor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    pub document: DocumentId,
    pub cursor: usize,
}

/// A top-level display context.
#[derive(Debug)]
pub struct Frame {
    id: FrameId,
    layout: Split,
    views: FxHashMap<ViewportId, View>,
    focused: ViewportId,
    memory: PointMemory,
}

impl Frame {
    #[inline]
    #[must_use]
    pub const fn id(&self) -> FrameId {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn layout(&self) -> &Split {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub const fn focused(&self) -> ViewportId {
        self.focused
    }

    /// Viewports in layout order.
    #[must_use]
    pub fn viewports(&self) -> Vec<ViewportId> {
        self.layout.leaves()
    }

    #[must_use]
    pub fn view(&self, viewport: ViewportId) -> Option<View> {
        self.views.get(&viewport).copied()
    }

    /// This frame's tracker, when position memory is enabled.
    #[must_use]
    pub const fn tracker(&self) -> Option<&Tracker> {
        self.memory.tracker()
    }
}

/// Split a frame into its hook state and a [`Host`] view over it.
fn frame_parts<'a>(
    frame: &'a mut Frame,
    documents: &'a mut Documents,
) -> (&'a mut PointMemory, FrameHost<'a>) {
    let Frame {
        layout,
        views,
        memory,
        ..
    } = frame;
    (
        memory,
        FrameHost {
            layout,
            views,
            documents,
        },
    )
}

// ---------------------------------------------------------------------------
// Host adapter
// ---------------------------------------------------------------------------

/// One frame seen through the core's [`Host`] trait.
struct FrameHost<'a> {
    layout: &'a mut Split,
    views: &'a mut FxHashMap<ViewportId, View>,
    documents: &'a mut Documents,
}

impl Host for FrameHost<'_> {
    fn live_viewports(&self) -> Vec<ViewportId> {
        self.layout.leaves()
    }

    fn document_of(&self, viewport: ViewportId) -> Result<DocumentId, HostError> {
        self.views
            .get(&viewport)
            .map(|view| view.document)
            .ok_or(HostError::UnknownViewport(viewport))
    }

    fn cursor_offset(&self, viewport: ViewportId) -> Result<usize, HostError> {
        self.views
            .get(&viewport)
            .map(|view| view.cursor)
            .ok_or(HostError::UnknownViewport(viewport))
    }

    fn set_cursor_offset(&mut self, viewport: ViewportId, offset: usize) -> Result<(), HostError> {
        let view = self
            .views
            .get_mut(&viewport)
            .ok_or(HostError::UnknownViewport(viewport))?;
        let doc = self
            .documents
            .get_mut(&view.document)
            .ok_or(HostError::DeadDocument(view.document))?;
        view.cursor = doc.clamp(offset);
        doc.set_point(view.cursor);
        Ok(())
    }

    fn is_live(&self, document: DocumentId) -> bool {
        self.documents.contains_key(&document)
    }

    fn is_excluded(&self, document: DocumentId) -> bool {
        self.documents
            .get(&document)
            .is_some_and(|doc| doc.kind() == DocumentKind::Listing)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// An in-memory editor session.
#[derive(Debug)]
pub struct Session {
    documents: Documents,
    frames: Vec<Frame>,
    current: usize,
    next_viewport: u64,
    next_document: u64,
    options: Options,
    enabled: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Session {
    // -- Construction -------------------------------------------------------

    /// A session with one frame showing an empty scratch document, position
    /// memory enabled.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let scratch = DocumentId(1);
        let viewport = ViewportId(1);

        let mut documents = Documents::new();
        documents.insert(
            scratch,
            Document::new(scratch, SCRATCH, "", DocumentKind::Text),
        );

        let frame = Frame {
            id: FrameId(0),
            layout: Split::leaf(viewport),
            views: std::iter::once((
                viewport,
                View {
                    document: scratch,
                    cursor: 0,
                },
            ))
            .collect(),
            focused: viewport,
            memory: PointMemory::enabled(options),
        };

        let mut session = Self {
            documents,
            frames: vec![frame],
            current: 0,
            next_viewport: 2,
            next_document: 2,
            options,
            enabled: true,
        };
        info!("session started");
        session.configuration_changed(0);
        session.command_done();
        session
    }

    // -- Queries ------------------------------------------------------------

    /// Open documents in ID order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    #[must_use]
    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    /// Look up a document by name.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoSuchName`] if no open document has it.
    pub fn find(&self, name: &str) -> Result<DocumentId, SessionError> {
        self.documents
            .values()
            .find(|doc| doc.name() == name)
            .map(Document::id)
            .ok_or_else(|| SessionError::NoSuchName(name.to_string()))
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[must_use]
    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current]
    }

    /// The focused viewport of the current frame.
    #[must_use]
    pub fn focused(&self) -> ViewportId {
        self.current_frame().focused
    }

    #[must_use]
    pub fn view(&self, viewport: ViewportId) -> Option<View> {
        self.frames.iter().find_map(|frame| frame.view(viewport))
    }

    /// Cursor offset of a viewport.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownViewport`] if no frame has it.
    pub fn cursor(&self, viewport: ViewportId) -> Result<usize, SessionError> {
        self.view(viewport)
            .map(|view| view.cursor)
            .ok_or(SessionError::UnknownViewport(viewport))
    }

    #[must_use]
    pub const fn options(&self) -> Options {
        self.options
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    // -- Documents ----------------------------------------------------------

    /// Create a text document and show it in the focused viewport.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DuplicateName`] if the name is taken.
    pub fn open(&mut self, name: &str, text: &str) -> Result<DocumentId, SessionError> {
        self.open_kind(name, text, DocumentKind::Text)
    }

    /// Create a listing document and show it in the focused viewport.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DuplicateName`] if the name is taken.
    pub fn open_listing(&mut self, name: &str, text: &str) -> Result<DocumentId, SessionError> {
        self.open_kind(name, text, DocumentKind::Listing)
    }

    fn open_kind(
        &mut self,
        name: &str,
        text: &str,
        kind: DocumentKind,
    ) -> Result<DocumentId, SessionError> {
        let id = self.create(name, text, kind)?;
        let viewport = self.focused();
        self.switch_view(self.current, viewport, id);
        self.configuration_changed(self.current);
        self.command_done();
        Ok(id)
    }

    fn create(
        &mut self,
        name: &str,
        text: &str,
        kind: DocumentKind,
    ) -> Result<DocumentId, SessionError> {
        if self.documents.values().any(|doc| doc.name() == name) {
            return Err(SessionError::DuplicateName(name.to_string()));
        }
        let id = DocumentId(self.next_document);
        self.next_document += 1;
        self.documents.insert(id, Document::new(id, name, text, kind));
        debug!(%id, name, %kind, "document created");
        Ok(id)
    }

    /// Close a document. Viewports showing it switch to another document
    /// (a fresh scratch document if none is left).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownDocument`] if it is not open.
    pub fn kill(&mut self, document: DocumentId) -> Result<(), SessionError> {
        if self.documents.remove(&document).is_none() {
            return Err(SessionError::UnknownDocument(document));
        }
        info!(%document, "document killed");

        let replacement = match self.documents.keys().next() {
            Some(&id) => id,
            None => self.create(SCRATCH, "", DocumentKind::Text)?,
        };
        let start = self.documents[&replacement].point();

        let mut affected = Vec::new();
        for (idx, frame) in self.frames.iter_mut().enumerate() {
            let mut touched = false;
            for view in frame.views.values_mut() {
                if view.document == document {
                    *view = View {
                        document: replacement,
                        cursor: start,
                    };
                    touched = true;
                }
            }
            if touched {
                affected.push(idx);
            }
        }

        for idx in affected {
            self.configuration_changed(idx);
        }
        self.command_done();
        Ok(())
    }

    // -- Viewports ----------------------------------------------------------

    /// Show `document` in `viewport`.
    ///
    /// # Errors
    ///
    /// Returns an error if either is unknown.
    pub fn show(&mut self, viewport: ViewportId, document: DocumentId) -> Result<(), SessionError> {
        if !self.documents.contains_key(&document) {
            return Err(SessionError::UnknownDocument(document));
        }
        let frame = self.frame_of(viewport)?;
        self.switch_view(frame, viewport, document);
        self.configuration_changed(frame);
        self.command_done();
        Ok(())
    }

    /// Split the focused viewport. The new viewport shows the same document
    /// at the same cursor; focus stays put.
    pub fn split(&mut self, orientation: Orientation) -> ViewportId {
        let frame = &mut self.frames[self.current];
        let target = frame.focused;
        let new_id = ViewportId(self.next_viewport);
        self.next_viewport += 1;

        let view = frame.views[&target];
        frame.layout.split(target, new_id, orientation);
        frame.views.insert(new_id, view);
        debug!(%target, %new_id, ?orientation, "viewport split");

        self.configuration_changed(self.current);
        self.command_done();
        new_id
    }

    /// Close a viewport.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::LastViewport`] for a frame's only viewport,
    /// or [`SessionError::UnknownViewport`].
    pub fn close(&mut self, viewport: ViewportId) -> Result<(), SessionError> {
        let idx = self.frame_of(viewport)?;
        let frame = &mut self.frames[idx];
        if frame.layout.viewport_count() <= 1 {
            return Err(SessionError::LastViewport);
        }
        if frame.focused == viewport {
            frame.focused = frame.layout.cycle_next(viewport);
        }
        frame.layout.remove(viewport);
        if let Some(view) = frame.views.remove(&viewport) {
            if let Some(doc) = self.documents.get_mut(&view.document) {
                doc.set_point(view.cursor);
            }
        }
        debug!(%viewport, "viewport closed");

        self.configuration_changed(idx);
        self.command_done();
        Ok(())
    }

    /// Close every viewport of the current frame except the focused one.
    /// Returns the closed viewports.
    pub fn only(&mut self) -> Vec<ViewportId> {
        let frame = &mut self.frames[self.current];
        let removed = frame.layout.keep_only(frame.focused);
        for viewport in &removed {
            frame.views.remove(viewport);
        }

        self.configuration_changed(self.current);
        self.command_done();
        removed
    }

    /// Focus a viewport, making its frame current.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownViewport`].
    pub fn focus(&mut self, viewport: ViewportId) -> Result<(), SessionError> {
        let idx = self.frame_of(viewport)?;
        self.current = idx;
        self.frames[idx].focused = viewport;
        self.command_done();
        Ok(())
    }

    /// Open a new frame showing the focused document where the cursor is.
    pub fn new_frame(&mut self) -> FrameId {
        let focused = self.focused();
        let view = self.frames[self.current].views[&focused];
        if let Some(doc) = self.documents.get_mut(&view.document) {
            doc.set_point(view.cursor);
        }

        let viewport = ViewportId(self.next_viewport);
        self.next_viewport += 1;
        let id = FrameId(self.frames.len());
        let memory = if self.enabled {
            PointMemory::enabled(self.options)
        } else {
            PointMemory::new(self.options)
        };
        self.frames.push(Frame {
            id,
            layout: Split::leaf(viewport),
            views: std::iter::once((viewport, view)).collect(),
            focused: viewport,
            memory,
        });
        self.current = id.0;
        info!(%id, %viewport, "frame created");

        self.configuration_changed(id.0);
        self.command_done();
        id
    }

    /// Fire a configuration event on the current frame without changing
    /// anything, the way a resize would.
    pub fn refresh(&mut self) -> Option<WatchReport> {
        let report = self.configuration_changed(self.current);
        self.command_done();
        report
    }

    // -- Cursor and text ----------------------------------------------------

    /// Move a viewport's cursor, clamped to its document. Returns the
    /// resulting offset.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownViewport`].
    pub fn goto(&mut self, viewport: ViewportId, offset: usize) -> Result<usize, SessionError> {
        let idx = self.frame_of(viewport)?;
        let view = self.frames[idx]
            .views
            .get_mut(&viewport)
            .ok_or(SessionError::UnknownViewport(viewport))?;
        let doc = self
            .documents
            .get_mut(&view.document)
            .ok_or(SessionError::UnknownDocument(view.document))?;
        view.cursor = doc.clamp(offset);
        doc.set_point(view.cursor);
        let cursor = view.cursor;
        self.command_done();
        Ok(cursor)
    }

    /// Type text at the focused cursor; the cursor ends after it.
    ///
    /// # Errors
    ///
    /// Returns an error if the focused view is inconsistent with its
    /// document.
    pub fn type_text(&mut self, text: &str) -> Result<(), SessionError> {
        let viewport = self.focused();
        let view = self.frames[self.current].views[&viewport];
        let edit = self.edit_document(
            view.document,
            |doc| doc.insert(view.cursor, text),
            view.cursor,
        )?;

        let end = match edit {
            Edit::Insert { at, len } => at + len,
            Edit::Delete { start, .. } => start,
        };
        if let Some(view) = self.frames[self.current].views.get_mut(&viewport) {
            view.cursor = end;
        }
        if let Some(doc) = self.documents.get_mut(&view.document) {
            doc.set_point(end);
        }
        self.command_done();
        Ok(())
    }

    /// Insert text into a document at `at`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown documents or out-of-range offsets.
    pub fn insert(&mut self, document: DocumentId, at: usize, text: &str) -> Result<(), SessionError> {
        self.edit_document(document, |doc| doc.insert(at, text), at)?;
        self.command_done();
        Ok(())
    }

    /// Delete `[start, end)` from a document.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown documents or out-of-range offsets.
    pub fn delete(&mut self, document: DocumentId, start: usize, end: usize) -> Result<(), SessionError> {
        self.edit_document(document, |doc| doc.delete(start, end), start.max(end))?;
        self.command_done();
        Ok(())
    }

    /// Replace a document's whole content, the way a listing refreshes.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownDocument`].
    pub fn regenerate(&mut self, document: DocumentId, text: &str) -> Result<(), SessionError> {
        let doc = self
            .documents
            .get_mut(&document)
            .ok_or(SessionError::UnknownDocument(document))?;
        for edit in doc.regenerate(text) {
            self.broadcast_edit(document, edit);
        }
        self.command_done();
        Ok(())
    }

    /// Apply an edit through `apply`, then forward it to cursors and
    /// trackers. `offset` is only used for the out-of-range error.
    fn edit_document(
        &mut self,
        document: DocumentId,
        apply: impl FnOnce(&mut Document) -> Option<Edit>,
        offset: usize,
    ) -> Result<Edit, SessionError> {
        let doc = self
            .documents
            .get_mut(&document)
            .ok_or(SessionError::UnknownDocument(document))?;
        let edit = apply(&mut *doc).ok_or_else(|| SessionError::OutOfRange {
            name: doc.name().to_string(),
            offset,
            len: doc.len_chars(),
        })?;
        self.broadcast_edit(document, edit);
        Ok(edit)
    }

    /// Shift every cursor and stored marker in `document` for `edit`.
    fn broadcast_edit(&mut self, document: DocumentId, edit: Edit) {
        for frame in &mut self.frames {
            for view in frame.views.values_mut() {
                if view.document == document {
                    view.cursor = edit.map_offset(view.cursor);
                }
            }
            frame.memory.on_edit(document, edit);
        }
    }

    // -- Position memory ----------------------------------------------------

    /// Apply `:set` arguments to every frame's tracker options.
    ///
    /// Nothing changes if any directive fails.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Option`] for bad directives.
    pub fn set_options(&mut self, args: &str) -> Result<Vec<String>, SessionError> {
        let mut options = self.options;
        let output = options.apply_str(args)?;
        self.options = options;
        for frame in &mut self.frames {
            frame.memory.set_options(options);
        }
        self.command_done();
        Ok(output)
    }

    /// Turn position memory on in every frame. Returns `false` if it
    /// already was.
    pub fn enable(&mut self) -> bool {
        if self.enabled {
            return false;
        }
        self.enabled = true;
        for frame in &mut self.frames {
            frame.memory.enable();
        }
        self.command_done();
        true
    }

    /// Turn position memory off in every frame, forgetting everything.
    /// Returns `false` if it already was off.
    pub fn disable(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.enabled = false;
        for frame in &mut self.frames {
            frame.memory.disable();
        }
        true
    }

    // -- Reports ------------------------------------------------------------

    /// One line per viewport: focus marker, document, `line:col`, offset.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let _ = writeln!(out, "{}", frame.id);
            for viewport in frame.viewports() {
                let Some(view) = frame.view(viewport) else {
                    continue;
                };
                let mark = if viewport == frame.focused { '*' } else { ' ' };
                match self.documents.get(&view.document) {
                    Some(doc) => {
                        let _ = writeln!(
                            out,
                            "  {viewport}{mark} {} {} @{}",
                            doc.name(),
                            doc.position_of(view.cursor),
                            view.cursor
                        );
                    }
                    None => {
                        let _ = writeln!(out, "  {viewport}{mark} {} @{}", view.document, view.cursor);
                    }
                }
            }
        }
        out
    }

    /// Each frame's remembered positions, by viewport.
    #[must_use]
    pub fn describe_marks(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let Some(tracker) = frame.tracker() else {
                let _ = writeln!(out, "{} (disabled)", frame.id);
                continue;
            };
            let _ = writeln!(out, "{}", frame.id);
            let store = tracker.store();
            for viewport in store.viewports() {
                let entries: Vec<String> = store
                    .documents(viewport)
                    .into_iter()
                    .filter_map(|document| {
                        let offset = store.get(viewport, document)?;
                        let name = self
                            .documents
                            .get(&document)
                            .map_or_else(|| document.to_string(), |doc| doc.name().to_string());
                        Some(format!("{name}@{offset}"))
                    })
                    .collect();
                let _ = writeln!(out, "  {viewport}: {}", entries.join(" "));
            }
        }
        out
    }

    // -- Internals ----------------------------------------------------------

    fn frame_of(&self, viewport: ViewportId) -> Result<usize, SessionError> {
        self.frames
            .iter()
            .position(|frame| frame.views.contains_key(&viewport))
            .ok_or(SessionError::UnknownViewport(viewport))
    }

    /// Point `viewport` at `document`, starting at the document's global
    /// point. The document being left remembers where it was left off.
    fn switch_view(&mut self, frame: usize, viewport: ViewportId, document: DocumentId) {
        let Some(view) = self.frames[frame].views.get_mut(&viewport) else {
            return;
        };
        if let Some(old) = self.documents.get_mut(&view.document) {
            old.set_point(view.cursor);
        }
        let start = self.documents.get(&document).map_or(0, Document::point);
        *view = View {
            document,
            cursor: start,
        };
    }

    fn configuration_changed(&mut self, frame: usize) -> Option<WatchReport> {
        let (memory, mut host) = frame_parts(&mut self.frames[frame], &mut self.documents);
        let report = memory.on_configuration_change(&mut host)?;
        debug!(
            frame,
            restored = report.restored().len(),
            new = report.new_viewports,
            gc_markers = report.gc.markers_dropped,
            "configuration change"
        );
        Some(report)
    }

    fn command_done(&mut self) {
        for frame in &mut self.frames {
            let (memory, host) = frame_parts(frame, &mut self.documents);
            memory.on_command(&host);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session_with(text: &str) -> (Session, DocumentId) {
        let mut s = Session::default();
        let id = s.open("notes", text).unwrap();
        (s, id)
    }

    // ── Construction ─────────────────────────────────────────────────────

    #[test]
    fn new_session_has_scratch() {
        let s = Session::default();
        assert_eq!(s.frames().len(), 1);
        assert_eq!(s.focused(), ViewportId(1));
        assert_eq!(s.find(SCRATCH), Ok(DocumentId(1)));
        assert!(s.is_enabled());
        let tracker = s.current_frame().tracker().unwrap();
        assert_eq!(tracker.previous().get(ViewportId(1)), Some(DocumentId(1)));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (mut s, _) = session_with("x");
        assert_eq!(
            s.open("notes", "y"),
            Err(SessionError::DuplicateName("notes".into()))
        );
    }

    // ── Viewports ────────────────────────────────────────────────────────

    #[test]
    fn split_copies_view() {
        let (mut s, notes) = session_with("hello world");
        s.goto(s.focused(), 6).unwrap();
        let second = s.split(Orientation::Vertical);
        assert_eq!(s.view(second), Some(View { document: notes, cursor: 6 }));
        assert_eq!(s.focused(), ViewportId(1));
    }

    #[test]
    fn close_moves_focus_and_rejects_last() {
        let (mut s, _) = session_with("abc");
        let first = s.focused();
        let second = s.split(Orientation::Horizontal);
        s.close(first).unwrap();
        assert_eq!(s.focused(), second);
        assert_eq!(s.close(second), Err(SessionError::LastViewport));
        assert_eq!(
            s.close(ViewportId(99)),
            Err(SessionError::UnknownViewport(ViewportId(99)))
        );
    }

    #[test]
    fn goto_clamps() {
        let (mut s, _) = session_with("abc");
        assert_eq!(s.goto(s.focused(), 50), Ok(3));
    }

    #[test]
    fn switching_back_restores_viewport_position() {
        let (mut s, notes) = session_with("0123456789");
        let w = s.focused();
        s.goto(w, 5).unwrap();
        let todo = s.open("todo", "abc").unwrap();
        assert_eq!(s.view(w), Some(View { document: todo, cursor: 0 }));
        s.show(w, notes).unwrap();
        assert_eq!(s.cursor(w), Ok(5));
    }

    #[test]
    fn each_viewport_returns_to_its_own_offset() {
        let (mut s, notes) = session_with("0123456789");
        let w1 = s.focused();
        let w2 = s.split(Orientation::Vertical);
        s.goto(w2, 2).unwrap();
        let other = s.open("other", "").unwrap();
        s.show(w2, other).unwrap();

        // The document was last left at 2 by w2; w1 remembers 0.
        s.show(w1, notes).unwrap();
        assert_eq!(s.cursor(w1), Ok(0));

        s.goto(w1, 7).unwrap();
        s.show(w2, notes).unwrap();
        assert_eq!(s.cursor(w2), Ok(2));
    }

    // ── Edits ────────────────────────────────────────────────────────────

    #[test]
    fn typing_shifts_other_viewports_and_markers() {
        let (mut s, notes) = session_with("hello world");
        let w1 = s.focused();
        let w2 = s.split(Orientation::Vertical);
        s.goto(w2, 6).unwrap();
        s.goto(w1, 0).unwrap();
        s.type_text(">> ").unwrap();
        assert_eq!(s.cursor(w1), Ok(3));
        assert_eq!(s.cursor(w2), Ok(9));
        assert_eq!(s.document(notes).unwrap().contents(), ">> hello world");

        let todo = s.open("todo", "").unwrap();
        s.show(w2, todo).unwrap();
        s.insert(notes, 0, "##").unwrap();
        s.show(w2, notes).unwrap();
        assert_eq!(s.cursor(w2), Ok(11));
        s.show(w1, notes).unwrap();
        assert_eq!(s.cursor(w1), Ok(5));
    }

    #[test]
    fn out_of_range_edit_is_an_error() {
        let (mut s, notes) = session_with("abc");
        assert_eq!(
            s.insert(notes, 9, "x"),
            Err(SessionError::OutOfRange {
                name: "notes".into(),
                offset: 9,
                len: 3
            })
        );
        assert!(s.delete(notes, 1, 2).is_ok());
        assert_eq!(s.document(notes).unwrap().contents(), "ac");
    }

    // ── Kill ─────────────────────────────────────────────────────────────

    #[test]
    fn kill_switches_viewports_and_collects_markers() {
        let (mut s, notes) = session_with("abc");
        let w = s.focused();
        s.kill(notes).unwrap();
        assert_eq!(s.view(w).map(|v| v.document), Some(DocumentId(1)));
        let store = s.current_frame().tracker().unwrap().store();
        assert!(!store.mentions_document(notes));
    }

    #[test]
    fn killing_last_document_creates_scratch() {
        let mut s = Session::default();
        let scratch = s.find(SCRATCH).unwrap();
        s.kill(scratch).unwrap();
        let fresh = s.find(SCRATCH).unwrap();
        assert_ne!(fresh, scratch);
        assert_eq!(s.view(s.focused()).map(|v| v.document), Some(fresh));
    }

    // ── Enable / disable ─────────────────────────────────────────────────

    #[test]
    fn disabled_session_does_not_restore() {
        let (mut s, notes) = session_with("0123456789");
        let w = s.focused();
        s.goto(w, 5).unwrap();
        assert!(s.disable());
        let todo = s.open("todo", "").unwrap();
        s.goto(w, 0).unwrap();
        s.show(w, notes).unwrap();
        // Host default: notes was left at 5 globally, so it lands there anyway.
        assert_eq!(s.cursor(w), Ok(5));

        let w2 = s.split(Orientation::Vertical);
        s.show(w, todo).unwrap();
        s.goto(w2, 9).unwrap();
        s.show(w2, todo).unwrap();
        s.show(w, notes).unwrap();
        assert_eq!(s.cursor(w), Ok(9));
        assert!(s.current_frame().tracker().is_none());
    }

    #[test]
    fn set_options_is_all_or_nothing() {
        let mut s = Session::default();
        assert!(s.set_options("nopw bogus").is_err());
        assert!(s.options().prune_windows);
        assert_eq!(s.set_options("nopw pw?").unwrap(), vec!["noprunewindows"]);
        assert!(!s.current_frame().tracker().unwrap().options().prune_windows);
    }

    // ── Reports ──────────────────────────────────────────────────────────

    #[test]
    fn describe_lists_viewports() {
        let (mut s, _) = session_with("one\ntwo\n");
        s.goto(s.focused(), 5).unwrap();
        s.split(Orientation::Horizontal);
        assert_eq!(
            s.describe(),
            "frame 0\n  vp1* notes 2:2 @5\n  vp2  notes 2:2 @5\n"
        );
        assert_eq!(s.describe_marks(), "frame 0\n  vp1: *scratch*@0 notes@5\n  vp2: notes@5\n");
    }
}
