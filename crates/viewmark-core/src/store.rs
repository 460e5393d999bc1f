//! The position store: one marker per (viewport, document) pair.
//!
//! ```text
//! Store
//! ├── vp1
//! │   ├── doc1 → Marker(doc1 @ 120)
//! │   └── doc4 → Marker(doc4 @ 0)
//! └── vp2
//!     └── doc1 → Marker(doc1 @ 7)      ← same document, independent offset
//! ```
//!
//! Viewport identity is the outer key: restoration always asks "for this
//! viewport, where was it in the document it is about to show", and one
//! document shown in two viewports must keep two offsets.
//!
//! The store never talks to the host. Liveness comes in as a predicate to
//! [`Store::prune`], which builds a fresh store rather than editing in place.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::id::{DocumentId, ViewportId};
use crate::marker::{Edit, Marker};

/// Per-viewport, per-document position memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    entries: FxHashMap<ViewportId, FxHashMap<DocumentId, Marker>>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Queries ---------------------------------------------------------------

    /// The remembered offset for `(viewport, document)`, if any.
    #[must_use]
    pub fn get(&self, viewport: ViewportId, document: DocumentId) -> Option<usize> {
        self.marker(viewport, document).map(Marker::offset)
    }

    /// The marker for `(viewport, document)`, if any.
    #[must_use]
    pub fn marker(&self, viewport: ViewportId, document: DocumentId) -> Option<&Marker> {
        self.entries.get(&viewport)?.get(&document)
    }

    /// True when any marker is stored under `viewport`.
    #[must_use]
    pub fn contains_viewport(&self, viewport: ViewportId) -> bool {
        self.entries.contains_key(&viewport)
    }

    /// True when any viewport has a marker for `document`.
    #[must_use]
    pub fn mentions_document(&self, document: DocumentId) -> bool {
        self.entries.values().any(|docs| docs.contains_key(&document))
    }

    /// Documents remembered for `viewport`, in ascending ID order.
    #[must_use]
    pub fn documents(&self, viewport: ViewportId) -> Vec<DocumentId> {
        let mut docs: Vec<DocumentId> = self
            .entries
            .get(&viewport)
            .map(|docs| docs.keys().copied().collect())
            .unwrap_or_default();
        docs.sort_unstable();
        docs
    }

    /// Viewports with at least one entry, in ascending ID order.
    #[must_use]
    pub fn viewports(&self) -> Vec<ViewportId> {
        let mut vps: Vec<ViewportId> = self.entries.keys().copied().collect();
        vps.sort_unstable();
        vps
    }

    /// Number of viewport-level entries.
    #[must_use]
    pub fn viewport_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of markers across all viewports.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.entries.values().map(FxHashMap::len).sum()
    }

    /// Whether the store holds no markers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -- Mutations -------------------------------------------------------------

    /// Record `offset` for `(viewport, document)`.
    ///
    /// An existing marker is repositioned in place. Returns `true` when a new
    /// marker had to be allocated.
    pub fn put(&mut self, viewport: ViewportId, document: DocumentId, offset: usize) -> bool {
        let docs = self.entries.entry(viewport).or_default();
        if let Some(marker) = docs.get_mut(&document) {
            marker.reposition(offset);
            return false;
        }
        trace!(%viewport, %document, offset, "store: new marker");
        docs.insert(document, Marker::new(document, offset));
        true
    }

    /// Shift every marker attached to `document` for an edit.
    ///
    /// Returns the number of markers visited.
    pub fn apply_edit(&mut self, document: DocumentId, edit: Edit) -> usize {
        if edit.is_noop() {
            return 0;
        }
        let mut moved = 0;
        for marker in self
            .entries
            .values_mut()
            .filter_map(|docs| docs.get_mut(&document))
        {
            marker.apply(edit);
            moved += 1;
        }
        moved
    }

    // -- Pruning ---------------------------------------------------------------

    /// A copy of the store without entries whose document fails `is_live`.
    ///
    /// Viewport-level entries left empty are dropped as well. Pruning twice
    /// with the same predicate yields the same store.
    #[must_use]
    pub fn prune(&self, mut is_live: impl FnMut(DocumentId) -> bool) -> Self {
        let entries = self
            .entries
            .iter()
            .filter_map(|(&viewport, docs)| {
                let kept: FxHashMap<DocumentId, Marker> = docs
                    .iter()
                    .filter(|&(&document, _)| is_live(document))
                    .map(|(&document, &marker)| (document, marker))
                    .collect();
                (!kept.is_empty()).then_some((viewport, kept))
            })
            .collect();
        Self { entries }
    }

    /// A copy of the store keeping only viewports for which `keep` holds.
    #[must_use]
    pub fn retain_viewports(&self, mut keep: impl FnMut(ViewportId) -> bool) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|&(&viewport, docs)| !docs.is_empty() && keep(viewport))
            .map(|(&viewport, docs)| (viewport, docs.clone()))
            .collect();
        Self { entries }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W1: ViewportId = ViewportId(1);
    const W2: ViewportId = ViewportId(2);
    const D1: DocumentId = DocumentId(10);
    const D2: DocumentId = DocumentId(20);

    // ── get / put ────────────────────────────────────────────────────────

    #[test]
    fn empty_store_has_nothing() {
        let s = Store::new();
        assert!(s.is_empty());
        assert_eq!(s.get(W1, D1), None);
    }

    #[test]
    fn put_then_get() {
        let mut s = Store::new();
        assert!(s.put(W1, D1, 42));
        assert_eq!(s.get(W1, D1), Some(42));
        assert_eq!(s.get(W1, D2), None);
        assert_eq!(s.get(W2, D1), None);
    }

    #[test]
    fn put_existing_repositions_in_place() {
        let mut s = Store::new();
        assert!(s.put(W1, D1, 1));
        assert!(!s.put(W1, D1, 9));
        assert_eq!(s.get(W1, D1), Some(9));
        assert_eq!(s.marker_count(), 1);
        assert_eq!(s.marker(W1, D1).map(Marker::document), Some(D1));
    }

    #[test]
    fn same_document_two_viewports_are_isolated() {
        let mut s = Store::new();
        s.put(W1, D1, 5);
        s.put(W2, D1, 50);
        assert_eq!(s.get(W1, D1), Some(5));
        assert_eq!(s.get(W2, D1), Some(50));
    }

    #[test]
    fn listings_are_sorted() {
        let mut s = Store::new();
        s.put(W2, D2, 0);
        s.put(W2, D1, 0);
        s.put(W1, D1, 0);
        assert_eq!(s.viewports(), vec![W1, W2]);
        assert_eq!(s.documents(W2), vec![D1, D2]);
        assert!(s.documents(ViewportId(99)).is_empty());
    }

    // ── apply_edit ───────────────────────────────────────────────────────

    #[test]
    fn edit_shifts_every_viewport_for_that_document() {
        let mut s = Store::new();
        s.put(W1, D1, 10);
        s.put(W2, D1, 2);
        s.put(W2, D2, 10);
        assert_eq!(s.apply_edit(D1, Edit::insert(5, 3)), 2);
        assert_eq!(s.get(W1, D1), Some(13));
        assert_eq!(s.get(W2, D1), Some(2));
        assert_eq!(s.get(W2, D2), Some(10));
    }

    #[test]
    fn noop_edit_visits_nothing() {
        let mut s = Store::new();
        s.put(W1, D1, 10);
        assert_eq!(s.apply_edit(D1, Edit::delete(3, 3)), 0);
        assert_eq!(s.get(W1, D1), Some(10));
    }

    // ── prune ────────────────────────────────────────────────────────────

    #[test]
    fn prune_drops_dead_documents_and_empty_viewports() {
        let mut s = Store::new();
        s.put(W1, D1, 1);
        s.put(W1, D2, 2);
        s.put(W2, D1, 3);

        let pruned = s.prune(|d| d != D1);
        assert_eq!(pruned.get(W1, D2), Some(2));
        assert_eq!(pruned.get(W1, D1), None);
        assert!(!pruned.contains_viewport(W2));
        assert!(!pruned.mentions_document(D1));
    }

    #[test]
    fn prune_all_live_is_identity() {
        let mut s = Store::new();
        s.put(W1, D1, 1);
        s.put(W2, D2, 2);
        assert_eq!(s.prune(|_| true), s);
    }

    #[test]
    fn retain_viewports_filters_outer_keys() {
        let mut s = Store::new();
        s.put(W1, D1, 1);
        s.put(W2, D1, 2);
        let kept = s.retain_viewports(|w| w == W2);
        assert_eq!(kept.viewports(), vec![W2]);
        assert_eq!(kept.get(W2, D1), Some(2));
    }

    // ── Properties ───────────────────────────────────────────────────────

    fn arb_puts() -> impl Strategy<Value = Vec<(u64, u64, usize)>> {
        prop::collection::vec((0u64..6, 0u64..6, 0usize..1000), 0..64)
    }

    proptest! {
        /// The last write for a pair wins, and no other pair sees it.
        #[test]
        fn prop_last_write_wins(puts in arb_puts()) {
            let mut s = Store::new();
            let mut expected: FxHashMap<(u64, u64), usize> = FxHashMap::default();
            for &(w, d, off) in &puts {
                s.put(ViewportId(w), DocumentId(d), off);
                expected.insert((w, d), off);
            }
            for w in 0..6 {
                for d in 0..6 {
                    prop_assert_eq!(
                        s.get(ViewportId(w), DocumentId(d)),
                        expected.get(&(w, d)).copied()
                    );
                }
            }
            prop_assert_eq!(s.marker_count(), expected.len());
        }

        /// Pruning is idempotent and never leaves empty viewport entries.
        #[test]
        fn prop_prune_idempotent(puts in arb_puts(), dead in prop::collection::vec(0u64..6, 0..4)) {
            let mut s = Store::new();
            for &(w, d, off) in &puts {
                s.put(ViewportId(w), DocumentId(d), off);
            }
            let live = |doc: DocumentId| !dead.contains(&doc.0);
            let once = s.prune(live);
            let twice = once.prune(live);
            prop_assert_eq!(&once, &twice);
            for vp in once.viewports() {
                prop_assert!(!once.documents(vp).is_empty());
            }
            for &d in &dead {
                prop_assert!(!once.mentions_document(DocumentId(d)));
            }
        }
    }
}
