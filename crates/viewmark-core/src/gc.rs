//! Garbage collection: keep the store bounded.
//!
//! Markers for dead documents are removed, and viewport entries left empty go
//! with them. A viewport that no longer exists is never read again, so its
//! markers are harmless but still memory; with `prunewindows` on, the same
//! pass drops every viewport absent from the live set.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::host::Host;
use crate::id::{DocumentId, ViewportId};
use crate::store::Store;

/// What one collection removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GcStats {
    pub markers_dropped: usize,
    pub viewports_dropped: usize,
}

impl GcStats {
    /// True when the pass removed nothing.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.markers_dropped == 0 && self.viewports_dropped == 0
    }
}

/// Prune `store` against a document-liveness predicate and, when given, a
/// set of live viewports.
#[must_use]
pub fn sweep(
    store: &Store,
    is_live: impl FnMut(DocumentId) -> bool,
    live_viewports: Option<&FxHashSet<ViewportId>>,
) -> (Store, GcStats) {
    let mut pruned = store.prune(is_live);
    if let Some(live) = live_viewports {
        pruned = pruned.retain_viewports(|viewport| live.contains(&viewport));
    }

    let stats = GcStats {
        markers_dropped: store.marker_count() - pruned.marker_count(),
        viewports_dropped: store.viewport_count() - pruned.viewport_count(),
    };
    (pruned, stats)
}

/// Prune `store` using the host's liveness answers.
#[must_use]
pub fn collect(store: &Store, host: &impl Host, prune_viewports: bool) -> (Store, GcStats) {
    let live: Option<FxHashSet<ViewportId>> =
        prune_viewports.then(|| host.live_viewports().into_iter().collect());
    let (pruned, stats) = sweep(store, |doc| host.is_live(doc), live.as_ref());
    if !stats.is_empty() {
        trace!(
            markers = stats.markers_dropped,
            viewports = stats.viewports_dropped,
            "gc: pruned store"
        );
    }
    (pruned, stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    const W1: ViewportId = ViewportId(1);
    const W2: ViewportId = ViewportId(2);
    const D1: DocumentId = DocumentId(1);
    const D2: DocumentId = DocumentId(2);

    fn populated() -> Store {
        let mut s = Store::new();
        s.put(W1, D1, 1);
        s.put(W1, D2, 2);
        s.put(W2, D1, 3);
        s
    }

    #[test]
    fn dead_document_is_reclaimed_everywhere() {
        let (s, stats) = sweep(&populated(), |d| d != D1, None);
        assert!(!s.mentions_document(D1));
        assert_eq!(s.viewports(), vec![W1]);
        assert_eq!(stats, GcStats { markers_dropped: 2, viewports_dropped: 1 });
    }

    #[test]
    fn second_pass_is_a_noop() {
        let (once, _) = sweep(&populated(), |d| d != D2, None);
        let (twice, stats) = sweep(&once, |d| d != D2, None);
        assert_eq!(once, twice);
        assert!(stats.is_empty());
    }

    #[test]
    fn dead_viewports_dropped_when_asked() {
        let live: FxHashSet<ViewportId> = [W2].into_iter().collect();
        let (s, stats) = sweep(&populated(), |_| true, Some(&live));
        assert_eq!(s.viewports(), vec![W2]);
        assert_eq!(stats.markers_dropped, 2);
    }

    #[test]
    fn collect_asks_the_host() {
        let mut host = FakeHost::default();
        host.show(W1, D2, 0);
        host.dead.insert(D1);

        let (kept_vps, _) = collect(&populated(), &host, false);
        assert_eq!(kept_vps.viewports(), vec![W1]);
        assert_eq!(kept_vps.get(W1, D2), Some(2));

        host.close(W1);
        let (none, _) = collect(&populated(), &host, true);
        assert!(none.is_empty());
    }
}
