//! Recorder: snapshot every live viewport after each command.
//!
//! Runs on the host's "command completed" tick. Every visible viewport is
//! recorded, not only the focused one: an unfocused viewport can still move
//! (programmatic scrolling, another viewport editing above its cursor), and
//! its position has to be captured before a configuration change drops it.

use tracing::debug;

use crate::host::Host;
use crate::store::Store;

/// Counts from one recorder pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecordStats {
    /// Viewports whose position was written to the store.
    pub recorded: usize,
    /// Viewports the host could not describe, or showing a dead document.
    pub skipped: usize,
}

/// Write the current position of every live viewport into `store`.
pub fn record(store: &mut Store, host: &impl Host) -> RecordStats {
    let mut stats = RecordStats::default();

    for viewport in host.live_viewports() {
        let snapshot = host
            .document_of(viewport)
            .and_then(|doc| host.cursor_offset(viewport).map(|off| (doc, off)));

        match snapshot {
            Ok((document, _)) if !host.is_live(document) => {
                debug!(%viewport, %document, "record: document is dead, skipping");
                stats.skipped += 1;
            }
            Ok((document, offset)) => {
                store.put(viewport, document, offset);
                stats.recorded += 1;
            }
            Err(err) => {
                debug!(%viewport, %err, "record: host lookup failed, skipping");
                stats.skipped += 1;
            }
        }
    }

    stats
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;
    use crate::id::{DocumentId, ViewportId};

    const W1: ViewportId = ViewportId(1);
    const W2: ViewportId = ViewportId(2);
    const D1: DocumentId = DocumentId(1);

    #[test]
    fn records_every_visible_viewport() {
        let mut host = FakeHost::default();
        host.show(W1, D1, 5);
        host.show(W2, D1, 9);

        let mut store = Store::new();
        let stats = record(&mut store, &host);

        assert_eq!(stats, RecordStats { recorded: 2, skipped: 0 });
        assert_eq!(store.get(W1, D1), Some(5));
        assert_eq!(store.get(W2, D1), Some(9));
    }

    #[test]
    fn rerecording_updates_in_place() {
        let mut host = FakeHost::default();
        host.show(W1, D1, 5);
        let mut store = Store::new();
        record(&mut store, &host);

        host.show(W1, D1, 30);
        record(&mut store, &host);
        assert_eq!(store.get(W1, D1), Some(30));
        assert_eq!(store.marker_count(), 1);
    }

    #[test]
    fn host_failures_are_skipped() {
        let mut host = FakeHost::default();
        host.show(W1, D1, 5);
        host.show(W2, D1, 6);
        host.broken.insert(W2);

        let mut store = Store::new();
        let stats = record(&mut store, &host);
        assert_eq!(stats, RecordStats { recorded: 1, skipped: 1 });
        assert_eq!(store.get(W2, D1), None);
    }

    #[test]
    fn dead_documents_are_not_recorded() {
        let mut host = FakeHost::default();
        host.show(W1, D1, 5);
        host.dead.insert(D1);

        let mut store = Store::new();
        let stats = record(&mut store, &host);
        assert_eq!(stats.skipped, 1);
        assert!(store.is_empty());
    }
}
