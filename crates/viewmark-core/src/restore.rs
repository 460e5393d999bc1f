//! Restore policy: put a viewport back where it was in a document.
//!
//! Nothing here can fail outward. A missing entry, a dead document or a host
//! error all end in "leave the host's default position alone"; offsets past
//! the end of the document are the host's to clamp.

use tracing::debug;

use crate::host::Host;
use crate::id::{DocumentId, ViewportId};
use crate::store::Store;

/// What [`restore`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The cursor was moved to the remembered offset.
    Restored(usize),

    /// Nothing remembered for this pair, or the document is dead.
    Missing,

    /// The document regenerates its content; the remembered offset was
    /// ignored.
    Excluded,

    /// The host rejected the cursor move.
    Failed,
}

impl RestoreOutcome {
    /// True when the viewport's cursor was moved.
    #[inline]
    #[must_use]
    pub const fn is_restored(self) -> bool {
        matches!(self, Self::Restored(_))
    }
}

/// Apply the remembered position for `(viewport, document)`, if any.
pub fn restore(
    store: &Store,
    host: &mut impl Host,
    viewport: ViewportId,
    document: DocumentId,
) -> RestoreOutcome {
    let Some(offset) = store.get(viewport, document) else {
        return RestoreOutcome::Missing;
    };

    if host.is_excluded(document) {
        debug!(%viewport, %document, "restore: excluded document kind");
        return RestoreOutcome::Excluded;
    }

    if !host.is_live(document) {
        return RestoreOutcome::Missing;
    }

    match host.set_cursor_offset(viewport, offset) {
        Ok(()) => {
            debug!(%viewport, %document, offset, "restore: cursor moved");
            RestoreOutcome::Restored(offset)
        }
        Err(err) => {
            debug!(%viewport, %document, %err, "restore: host refused");
            RestoreOutcome::Failed
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;

    const W1: ViewportId = ViewportId(1);
    const D1: DocumentId = DocumentId(1);

    fn setup(remembered: Option<usize>) -> (Store, FakeHost) {
        let mut store = Store::new();
        if let Some(off) = remembered {
            store.put(W1, D1, off);
        }
        let mut host = FakeHost::default();
        host.show(W1, D1, 0);
        (store, host)
    }

    #[test]
    fn restores_remembered_offset() {
        let (store, mut host) = setup(Some(17));
        assert_eq!(restore(&store, &mut host, W1, D1), RestoreOutcome::Restored(17));
        assert_eq!(host.offset(W1), 17);
    }

    #[test]
    fn missing_entry_leaves_cursor() {
        let (store, mut host) = setup(None);
        assert_eq!(restore(&store, &mut host, W1, D1), RestoreOutcome::Missing);
        assert_eq!(host.set_calls, 0);
    }

    #[test]
    fn excluded_kind_never_moves_cursor() {
        let (store, mut host) = setup(Some(17));
        host.excluded.insert(D1);
        assert_eq!(restore(&store, &mut host, W1, D1), RestoreOutcome::Excluded);
        assert_eq!(host.set_calls, 0);
        assert_eq!(host.offset(W1), 0);
    }

    #[test]
    fn dead_document_counts_as_missing() {
        let (store, mut host) = setup(Some(17));
        host.dead.insert(D1);
        assert_eq!(restore(&store, &mut host, W1, D1), RestoreOutcome::Missing);
        assert_eq!(host.set_calls, 0);
    }

    #[test]
    fn host_refusal_is_swallowed() {
        let (store, mut host) = setup(Some(17));
        host.close(W1);
        let outcome = restore(&store, &mut host, W1, D1);
        assert_eq!(outcome, RestoreOutcome::Failed);
        assert!(!outcome.is_restored());
    }
}
