//! Configuration watcher: react to the viewport set changing.
//!
//! Runs on the host's "viewport set changed" tick (a viewport created,
//! destroyed, or switched to another document). Each run:
//!
//! 1. collects garbage, so a marker for a document that just died is never
//!    applied;
//! 2. walks the live viewports and restores any whose document differs from
//!    the previous run's [`Assignment`]: a viewport missing from the
//!    assignment is new and keeps the position the host gave it;
//! 3. rebuilds the assignment from scratch out of the live set.
//!
//! Most configuration events are unrelated to documents (a split resized);
//! those find every viewport unchanged and touch nothing.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::gc::{self, GcStats};
use crate::host::Host;
use crate::id::{DocumentId, ViewportId};
use crate::restore::{self, RestoreOutcome};
use crate::store::Store;

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Which document each viewport showed at the last configuration event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    shown: FxHashMap<ViewportId, DocumentId>,
}

impl Assignment {
    /// An empty assignment: every viewport counts as new.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The document `viewport` showed last time, if it was seen.
    #[must_use]
    pub fn get(&self, viewport: ViewportId) -> Option<DocumentId> {
        self.shown.get(&viewport).copied()
    }

    /// Number of viewports remembered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shown.len()
    }

    /// Whether no viewport is remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Watch
// ---------------------------------------------------------------------------

/// What one watcher run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchReport {
    /// Garbage collected before restoring.
    pub gc: GcStats,
    /// Viewports whose document changed, with the restore outcome.
    pub changed: Vec<(ViewportId, RestoreOutcome)>,
    /// Viewports seen for the first time.
    pub new_viewports: usize,
}

impl WatchReport {
    /// Viewports whose cursor was actually moved.
    #[must_use]
    pub fn restored(&self) -> Vec<ViewportId> {
        self.changed
            .iter()
            .filter(|(_, outcome)| outcome.is_restored())
            .map(|&(viewport, _)| viewport)
            .collect()
    }
}

/// Handle a configuration change: GC, restore changed viewports, rebuild
/// `previous`.
pub fn watch(
    store: &mut Store,
    previous: &mut Assignment,
    host: &mut impl Host,
    prune_viewports: bool,
) -> WatchReport {
    let mut report = WatchReport::default();

    let (pruned, gc_stats) = gc::collect(store, host, prune_viewports);
    *store = pruned;
    report.gc = gc_stats;

    let mut next = Assignment::new();
    for viewport in host.live_viewports() {
        let document = match host.document_of(viewport) {
            Ok(document) => document,
            Err(err) => {
                debug!(%viewport, %err, "watch: host lookup failed, skipping");
                continue;
            }
        };

        match previous.get(viewport) {
            Some(old) if old != document => {
                debug!(%viewport, from = %old, to = %document, "watch: document switched");
                let outcome = restore::restore(store, host, viewport, document);
                report.changed.push((viewport, outcome));
            }
            Some(_) => {}
            None => report.new_viewports += 1,
        }

        next.shown.insert(viewport, document);
    }

    *previous = next;
    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
