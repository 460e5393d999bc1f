//! Tracker: the per-frame context object, and its on/off switch.
//!
//! A [`Tracker`] owns the [`Store`] and the previous [`Assignment`] for one
//! display context. Hosts drive it from two hooks:
//!
//! | Host event                | Call                                   |
//! |---------------------------|----------------------------------------|
//! | command completed         | [`Tracker::on_command`]                |
//! | viewport set changed      | [`Tracker::on_configuration_change`]   |
//! | document text edited      | [`Tracker::on_edit`]                   |
//!
//! [`PointMemory`] wraps an optional tracker: enabling builds a fresh one
//! (empty store, empty assignment), disabling drops it. While disabled every
//! hook is a no-op, which is how a host "unsubscribes" without touching its
//! own event plumbing.

use tracing::{info, trace};

use crate::host::Host;
use crate::id::DocumentId;
use crate::marker::Edit;
use crate::options::Options;
use crate::recorder::{self, RecordStats};
use crate::store::Store;
use crate::watcher::{self, Assignment, WatchReport};

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Position memory for one display context.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    store: Store,
    previous: Assignment,
    options: Options,
}

impl Tracker {
    /// A tracker with nothing remembered.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            store: Store::new(),
            previous: Assignment::new(),
            options,
        }
    }

    /// The position store.
    #[inline]
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// The viewport → document snapshot from the last configuration event.
    #[inline]
    #[must_use]
    pub const fn previous(&self) -> &Assignment {
        &self.previous
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> Options {
        self.options
    }

    pub const fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// "Command completed" hook: snapshot every live viewport.
    pub fn on_command(&mut self, host: &impl Host) -> RecordStats {
        let stats = recorder::record(&mut self.store, host);
        trace!(recorded = stats.recorded, skipped = stats.skipped, "tracker: command");
        stats
    }

    /// "Viewport set changed" hook: GC, restore switched viewports, rebuild
    /// the assignment.
    pub fn on_configuration_change(&mut self, host: &mut impl Host) -> WatchReport {
        watcher::watch(
            &mut self.store,
            &mut self.previous,
            host,
            self.options.prune_windows,
        )
    }

    /// Shift stored markers for an edit to `document`.
    ///
    /// Returns the number of markers visited; zero when `trackedits` is off.
    pub fn on_edit(&mut self, document: DocumentId, edit: Edit) -> usize {
        if !self.options.track_edits {
            return 0;
        }
        self.store.apply_edit(document, edit)
    }
}

// ---------------------------------------------------------------------------
// PointMemory
// ---------------------------------------------------------------------------

/// Enable/disable wrapper around a [`Tracker`].
///
/// Options outlive the tracker, so a disable/enable cycle keeps `:set`
/// choices but forgets every remembered position.
#[derive(Debug, Clone, Default)]
pub struct PointMemory {
    options: Options,
    tracker: Option<Tracker>,
}

impl PointMemory {
    /// A disabled instance.
    #[must_use]
    pub const fn new(options: Options) -> Self {
        Self {
            options,
            tracker: None,
        }
    }

    /// An instance that starts enabled.
    #[must_use]
    pub fn enabled(options: Options) -> Self {
        Self {
            options,
            tracker: Some(Tracker::new(options)),
        }
    }

    /// Turn tracking on. Returns `false` if it already was.
    pub fn enable(&mut self) -> bool {
        if self.tracker.is_some() {
            return false;
        }
        info!("point memory enabled");
        self.tracker = Some(Tracker::new(self.options));
        true
    }

    /// Turn tracking off, discarding the store and assignment. Returns
    /// `false` if it already was off.
    pub fn disable(&mut self) -> bool {
        if self.tracker.take().is_none() {
            return false;
        }
        info!("point memory disabled");
        true
    }

    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.tracker.is_some()
    }

    /// The live tracker, when enabled.
    #[inline]
    #[must_use]
    pub const fn tracker(&self) -> Option<&Tracker> {
        self.tracker.as_ref()
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> Options {
        self.options
    }

    /// Replace the options, including on the running tracker.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
        if let Some(tracker) = &mut self.tracker {
            tracker.set_options(options);
        }
    }

    /// Forward a "command completed" event. `None` while disabled.
    pub fn on_command(&mut self, host: &impl Host) -> Option<RecordStats> {
        self.tracker.as_mut().map(|t| t.on_command(host))
    }

    /// Forward a "viewport set changed" event. `None` while disabled.
    pub fn on_configuration_change(&mut self, host: &mut impl Host) -> Option<WatchReport> {
        self.tracker
            .as_mut()
            .map(|t| t.on_configuration_change(host))
    }

    /// Forward an edit. Zero while disabled.
    pub fn on_edit(&mut self, document: DocumentId, edit: Edit) -> usize {
        self.tracker
            .as_mut()
            .map_or(0, |t| t.on_edit(document, edit))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
