//! Split tree: how a frame's viewports are arranged.
//!
//! The split tree is a binary tree where each leaf is a viewport and each
//! internal node is a horizontal or vertical split:
//!
//! ```text
//! Vertical
//! ├── Leaf(vp1)        ← left pane
//! └── Horizontal
//!     ├── Leaf(vp2)    ← top-right pane
//!     └── Leaf(vp3)    ← bottom-right pane
//! ```
//!
//! The tree stores only IDs; per-viewport state (document, cursor) lives in
//! the frame. Leaf order (depth-first, left-to-right) is the order in which
//! the frame reports its live viewports.

use viewmark_core::ViewportId;

/// Which way a split divides its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Top / bottom.
    Horizontal,
    /// Left / right.
    Vertical,
}

/// A node in the split tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split {
    /// A single viewport occupying the entire area.
    Leaf(ViewportId),

    /// Horizontal split: first is on top, second is on the bottom.
    Horizontal { first: Box<Self>, second: Box<Self> },

    /// Vertical split: first is on the left, second is on the right.
    Vertical { first: Box<Self>, second: Box<Self> },
}

impl Split {
    /// Create a leaf node.
    #[must_use]
    pub const fn leaf(id: ViewportId) -> Self {
        Self::Leaf(id)
    }

    /// Create a split node of the given orientation.
    #[must_use]
    pub fn node(orientation: Orientation, first: Self, second: Self) -> Self {
        let (first, second) = (Box::new(first), Box::new(second));
        match orientation {
            Orientation::Horizontal => Self::Horizontal { first, second },
            Orientation::Vertical => Self::Vertical { first, second },
        }
    }

    // -- Queries ---------------------------------------------------------------

    /// All viewport IDs in the tree (depth-first, left-to-right).
    #[must_use]
    pub fn leaves(&self) -> Vec<ViewportId> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<ViewportId>) {
        match self {
            Self::Leaf(id) => out.push(*id),
            Self::Horizontal { first, second } | Self::Vertical { first, second } => {
                first.collect_leaves(out);
                second.collect_leaves(out);
            }
        }
    }

    /// Number of viewports (leaf nodes) in the tree.
    #[must_use]
    pub fn viewport_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Horizontal { first, second } | Self::Vertical { first, second } => {
                first.viewport_count() + second.viewport_count()
            }
        }
    }

    /// Whether a viewport is in the tree.
    #[must_use]
    pub fn contains(&self, id: ViewportId) -> bool {
        match self {
            Self::Leaf(w) => *w == id,
            Self::Horizontal { first, second } | Self::Vertical { first, second } => {
                first.contains(id) || second.contains(id)
            }
        }
    }

    // -- Mutations -------------------------------------------------------------

    /// Split `target`: it keeps the first half and `new_id` takes the second.
    ///
    /// Returns `true` if the target was found and split.
    pub fn split(&mut self, target: ViewportId, new_id: ViewportId, orientation: Orientation) -> bool {
        match self {
            Self::Leaf(id) if *id == target => {
                *self = Self::node(orientation, Self::Leaf(target), Self::Leaf(new_id));
                true
            }
            Self::Leaf(_) => false,
            Self::Horizontal { first, second } | Self::Vertical { first, second } => {
                first.split(target, new_id, orientation)
                    || second.split(target, new_id, orientation)
            }
        }
    }

    /// Remove a viewport; its sibling takes the parent's place.
    ///
    /// Cannot remove the last remaining viewport: returns `false` when the
    /// tree is a single leaf or the target is not found.
    pub fn remove(&mut self, target: ViewportId) -> bool {
        if matches!(self, Self::Leaf(_)) {
            return false;
        }
        self.remove_inner(target)
    }

    fn remove_inner(&mut self, target: ViewportId) -> bool {
        match self {
            Self::Leaf(_) => false,
            Self::Horizontal { first, second } | Self::Vertical { first, second } => {
                if matches!(first.as_ref(), Self::Leaf(id) if *id == target) {
                    *self = *second.clone();
                    return true;
                }
                if matches!(second.as_ref(), Self::Leaf(id) if *id == target) {
                    *self = *first.clone();
                    return true;
                }
                first.remove_inner(target) || second.remove_inner(target)
            }
        }
    }

    /// Collapse the tree to a single leaf. Returns the removed IDs.
    pub fn keep_only(&mut self, keep: ViewportId) -> Vec<ViewportId> {
        let removed: Vec<ViewportId> = self.leaves().into_iter().filter(|&id| id != keep).collect();
        *self = Self::Leaf(keep);
        removed
    }

    // -- Navigation ------------------------------------------------------------

    /// The viewport after `current` in leaf order, wrapping around.
    #[must_use]
    pub fn cycle_next(&self, current: ViewportId) -> ViewportId {
        let leaves = self.leaves();
        if leaves.len() <= 1 {
            return current;
        }
        let pos = leaves.iter().position(|&id| id == current).unwrap_or(0);
        leaves[(pos + 1) % leaves.len()]
    }

    /// The viewport before `current` in leaf order, wrapping around.
    #[must_use]
    pub fn cycle_prev(&self, current: ViewportId) -> ViewportId {
        let leaves = self.leaves();
        if leaves.len() <= 1 {
            return current;
        }
        let pos = leaves.iter().position(|&id| id == current).unwrap_or(0);
        leaves[(pos + leaves.len() - 1) % leaves.len()]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
