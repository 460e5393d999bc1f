//! # viewmark-core: per-viewport cursor memory
//!
//! When one document is shown in several viewports, switching a viewport
//! away and back should land on the position *that viewport* had, not the
//! one some other viewport left behind. This crate is the host-agnostic
//! core of that behavior:
//!
//! - **[`marker`]**: `Marker` offsets and the `Edit`s that shift them
//! - **[`store`]**: `Store`, viewport → document → marker
//! - **[`recorder`]**: snapshot every live viewport after a command
//! - **[`watcher`]**: diff viewport assignments on configuration change
//! - **[`restore`]**: apply a remembered position unless excluded
//! - **[`gc`]**: prune markers of dead documents and closed viewports
//! - **[`host`]**: the `Host` trait an editor implements
//! - **[`tracker`]**: `Tracker` context and `PointMemory` on/off switch
//! - **[`options`]**: `:set`-style options
//!
//! Everything is single-threaded and synchronous; hooks borrow the tracker
//! and the host mutably for the duration of one event.

pub mod error;
pub mod gc;
pub mod host;
pub mod id;
pub mod marker;
pub mod options;
pub mod recorder;
pub mod restore;
pub mod store;
pub mod tracker;
pub mod watcher;

pub use error::{HostError, OptionError};
pub use host::Host;
pub use id::{DocumentId, ViewportId};
pub use marker::{Edit, Marker};
pub use options::Options;
pub use store::Store;
pub use tracker::{PointMemory, Tracker};
