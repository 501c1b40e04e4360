//! Virtual-path canonicalisation for the warden confinement layer.
//!
//! Paths supplied by a confined program are plain `/`-separated text in the
//! program's own namespace. This crate turns such a path (possibly relative,
//! possibly laden with `.`, `..`, repeated separators, or symbolic links)
//! into a normalised absolute path, consulting the filesystem only through
//! the two-operation [`FsView`] capability.
//!
//! - [`ops`] holds the component-level string operations and their exact
//!   contracts; the canonicaliser is built entirely from them.
//! - [`normalise`] rewrites a path without following links. [`canonicalise`]
//!   and [`canonicalise_with`] additionally resolve every link they walk
//!   across, with a bounded expansion count so link cycles terminate in
//!   [`FsError::TooManyLinks`] rather than looping.
//!
//! The crate performs no I/O of its own: callers choose what a [`FsView`]
//! presents. `warden-mounts` implements it over a mount-confined virtual
//! tree and over the real host filesystem; tests script it directly.

mod error;
pub mod ops;
mod resolve;
mod view;

pub use error::FsError;
pub use resolve::{LinkPolicy, MAX_LINK_EXPANSIONS, canonicalise, canonicalise_with, normalise};
pub use view::FsView;

#[cfg(test)]
mod tests;
