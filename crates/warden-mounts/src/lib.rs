//! Mount-based confinement of guest filesystem paths.
//!
#![feature(io_error_more)] // `io::ErrorKind::FilesystemLoop` is still unstable; see host.rs.
//!
//! A sandboxed program names files in a virtual namespace assembled from
//! administrator-declared mounts, each binding a host directory to a
//! virtual directory with a read-only or read-write policy. This crate
//! owns those mount records and the two boundaries built on them:
//! translation between the namespaces ([`MountTable`]) and the
//! per-syscall ingestion of untrusted path strings
//! ([`copy_host_path_from_guest`]).
//!
//! Canonicalisation always runs against [`SandboxFs`], the mount-confined
//! [`FsView`], so even the link lookups performed while resolving a path
//! stay inside the mounts. Host paths leave this crate only as
//! [`HostPathBuf`] values produced by translation; a virtual path cannot
//! reach a host filesystem call by accident.
//!
//! # Security
//!
//! A user-level virtual filesystem validates a path and only later uses
//! the translated result, so there is a window between check and use. If
//! a new symlink can appear inside a confined tree during that window,
//! whether created directly or moved there by renaming a symlink or a
//! directory containing one, the host will follow it on use and may leave
//! the mount. The defence is structural and lives in the host-call layer:
//! confined programs must not be able to create symlinks, nor rename
//! symlinks or directories, within mounted trees. A lock around
//! check-and-use would only protect threads sharing the lock; cooperating
//! confined processes would remain, which is why the restriction on
//! introducing symlinks is the load-bearing mitigation.

mod host;
mod ingress;
mod register;
mod sandbox;
mod table;

pub use warden_paths::{FsError, FsView, LinkPolicy};

pub use host::{DirProbe, HostFs};
pub use ingress::{GuestMemory, copy_host_path_from_guest};
pub use register::{MountSpec, add_mount_spec};
pub use sandbox::SandboxFs;
pub use table::{HostLocation, HostPathBuf, Mount, MountTable};

#[cfg(test)]
mod tests;
