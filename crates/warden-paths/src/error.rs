//! The shared failure taxonomy for resolution and confinement.

use thiserror::Error;

/// Failure kinds raised across the confinement layer.
///
/// The kinds mirror POSIX error semantics so an embedding syscall layer can
/// map them onto guest-visible codes. Expected failures (a bad path, a
/// missing mount, a symlink loop) are ordinary values of this type and are
/// never reported by panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FsError {
    /// A path component does not exist.
    #[error("no such file or directory")]
    NotFound,

    /// A path component exists and is not a symbolic link.
    ///
    /// The canonicaliser consumes this as a control-flow signal; it only
    /// escapes to callers that invoke
    /// [`FsView::read_link`](crate::FsView::read_link) directly.
    #[error("not a symbolic link")]
    NotASymlink,

    /// The host filesystem rejected a lookup.
    #[error("permission denied")]
    PermissionDenied,

    /// The symlink expansion ceiling was exceeded, or a final symlink was
    /// refused by policy.
    #[error("too many levels of symbolic links")]
    TooManyLinks,

    /// A path does not fit the destination capacity.
    #[error("file name too long")]
    NameTooLong,

    /// A guest address could not be read.
    #[error("bad address")]
    BadAddress,

    /// A malformed mount directive or other caller misuse.
    #[error("invalid argument")]
    InvalidArgument,

    /// The path resolves outside every mount, or a write was requested on
    /// a read-only mount.
    #[error("access denied")]
    AccessDenied,
}
