//! The untrusted-path ingestion boundary.
//!
//! Every filesystem-shaped syscall funnels its path argument through
//! [`copy_host_path_from_guest`] before any host filesystem call sees it.

use warden_paths::{FsError, FsView, LinkPolicy, canonicalise_with};

use crate::sandbox::SandboxFs;
use crate::table::HostPathBuf;

/// Read access to the confined program's memory.
pub trait GuestMemory {
    /// Copies the NUL-terminated string at `src` out of guest memory.
    ///
    /// The returned string carries no terminator and therefore no NUL
    /// byte, so a copied path can never smuggle one into resolution.
    ///
    /// # Errors
    /// [`FsError::BadAddress`] when `src` lies outside the guest address
    /// space, [`FsError::NameTooLong`] when no terminator appears within
    /// `max_len` bytes, and [`FsError::InvalidArgument`] for bytes that
    /// are not UTF-8.
    fn copy_string(&self, src: u32, max_len: usize) -> Result<String, FsError>;
}

/// Copies a path out of guest memory and translates it onto the host.
///
/// With no active mounts the raw path is returned unchanged. Otherwise
/// the path is canonicalised in the virtual namespace under `policy`,
/// mapped through the mount table, and checked against
/// `require_writable` and `capacity` (which counts the terminator the
/// host layer will append).
///
/// A failure at any step yields an error and no path at all, so a caller
/// that ignores the verdict holds nothing it could misuse.
///
/// # Errors
/// Whatever the guest copy or canonicalisation reports;
/// [`FsError::NotFound`] for an empty path while mounts are active;
/// [`FsError::AccessDenied`] when the resolved path matches no mount or
/// the mount is read-only while `require_writable` was requested;
/// [`FsError::NameTooLong`] when the host path does not fit `capacity`.
pub fn copy_host_path_from_guest<G, H>(
    guest: &G,
    sandbox: &SandboxFs<'_, H>,
    src: u32,
    capacity: usize,
    require_writable: bool,
    policy: LinkPolicy,
) -> Result<HostPathBuf, FsError>
where
    G: GuestMemory,
    H: FsView,
{
    let raw = guest.copy_string(src, capacity)?;

    // Without mounts this boundary is a plain copy.
    if !sandbox.table().is_enabled() {
        return Ok(HostPathBuf::new(raw));
    }

    if raw.is_empty() {
        return Err(FsError::NotFound);
    }
    let resolved = canonicalise_with(sandbox, &raw, policy)?;
    let location = sandbox
        .table()
        .translate_to_host(&resolved)
        .ok_or(FsError::AccessDenied)?;
    if require_writable && !location.writable {
        return Err(FsError::AccessDenied);
    }
    if location.path.as_str().len() + 1 > capacity {
        tracing::warn!(host_path = %location.path, "translated path exceeds capacity");
        return Err(FsError::NameTooLong);
    }
    Ok(location.path)
}
