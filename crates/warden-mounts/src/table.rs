//! Mount records and translation between the virtual and host namespaces.

use warden_paths::FsError;
use warden_paths::ops;

/// An owned path in the host filesystem's namespace.
///
/// Only mount translation (and the explicit no-mount bypass) produces
/// values of this type, so a host filesystem call that demands one can
/// never be handed an untranslated virtual path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPathBuf(String);

impl HostPathBuf {
    pub(crate) fn new(path: String) -> Self {
        Self(path)
    }

    /// The path as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value, returning the underlying text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for HostPathBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of translating a virtual path onto the host filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLocation {
    /// The translated host path.
    pub path: HostPathBuf,
    /// Whether the matched mount permits writes.
    pub writable: bool,
}

/// A single binding of a host directory into the virtual namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    host_root: String,
    virtual_root: String,
    writable: bool,
}

impl Mount {
    /// The host directory this mount exposes.
    #[must_use]
    pub fn host_root(&self) -> &str {
        &self.host_root
    }

    /// The absolute, normalised virtual directory the host root appears at.
    #[must_use]
    pub fn virtual_root(&self) -> &str {
        &self.virtual_root
    }

    /// Whether the mount permits writes.
    #[must_use]
    pub const fn writable(&self) -> bool {
        self.writable
    }
}

/// The set of mounts confining one sandbox instance.
///
/// Populated during sandbox setup and read-only afterwards; construct it
/// once and share it by reference across threads. Overlapping mounts are
/// resolved most-specific-first: the mount whose source-side root is the
/// longest component-boundary prefix of the path wins, and registration
/// order breaks length ties.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    mounts: Vec<Mount>,
}

impl MountTable {
    /// Creates an empty table. Confinement stays disabled until the first
    /// mount is added.
    #[must_use]
    pub const fn new() -> Self {
        Self { mounts: Vec::new() }
    }

    /// Records a mount binding `host_root` into the virtual namespace at
    /// `virtual_root`.
    ///
    /// Both roots must already be absolute and normalised so that stored
    /// roots match canonicalised paths exactly; registering through
    /// [`add_mount_spec`](crate::add_mount_spec) takes care of that.
    ///
    /// # Errors
    /// [`FsError::InvalidArgument`] when `virtual_root` is not absolute.
    pub fn add_mount(
        &mut self,
        host_root: impl Into<String>,
        virtual_root: impl Into<String>,
        writable: bool,
    ) -> Result<(), FsError> {
        let virtual_root = virtual_root.into();
        if !ops::is_absolute(&virtual_root) {
            return Err(FsError::InvalidArgument);
        }
        self.mounts.push(Mount {
            host_root: host_root.into(),
            virtual_root,
            writable,
        });
        Ok(())
    }

    /// True once at least one mount exists.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.mounts.is_empty()
    }

    /// The registered mounts, in registration order.
    #[must_use]
    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    /// Maps a canonical virtual path to its host location.
    ///
    /// Returns `None` when no mount's virtual root prefixes the path on a
    /// component boundary. Callers must surface that as access denied,
    /// not as a missing file, so probing cannot reveal what exists on the
    /// host outside the mounts.
    #[must_use]
    pub fn translate_to_host(&self, virtual_path: &str) -> Option<HostLocation> {
        let mount = self.best_match(virtual_path, Mount::virtual_root)?;
        let translated =
            ops::replace_path_prefix(virtual_path, &mount.virtual_root, &mount.host_root)?;
        Some(HostLocation {
            path: HostPathBuf::new(translated),
            writable: mount.writable,
        })
    }

    /// Maps a host path back into the virtual namespace.
    ///
    /// Used when reporting a resolved location, such as the working
    /// directory, back to the confined program.
    #[must_use]
    pub fn translate_to_virtual(&self, host_path: &str) -> Option<String> {
        let mount = self.best_match(host_path, Mount::host_root)?;
        ops::replace_path_prefix(host_path, &mount.host_root, &mount.virtual_root)
    }

    /// Finds the matching mount with the longest source-side root,
    /// keeping the earliest-registered mount on a length tie.
    fn best_match<'a>(
        &'a self,
        path: &str,
        source_root: impl Fn(&'a Mount) -> &'a str,
    ) -> Option<&'a Mount> {
        let mut best: Option<&Mount> = None;
        for mount in &self.mounts {
            let root = source_root(mount);
            if !ops::starts_with_path(path, root) {
                continue;
            }
            if best.is_none_or(|found| source_root(found).len() < root.len()) {
                best = Some(mount);
            }
        }
        best
    }
}
