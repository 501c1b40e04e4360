//! The mount-confined view of the filesystem.

use warden_paths::{FsError, FsView};

use crate::table::MountTable;

/// A [`FsView`] presenting the virtual namespace described by a
/// [`MountTable`], backed by a host-side view.
///
/// Mount registration and per-syscall resolution both walk paths through
/// this view, so every link lookup is translated before it touches the
/// host. A path the table cannot map yields [`FsError::AccessDenied`],
/// deliberately indistinguishable from the verdict on a fully resolved
/// path outside the mounts.
#[derive(Debug, Clone, Copy)]
pub struct SandboxFs<'a, H> {
    table: &'a MountTable,
    host: &'a H,
}

impl<'a, H: FsView> SandboxFs<'a, H> {
    /// Creates a view over `table` backed by `host`.
    #[must_use]
    pub const fn new(table: &'a MountTable, host: &'a H) -> Self {
        Self { table, host }
    }

    /// The table this view confines paths with.
    #[must_use]
    pub const fn table(&self) -> &'a MountTable {
        self.table
    }
}

impl<H: FsView> FsView for SandboxFs<'_, H> {
    fn current_dir(&self) -> Result<String, FsError> {
        let host_cwd = self.host.current_dir()?;
        self.table
            .translate_to_virtual(&host_cwd)
            .ok_or(FsError::AccessDenied)
    }

    fn read_link(&self, path: &str) -> Result<String, FsError> {
        let location = self
            .table
            .translate_to_host(path)
            .ok_or(FsError::AccessDenied)?;
        self.host.read_link(location.path.as_str())
    }
}
