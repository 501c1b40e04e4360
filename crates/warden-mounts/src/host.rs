//! Host-backed filesystem collaborators.

use std::io;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use warden_paths::{FsError, FsView};

/// Normalises a declared host directory during mount registration.
pub trait DirProbe {
    /// Returns the canonical absolute form of `path`, verifying that it
    /// names an existing directory on the host.
    ///
    /// # Errors
    /// [`FsError::NotFound`] when nothing exists at `path`, and
    /// [`FsError::InvalidArgument`] when the target is not a directory or
    /// its canonical form is not UTF-8.
    fn canonical_dir(&self, path: &str) -> Result<String, FsError>;
}

/// The real host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl HostFs {
    /// Creates the host view.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FsView for HostFs {
    fn current_dir(&self) -> Result<String, FsError> {
        let cwd = std::env::current_dir().map_err(|error| map_io_error(&error))?;
        utf8_path(cwd)
    }

    fn read_link(&self, path: &str) -> Result<String, FsError> {
        // The target comes back untranslated: symlink contents are
        // interpreted in the namespace of whichever view walks them, so a
        // link that must work both confined and unconfined has to be
        // relative.
        let target = std::fs::read_link(path).map_err(|error| map_io_error(&error))?;
        utf8_path(target)
    }
}

impl DirProbe for HostFs {
    fn canonical_dir(&self, path: &str) -> Result<String, FsError> {
        let canonical = std::fs::canonicalize(path).map_err(|error| map_io_error(&error))?;
        let metadata = std::fs::metadata(&canonical).map_err(|error| map_io_error(&error))?;
        if !metadata.is_dir() {
            return Err(FsError::InvalidArgument);
        }
        utf8_path(canonical)
    }
}

fn map_io_error(error: &io::Error) -> FsError {
    match error.kind() {
        io::ErrorKind::NotFound => FsError::NotFound,
        // The common case: the entry exists but is not a symlink.
        io::ErrorKind::InvalidInput => FsError::NotASymlink,
        io::ErrorKind::PermissionDenied => FsError::PermissionDenied,
        io::ErrorKind::FilesystemLoop => FsError::TooManyLinks,
        io::ErrorKind::NotADirectory => FsError::NotFound,
        io::ErrorKind::InvalidFilename => FsError::NameTooLong,
        // Unrecognised host failures fail resolution closed.
        _ => FsError::PermissionDenied,
    }
}

fn utf8_path(path: PathBuf) -> Result<String, FsError> {
    Utf8PathBuf::from_path_buf(path)
        .map(Utf8PathBuf::into_string)
        .map_err(|_| FsError::InvalidArgument)
}
