//! Mount directive parsing and registration.

use std::str::FromStr;

use warden_paths::{FsError, FsView, normalise, ops};

use crate::host::DirProbe;
use crate::sandbox::SandboxFs;
use crate::table::MountTable;

/// A parsed `<host-dir>:<virtual-dir>:<ro|rw>` mount directive.
///
/// A bare `<host-dir>` with no separators mounts the directory read-write
/// at the virtual root `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    /// Host directory to expose. May itself contain `:`.
    pub host_dir: String,
    /// Absolute virtual directory the host directory appears at.
    pub virtual_dir: String,
    /// Whether the mount permits writes.
    pub writable: bool,
}

impl FromStr for MountSpec {
    type Err = FsError;

    fn from_str(directive: &str) -> Result<Self, Self::Err> {
        if !directive.contains(':') {
            return Ok(Self {
                host_dir: directive.to_owned(),
                virtual_dir: String::from('/'),
                writable: true,
            });
        }
        // Split from the right so the host directory may contain ':'.
        let Some((rest, options)) = directive.rsplit_once(':') else {
            return Err(FsError::InvalidArgument);
        };
        let writable = match options {
            "ro" => false,
            "rw" => true,
            _ => {
                tracing::error!(options, "mount option must be 'ro' or 'rw'");
                return Err(FsError::InvalidArgument);
            }
        };
        let Some((host_dir, virtual_dir)) = rest.rsplit_once(':') else {
            tracing::error!(directive, "malformed mount directive");
            return Err(FsError::InvalidArgument);
        };
        if host_dir.is_empty() {
            tracing::error!(directive, "mount directive needs a host directory");
            return Err(FsError::InvalidArgument);
        }
        if !ops::is_absolute(virtual_dir) {
            tracing::error!(virtual_dir, "mount virtual directory must be absolute");
            return Err(FsError::InvalidArgument);
        }
        Ok(Self {
            host_dir: host_dir.to_owned(),
            virtual_dir: virtual_dir.to_owned(),
            writable,
        })
    }
}

/// Parses `directive` and registers the mount it describes.
///
/// The host directory is normalised, and verified to exist, through the
/// probe; the virtual directory is normalised through the table being
/// populated. Stored roots therefore always match the output of
/// canonicalisation, in both namespaces.
///
/// # Errors
/// [`FsError::InvalidArgument`] for a malformed directive, plus whatever
/// the probe reports for a missing or unusable host directory.
pub fn add_mount_spec<H>(table: &mut MountTable, host: &H, directive: &str) -> Result<(), FsError>
where
    H: FsView + DirProbe,
{
    let parsed: MountSpec = directive.parse()?;
    let host_root = host.canonical_dir(&parsed.host_dir).map_err(|error| {
        tracing::error!(host_dir = %parsed.host_dir, %error, "mount host directory rejected");
        error
    })?;
    let view = SandboxFs::new(table, host);
    let virtual_root = normalise(&view, &parsed.virtual_dir)?;
    table.add_mount(host_root, virtual_root, parsed.writable)?;
    tracing::debug!(directive, "registered mount");
    Ok(())
}
