//! Scripted host-side collaborators shared by the confinement tests.

use std::collections::HashMap;

use warden_paths::{FsError, FsView};

use crate::host::DirProbe;
use crate::ingress::GuestMemory;

/// A deterministic stand-in for the host filesystem.
///
/// Link lookups answer from a scripted map, with everything else treated
/// as an existing ordinary entry; the directory probe answers from a
/// scripted directory table.
pub struct ScriptedHost {
    cwd: String,
    links: HashMap<String, String>,
    dirs: HashMap<String, String>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            cwd: String::from('/'),
            links: HashMap::new(),
            dirs: HashMap::new(),
        }
    }

    pub fn with_cwd(cwd: &str) -> Self {
        let mut host = Self::new();
        host.cwd = cwd.to_owned();
        host
    }

    pub fn link(mut self, path: &str, target: &str) -> Self {
        self.links.insert(path.to_owned(), target.to_owned());
        self
    }

    /// Scripts the probe to canonicalise `declared` into `canonical`.
    pub fn dir(mut self, declared: &str, canonical: &str) -> Self {
        self.dirs.insert(declared.to_owned(), canonical.to_owned());
        self
    }
}

impl FsView for ScriptedHost {
    fn current_dir(&self) -> Result<String, FsError> {
        Ok(self.cwd.clone())
    }

    fn read_link(&self, path: &str) -> Result<String, FsError> {
        self.links
            .get(path)
            .cloned()
            .ok_or(FsError::NotASymlink)
    }
}

impl DirProbe for ScriptedHost {
    fn canonical_dir(&self, path: &str) -> Result<String, FsError> {
        self.dirs.get(path).cloned().ok_or(FsError::NotFound)
    }
}

/// Guest memory holding scripted strings at scripted addresses.
pub struct FakeGuest {
    strings: HashMap<u32, String>,
}

impl FakeGuest {
    pub fn new() -> Self {
        Self {
            strings: HashMap::new(),
        }
    }

    pub fn string(mut self, src: u32, value: &str) -> Self {
        self.strings.insert(src, value.to_owned());
        self
    }
}

impl GuestMemory for FakeGuest {
    fn copy_string(&self, src: u32, max_len: usize) -> Result<String, FsError> {
        let value = self.strings.get(&src).ok_or(FsError::BadAddress)?;
        if value.len() + 1 > max_len {
            return Err(FsError::NameTooLong);
        }
        Ok(value.clone())
    }
}
