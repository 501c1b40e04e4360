//! Scripted filesystem views shared by the resolver tests.

use std::collections::{HashMap, HashSet};

use crate::error::FsError;
use crate::view::FsView;

/// A deterministic [`FsView`] driven entirely by scripted entries.
///
/// Unscripted paths report [`FsError::NotASymlink`], modelling a world
/// where everything exists as an ordinary file or directory.
pub struct ScriptedFs {
    cwd: Result<String, FsError>,
    links: HashMap<String, String>,
    missing: HashSet<String>,
    denied: HashSet<String>,
}

impl ScriptedFs {
    pub fn new() -> Self {
        Self {
            cwd: Ok(String::from('/')),
            links: HashMap::new(),
            missing: HashSet::new(),
            denied: HashSet::new(),
        }
    }

    pub fn with_cwd(cwd: &str) -> Self {
        let mut fs = Self::new();
        fs.cwd = Ok(cwd.to_owned());
        fs
    }

    pub fn without_cwd(error: FsError) -> Self {
        let mut fs = Self::new();
        fs.cwd = Err(error);
        fs
    }

    pub fn link(mut self, path: &str, target: &str) -> Self {
        self.links.insert(path.to_owned(), target.to_owned());
        self
    }

    pub fn missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_owned());
        self
    }

    pub fn denied(mut self, path: &str) -> Self {
        self.denied.insert(path.to_owned());
        self
    }
}

impl FsView for ScriptedFs {
    fn current_dir(&self) -> Result<String, FsError> {
        self.cwd.clone()
    }

    fn read_link(&self, path: &str) -> Result<String, FsError> {
        if let Some(target) = self.links.get(path) {
            return Ok(target.clone());
        }
        if self.missing.contains(path) {
            return Err(FsError::NotFound);
        }
        if self.denied.contains(path) {
            return Err(FsError::PermissionDenied);
        }
        Err(FsError::NotASymlink)
    }
}
