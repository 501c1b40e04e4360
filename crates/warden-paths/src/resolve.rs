//! Canonicalisation of virtual paths.
//!
//! One iterative routine implements both entry points: [`normalise`]
//! rewrites a path into absolute normalised form without consulting link
//! state, and [`canonicalise`] additionally resolves every symbolic link
//! it walks across. Nothing on disk needs to exist for resolution to
//! succeed; only a failure while reading a leading component's link state
//! is fatal, so a path whose final component is about to be created still
//! resolves.

use crate::error::FsError;
use crate::ops;
use crate::view::FsView;

/// Ceiling on symlink expansions within a single resolution.
///
/// High enough for legitimate link chains, low enough to stop cycles
/// quickly.
pub const MAX_LINK_EXPANSIONS: usize = 32;

/// Treatment of a symbolic link in the final path component.
///
/// Intermediate components are always resolved; the policy only governs
/// the last one, which is the component filesystem calls disagree about
/// (`stat` follows it, `lstat` and `unlink` operate on the link itself,
/// exclusive creation refuses it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Resolve a final symlink like any other component.
    #[default]
    FollowFinal,
    /// Leave a final symlink unresolved.
    KeepFinal,
    /// Fail with [`FsError::TooManyLinks`] when the final component is a
    /// symlink.
    RejectFinal,
}

/// Makes `path` absolute and normalised without resolving symlinks.
///
/// Discards empty and `.` components, clamps `..` at the root, and joins
/// a relative `path` onto the view's current directory.
///
/// # Errors
/// Propagates a failure to read the current directory for relative input;
/// absolute input cannot fail.
pub fn normalise<F: FsView>(fs: &F, path: &str) -> Result<String, FsError> {
    resolve(fs, path, None)
}

/// Resolves `path` into a canonical absolute path, following every
/// symbolic link encountered, including in intermediate components.
///
/// # Errors
/// Fails with [`FsError::TooManyLinks`] on link cycles or pathological
/// depth, and propagates any lookup failure other than a missing final
/// component.
pub fn canonicalise<F: FsView>(fs: &F, path: &str) -> Result<String, FsError> {
    resolve(fs, path, Some(LinkPolicy::FollowFinal))
}

/// Like [`canonicalise`], with an explicit policy for a symlink in the
/// final component.
///
/// # Errors
/// As [`canonicalise`], plus [`FsError::TooManyLinks`] for a final
/// symlink under [`LinkPolicy::RejectFinal`].
pub fn canonicalise_with<F: FsView>(
    fs: &F,
    path: &str,
    policy: LinkPolicy,
) -> Result<String, FsError> {
    resolve(fs, path, Some(policy))
}

/// In-flight resolution state.
///
/// Invariants: `done` is absolute and normalised, holding no `.`, `..`,
/// or empty components, and when links are being followed every component
/// of `done` has had its link state checked. `rest` is the unprocessed
/// remainder and is interpreted relative to `done` even when it starts
/// with a separator.
struct Walk {
    done: String,
    rest: String,
    link_count: usize,
}

impl Walk {
    fn begin<F: FsView>(fs: &F, path: &str) -> Result<Self, FsError> {
        let rest = if ops::is_absolute(path) {
            path.to_owned()
        } else {
            ops::join_components(&fs.current_dir()?, path)
        };
        Ok(Self {
            done: String::from(ops::SEPARATOR),
            rest,
            link_count: 0,
        })
    }

    /// Pops the next raw component off `rest`, consuming one separator.
    fn next_component(&mut self) -> Option<String> {
        if self.rest.is_empty() {
            return None;
        }
        let current = std::mem::take(&mut self.rest);
        let (head, tail) = ops::split_first_component(&current);
        tail.clone_into(&mut self.rest);
        Some(head.to_owned())
    }

    /// Removes the last component of `done`, clamping at the root.
    fn pop_parent(&mut self) {
        let parent_len = ops::split_last_component(&self.done).0.len();
        self.done.truncate(parent_len);
        if self.done.is_empty() {
            self.done.push(ops::SEPARATOR);
        }
    }

    fn adopt(&mut self, head: &str) {
        ops::append_component(&mut self.done, head);
    }

    /// Re-queues a link target in place of the component that named it.
    ///
    /// The target plus everything not yet consumed becomes the new
    /// remainder, re-walked from `done` (reset to the root for an
    /// absolute target).
    fn expand_link(
        &mut self,
        candidate: String,
        target: &str,
        policy: LinkPolicy,
    ) -> Result<(), FsError> {
        if self.rest.is_empty() {
            match policy {
                LinkPolicy::RejectFinal => return Err(FsError::TooManyLinks),
                LinkPolicy::KeepFinal => {
                    self.done = candidate;
                    return Ok(());
                }
                LinkPolicy::FollowFinal => {}
            }
        }
        self.link_count += 1;
        if self.link_count > MAX_LINK_EXPANSIONS {
            return Err(FsError::TooManyLinks);
        }
        if ops::is_absolute(target) {
            self.done.clear();
            self.done.push(ops::SEPARATOR);
        }
        self.rest = ops::join_components(target, &self.rest);
        Ok(())
    }
}

/// Consults link state for one component and advances the walk.
fn follow_component<F: FsView>(
    fs: &F,
    walk: &mut Walk,
    head: &str,
    policy: LinkPolicy,
) -> Result<(), FsError> {
    let candidate = ops::join_components(&walk.done, head);
    match fs.read_link(&candidate) {
        Ok(target) => walk.expand_link(candidate, &target, policy),
        // The common case: the component exists and is not a link.
        Err(FsError::NotASymlink) => {
            walk.done = candidate;
            Ok(())
        }
        // A missing entry is tolerated for the final component only.
        Err(FsError::NotFound) if walk.rest.is_empty() => {
            walk.done = candidate;
            Ok(())
        }
        // Failing here keeps the result link-free: adopting a component
        // whose link state could not be read would hand back a path with
        // an unresolved link in it.
        Err(error) => Err(error),
    }
}

fn resolve<F: FsView>(fs: &F, path: &str, links: Option<LinkPolicy>) -> Result<String, FsError> {
    let mut walk = Walk::begin(fs, path)?;
    while let Some(head) = walk.next_component() {
        if head.is_empty() || head == "." {
            continue;
        }
        if head == ".." {
            walk.pop_parent();
            continue;
        }
        match links {
            Some(policy) => follow_component(fs, &mut walk, &head, policy)?,
            None => walk.adopt(&head),
        }
    }
    Ok(walk.done)
}
