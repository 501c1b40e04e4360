//! The filesystem-view capability the canonicaliser is parameterised over.

use crate::error::FsError;

/// A view of a filesystem sufficient for path resolution.
///
/// Implementations decide which namespace the view presents: the host
/// filesystem directly, a mount-confined virtual tree, or a scripted
/// double in tests. The canonicaliser consults nothing beyond these two
/// operations, so whatever they confine stays confined.
pub trait FsView {
    /// Returns the current working directory as an absolute path in this
    /// view's namespace.
    ///
    /// # Errors
    /// Implementation-defined; the canonicaliser propagates the failure
    /// verbatim when it needs a base for a relative path.
    fn current_dir(&self) -> Result<String, FsError>;

    /// Returns the target of the symbolic link at `path`.
    ///
    /// Exactly three outcomes matter to resolution: the link target on
    /// success, [`FsError::NotASymlink`] when `path` exists and is not a
    /// link, and [`FsError::NotFound`] when nothing exists there. Any
    /// other error aborts resolution immediately.
    ///
    /// The returned target is not translated between namespaces: it is
    /// interpreted in the namespace of whichever view walks it.
    fn read_link(&self, path: &str) -> Result<String, FsError>;
}
