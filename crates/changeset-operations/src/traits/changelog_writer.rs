use std::path::{Path, PathBuf};

use crate::Result;
use crate::planner::PlannedRelease;

/// Consumer of the structured changelog entries of a release.
///
/// `generator` is the name configured under `changelog`; implementations may
/// use it to pick an output format. Rendering is entirely up to the
/// implementation.
pub trait ChangelogWriter: Send + Sync {
    /// Records `release` for the package located in `package_dir`.
    ///
    /// Returns the file that was written, if any, so it can be staged.
    ///
    /// # Errors
    ///
    /// Returns an error if the changelog cannot be written.
    fn write_release(
        &self,
        generator: &str,
        package_dir: &Path,
        release: &PlannedRelease,
    ) -> Result<Option<PathBuf>>;
}

impl<T: ChangelogWriter + ?Sized> ChangelogWriter for &T {
    fn write_release(
        &self,
        generator: &str,
        package_dir: &Path,
        release: &PlannedRelease,
    ) -> Result<Option<PathBuf>> {
        (**self).write_release(generator, package_dir, release)
    }
}
