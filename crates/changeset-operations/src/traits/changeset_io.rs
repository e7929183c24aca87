use std::path::{Path, PathBuf};

use changeset_core::Changeset;

use crate::Result;

pub trait ChangesetReader: Send + Sync {
    /// Reads one changeset. The changeset id is derived from the file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn read_changeset(&self, path: &Path) -> Result<Changeset>;

    /// Lists changeset files in a stable order. A missing directory has no
    /// changesets.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list_changesets(&self, changeset_dir: &Path) -> Result<Vec<PathBuf>>;
}
