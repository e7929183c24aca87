mod commit;
mod index;
mod status;
mod tag;

use std::path::{Path, PathBuf};

pub use commit::CommitRef;
pub use tag::TagRef;

use crate::{GitError, Result};

pub struct Repository {
    pub(crate) inner: git2::Repository,
    root: PathBuf,
}

impl Repository {
    /// Opens the repository containing `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if the path is not inside a
    /// non-bare git repository.
    pub fn open(path: &Path) -> Result<Self> {
        let not_a_repo = || GitError::NotARepository {
            path: path.to_path_buf(),
        };

        let inner = git2::Repository::discover(path).map_err(|_| not_a_repo())?;
        let root = inner.workdir().ok_or_else(not_a_repo)?;
        // Strip the \\?\ prefix on Windows so prefix matching works.
        let root = dunce::simplified(root).to_path_buf();

        Ok(Self { inner, root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path relative to the working tree root, as the index expects it.
    pub(crate) fn to_relative_path(&self, path: &Path) -> PathBuf {
        if !path.is_absolute() {
            return path.to_path_buf();
        }
        let canonical = path
            .parent()
            .and_then(|parent| parent.canonicalize().ok())
            .zip(path.file_name())
            .map_or_else(|| path.to_path_buf(), |(parent, name)| parent.join(name));
        let canonical_root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());

        dunce::simplified(&canonical)
            .strip_prefix(dunce::simplified(&canonical_root))
            .or_else(|_| path.strip_prefix(&self.root))
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }

    pub(crate) fn to_absolute_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
