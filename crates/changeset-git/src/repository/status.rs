use std::path::PathBuf;

use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// Paths with uncommitted changes, untracked files included.
    ///
    /// # Errors
    ///
    /// Returns an error if the git status operation fails.
    pub fn dirty_paths(&self) -> Result<Vec<PathBuf>> {
        let statuses = self.inner.statuses(Some(
            git2::StatusOptions::new()
                .include_untracked(true)
                .recurse_untracked_dirs(true),
        ))?;

        Ok(statuses
            .iter()
            .filter_map(|entry| entry.path().map(PathBuf::from))
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if the git status operation fails.
    pub fn is_working_tree_clean(&self) -> Result<bool> {
        Ok(self.dirty_paths()?.is_empty())
    }

    /// # Errors
    ///
    /// Returns [`GitError::DirtyWorkingTree`] if there are uncommitted changes.
    pub fn require_clean_working_tree(&self) -> Result<()> {
        if self.is_working_tree_clean()? {
            Ok(())
        } else {
            Err(GitError::DirtyWorkingTree)
        }
    }
}
