use std::path::Path;

use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// Stages the given paths. Paths that no longer exist are staged as
    /// removals.
    ///
    /// # Errors
    ///
    /// Returns an error if updating or writing the index fails.
    pub fn stage_files(&self, paths: &[&Path]) -> Result<()> {
        let mut index = self.inner.index()?;

        for path in paths {
            let relative = self.to_relative_path(path);
            if self.to_absolute_path(&relative).exists() {
                index.add_path(&relative)?;
            } else {
                index.remove_path(&relative)?;
            }
        }

        index.write()?;
        Ok(())
    }

    /// Deletes the files from disk and from the index.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::FileDelete`] if a file cannot be deleted. Files
    /// before the failing one stay deleted.
    pub fn delete_files(&self, paths: &[&Path]) -> Result<()> {
        let mut index = self.inner.index()?;

        for path in paths {
            let absolute = self.to_absolute_path(path);
            let relative = self.to_relative_path(path);

            std::fs::remove_file(&absolute).map_err(|source| GitError::FileDelete {
                path: absolute.clone(),
                source,
            })?;
            if index.get_path(&relative, 0).is_some() {
                index.remove_path(&relative)?;
            }
        }

        index.write()?;
        Ok(())
    }
}
