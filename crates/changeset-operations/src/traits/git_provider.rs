use std::path::Path;

use changeset_git::{CommitRef, TagRef};

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or status check fails.
    fn is_working_tree_clean(&self, project_root: &Path) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    fn tag_exists(&self, project_root: &Path, tag_name: &str) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if staging any of the files fails.
    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitRef>;

    /// # Errors
    ///
    /// Returns an error if the tag cannot be created or already exists.
    fn create_tag(&self, project_root: &Path, tag_name: &str, message: &str) -> Result<TagRef>;

    /// # Errors
    ///
    /// Returns an error if any file cannot be deleted.
    fn delete_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()>;
}

impl<T: GitProvider + ?Sized> GitProvider for &T {
    fn is_working_tree_clean(&self, project_root: &Path) -> Result<bool> {
        (**self).is_working_tree_clean(project_root)
    }

    fn tag_exists(&self, project_root: &Path, tag_name: &str) -> Result<bool> {
        (**self).tag_exists(project_root, tag_name)
    }

    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()> {
        (**self).stage_files(project_root, paths)
    }

    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitRef> {
        (**self).commit(project_root, message)
    }

    fn create_tag(&self, project_root: &Path, tag_name: &str, message: &str) -> Result<TagRef> {
        (**self).create_tag(project_root, tag_name, message)
    }

    fn delete_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()> {
        (**self).delete_files(project_root, paths)
    }
}
