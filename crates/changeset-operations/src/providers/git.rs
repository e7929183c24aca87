use std::path::Path;

use changeset_git::{CommitRef, Repository, TagRef};

use crate::Result;
use crate::traits::GitProvider;

/// Opens the repository containing the project root on every call, so
/// external changes between release steps are always observed.
#[derive(Debug, Default)]
pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn with_repo<T>(
        project_root: &Path,
        action: impl FnOnce(&Repository) -> changeset_git::Result<T>,
    ) -> Result<T> {
        let repo = Repository::open(project_root)?;
        Ok(action(&repo)?)
    }
}

impl GitProvider for Git2Provider {
    fn is_working_tree_clean(&self, project_root: &Path) -> Result<bool> {
        Self::with_repo(project_root, Repository::is_working_tree_clean)
    }

    fn tag_exists(&self, project_root: &Path, tag_name: &str) -> Result<bool> {
        Self::with_repo(project_root, |repo| repo.tag_exists(tag_name))
    }

    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()> {
        Self::with_repo(project_root, |repo| repo.stage_files(paths))
    }

    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitRef> {
        Self::with_repo(project_root, |repo| repo.commit(message))
    }

    fn create_tag(&self, project_root: &Path, tag_name: &str, message: &str) -> Result<TagRef> {
        Self::with_repo(project_root, |repo| repo.create_tag(tag_name, message))
    }

    fn delete_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()> {
        Self::with_repo(project_root, |repo| repo.delete_files(paths))
    }
}
