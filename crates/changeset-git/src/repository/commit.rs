use crate::Result;

use super::Repository;

/// A commit created by [`Repository::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub oid: String,
    /// First line of the commit message.
    pub title: String,
}

impl Repository {
    /// Commits the current index on top of HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if no signature is configured or the commit cannot
    /// be created.
    pub fn commit(&self, message: &str) -> Result<CommitRef> {
        let sig = self.inner.signature()?;
        let tree_id = self.inner.index()?.write_tree()?;
        let tree = self.inner.find_tree(tree_id)?;

        let parent = self.inner.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        Ok(CommitRef {
            oid: oid.to_string(),
            title: message.lines().next().unwrap_or_default().to_string(),
        })
    }
}
