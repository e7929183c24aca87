use crate::{GitError, Result};

use super::Repository;

/// An annotated tag and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub target: String,
}

impl Repository {
    /// # Errors
    ///
    /// Returns an error if the tag lookup fails.
    pub fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.inner.find_reference(&format!("refs/tags/{name}")) {
            Ok(_) => Ok(true),
            Err(err) if err.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Creates an annotated tag on HEAD.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::TagExists`] if the tag already exists, or an error
    /// if the tag cannot be created.
    pub fn create_tag(&self, name: &str, message: &str) -> Result<TagRef> {
        if self.tag_exists(name)? {
            return Err(GitError::TagExists {
                name: name.to_string(),
            });
        }

        let head = self.inner.head()?.peel_to_commit()?;
        let sig = self.inner.signature()?;
        self.inner
            .tag(name, head.as_object(), &sig, message, false)?;

        Ok(TagRef {
            name: name.to_string(),
            target: head.id().to_string(),
        })
    }
}
