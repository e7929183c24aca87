//! Thin wrapper over `git2` with the handful of operations a release needs.

mod error;
mod repository;

pub use error::GitError;
pub use repository::{CommitRef, Repository, TagRef};

pub type Result<T> = std::result::Result<T, GitError>;
