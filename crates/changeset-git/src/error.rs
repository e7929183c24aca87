use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("not a git repository: '{path}'")]
    NotARepository { path: PathBuf },

    #[error("working tree has uncommitted changes")]
    DirtyWorkingTree,

    #[error("failed to delete file at '{path}'")]
    FileDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tag '{name}' already exists")]
    TagExists { name: String },
}
