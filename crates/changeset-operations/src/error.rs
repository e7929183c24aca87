use std::path::PathBuf;

use thiserror::Error;

use crate::planner::PlanError;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid workspace configuration")]
    Graph(#[from] changeset_core::GraphError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Git(#[from] changeset_git::GitError),

    #[error(transparent)]
    Project(#[from] changeset_project::ProjectError),

    #[error(transparent)]
    Manifest(#[from] changeset_manifest::ManifestError),

    #[error("failed to read changeset file '{path}'")]
    ChangesetFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse changeset file '{path}'")]
    ChangesetParse {
        path: PathBuf,
        #[source]
        source: changeset_parse::FormatError,
    },

    #[error("failed to list changeset files in '{path}'")]
    ChangesetList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid changeset path '{path}': {reason}")]
    InvalidChangesetPath { path: PathBuf, reason: &'static str },

    #[error("no packages found in project at '{0}'")]
    EmptyProject(PathBuf),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error(
        "cannot release packages with inherited workspace versions: {}",
        packages.join(", ")
    )]
    InheritedVersions { packages: Vec<String> },

    #[error("working tree has uncommitted changes; commit or stash them, or release without committing")]
    DirtyWorkingTree,

    #[error("tag '{name}' already exists")]
    TagExists { name: String },
}

pub type Result<T> = std::result::Result<T, OperationError>;
