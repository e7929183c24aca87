use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("cannot access '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no Cargo.toml found in '{start_dir}' or any parent directory")]
    NoManifest { start_dir: PathBuf },

    #[error("manifest '{path}' is malformed")]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("package at '{path}' has no version: `{key}` is not set")]
    VersionUnset { path: PathBuf, key: &'static str },

    #[error("package at '{path}' declares unparseable version '{raw}'")]
    BadVersion {
        path: PathBuf,
        raw: String,
        #[source]
        source: semver::Error,
    },

    #[error("workspace member pattern '{pattern}' is not a valid glob")]
    MemberPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("'{package}' inherits dependency '{dependency}' missing from [workspace.dependencies]")]
    MissingWorkspaceDependency { package: String, dependency: String },
}

impl ProjectError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
