use std::fmt;
use std::path::PathBuf;

use semver::Version;
use thiserror::Error;

/// Direction of a failed manifest access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "write",
        })
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot {access} manifest '{path}'")]
    Io {
        path: PathBuf,
        access: Access,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest '{path}' is not valid TOML")]
    Syntax {
        path: PathBuf,
        #[source]
        source: toml_edit::TomlError,
    },

    /// The key is absent, or is not a literal value that can be rewritten.
    #[error("manifest '{path}' has no literal `{key}`")]
    MissingKey { path: PathBuf, key: &'static str },

    #[error("manifest '{path}' declares unparseable version '{raw}'")]
    BadVersion {
        path: PathBuf,
        raw: String,
        #[source]
        source: semver::Error,
    },

    #[error("manifest '{path}' holds version {found} after writing {expected}")]
    VersionMismatch {
        path: PathBuf,
        expected: Version,
        found: Version,
    },
}

impl ManifestError {
    pub(crate) fn io(path: &std::path::Path, access: Access, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            access,
            source,
        }
    }
}
