use std::fs;
use std::path::{Path, PathBuf};

use changeset_core::Changeset;
use changeset_parse::{CHANGESET_EXTENSION, parse_changeset};

use crate::Result;
use crate::error::OperationError;
use crate::traits::ChangesetReader;

/// Reads changeset files from disk. Relative paths resolve against the
/// project root.
pub struct FileSystemChangesetIO {
    project_root: PathBuf,
}

impl FileSystemChangesetIO {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

impl ChangesetReader for FileSystemChangesetIO {
    fn read_changeset(&self, path: &Path) -> Result<Changeset> {
        let full_path = self.resolve(path);
        let id = full_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| OperationError::InvalidChangesetPath {
                path: full_path.clone(),
                reason: "file name is not valid UTF-8",
            })?;

        let content =
            fs::read_to_string(&full_path).map_err(|source| OperationError::ChangesetFileRead {
                path: full_path.clone(),
                source,
            })?;

        parse_changeset(id, &content).map_err(|source| OperationError::ChangesetParse {
            path: full_path.clone(),
            source,
        })
    }

    fn list_changesets(&self, changeset_dir: &Path) -> Result<Vec<PathBuf>> {
        let full_path = self.resolve(changeset_dir);

        let entries = match fs::read_dir(&full_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(OperationError::ChangesetList {
                    path: full_path,
                    source,
                });
            }
        };

        let mut changesets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| OperationError::ChangesetList {
                path: full_path.clone(),
                source,
            })?;
            let path = entry.path();

            if !path.is_file() || path.extension().is_none_or(|ext| ext != CHANGESET_EXTENSION) {
                continue;
            }
            if path
                .file_name()
                .is_some_and(|name| name.eq_ignore_ascii_case("README.md"))
            {
                continue;
            }

            changesets.push(path);
        }

        changesets.sort();
        Ok(changesets)
    }
}
