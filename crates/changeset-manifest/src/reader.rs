use std::path::Path;

use semver::Version;
use toml_edit::{DocumentMut, Item};

use crate::Result;
use crate::error::{Access, ManifestError};

/// # Errors
///
/// Returns `ManifestError::Io` if the file cannot be read, or
/// `ManifestError::Syntax` if the TOML is malformed.
pub fn read_document(path: &Path) -> Result<DocumentMut> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| ManifestError::io(path, Access::Read, source))?;

    content
        .parse::<DocumentMut>()
        .map_err(|source| ManifestError::Syntax {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads the literal `package.version` of a manifest.
///
/// # Errors
///
/// Returns `ManifestError::MissingKey` if the version is absent or not a
/// string (an inherited version counts as absent), or
/// `ManifestError::BadVersion` if it is not valid semver.
pub fn read_version(path: &Path) -> Result<Version> {
    let doc = read_document(path)?;

    let version_str = doc
        .get("package")
        .and_then(|package| package.get("version"))
        .and_then(Item::as_str)
        .ok_or_else(|| ManifestError::MissingKey {
            path: path.to_path_buf(),
            key: "package.version",
        })?;

    Version::parse(version_str).map_err(|source| ManifestError::BadVersion {
        path: path.to_path_buf(),
        raw: version_str.to_string(),
        source,
    })
}

/// Returns true if the manifest declares `version.workspace = true`, in
/// either dotted or inline-table form.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed.
pub fn has_inherited_version(path: &Path) -> Result<bool> {
    let doc = read_document(path)?;

    let inherited = doc
        .get("package")
        .and_then(|package| package.get("version"))
        .and_then(Item::as_table_like)
        .and_then(|version| version.get("workspace"))
        .and_then(Item::as_bool)
        .unwrap_or(false);

    Ok(inherited)
}
