use std::path::Path;

use semver::Version;
use toml_edit::{DocumentMut, Item, TableLike, value};

use crate::Result;
use crate::error::{Access, ManifestError};
use crate::reader::{read_document, read_version};

const DEPENDENCY_SECTIONS: [&str; 3] = ["dependencies", "dev-dependencies", "build-dependencies"];

const REQUIREMENT_OPERATORS: [&str; 5] = [">=", "=", "^", "~", ">"];

fn save(path: &Path, doc: &DocumentMut) -> Result<()> {
    std::fs::write(path, doc.to_string())
        .map_err(|source| ManifestError::io(path, Access::Write, source))
}

/// Sets `package.version`, keeping the rest of the file untouched.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, parsed, or written, or
/// has no `[package]` table.
pub fn write_version(path: &Path, version: &Version) -> Result<()> {
    let mut doc = read_document(path)?;

    let package = doc
        .get_mut("package")
        .and_then(Item::as_table_like_mut)
        .ok_or_else(|| ManifestError::MissingKey {
            path: path.to_path_buf(),
            key: "package",
        })?;

    package.insert("version", value(version.to_string()));

    save(path, &doc)
}

/// # Errors
///
/// Returns `ManifestError::VersionMismatch` if the version in the manifest
/// does not match the expected version.
pub fn verify_version(path: &Path, expected: &Version) -> Result<()> {
    let actual = read_version(path)?;

    if actual != *expected {
        return Err(ManifestError::VersionMismatch {
            path: path.to_path_buf(),
            expected: expected.clone(),
            found: actual,
        });
    }

    Ok(())
}

/// Points every requirement on `package` at `new_version`.
///
/// Looks in `[workspace.dependencies]`, `[dependencies]`,
/// `[dev-dependencies]` and `[build-dependencies]`, matching both plain keys
/// and renamed entries (`package = "..."`). Only table entries with an
/// explicit `version` are touched; plain strings are registry requirements,
/// and `workspace = true` or path-only entries have nothing to update. A
/// leading comparison operator is kept.
///
/// Returns whether the file was changed.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, parsed, or written.
pub fn update_dependency_requirement(
    path: &Path,
    package: &str,
    new_version: &Version,
) -> Result<bool> {
    let mut doc = read_document(path)?;
    let mut changed = false;

    if let Some(deps) = doc
        .get_mut("workspace")
        .and_then(|ws| ws.get_mut("dependencies"))
        .and_then(Item::as_table_like_mut)
    {
        changed |= update_entries(deps, package, new_version);
    }

    for section in DEPENDENCY_SECTIONS {
        if let Some(deps) = doc.get_mut(section).and_then(Item::as_table_like_mut) {
            changed |= update_entries(deps, package, new_version);
        }
    }

    if changed {
        save(path, &doc)?;
    }

    Ok(changed)
}

fn update_entries(deps: &mut dyn TableLike, package: &str, new_version: &Version) -> bool {
    let mut changed = false;

    for (key, entry) in deps.iter_mut() {
        let renamed_to = entry
            .as_table_like()
            .and_then(|t| t.get("package"))
            .and_then(Item::as_str);
        if renamed_to.unwrap_or(key.get()) != package {
            continue;
        }
        changed |= update_entry(entry, new_version);
    }

    changed
}

fn update_entry(entry: &mut Item, new_version: &Version) -> bool {
    let Some(table) = entry.as_table_like_mut() else {
        return false;
    };
    let inherited = table
        .get("workspace")
        .and_then(Item::as_bool)
        .unwrap_or(false);
    if inherited {
        return false;
    }

    let Some(requirement) = table.get("version").and_then(Item::as_str) else {
        return false;
    };
    let requirement = bumped_requirement(requirement, new_version);
    table.insert("version", value(requirement));
    true
}

fn bumped_requirement(current: &str, new_version: &Version) -> String {
    let operator = REQUIREMENT_OPERATORS
        .iter()
        .find(|op| current.trim_start().starts_with(**op))
        .copied()
        .unwrap_or("");
    format!("{operator}{new_version}")
}
