use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use semver::Version;
use serde::{Deserialize, Serialize};

/// Strength of a version bump.
///
/// Variants are ordered `None < Patch < Minor < Major`, so combining two
/// intents is `Ord::max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpType {
    /// Number of distinct bump strengths.
    pub const LEVELS: usize = 4;

    #[must_use]
    pub fn is_release(self) -> bool {
        self > Self::None
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{s}")
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Added,
    #[default]
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deprecated => "Deprecated",
            Self::Removed => "Removed",
            Self::Fixed => "Fixed",
            Self::Security => "Security",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRelease {
    pub name: String,
    pub bump_type: BumpType,
}

/// A single human-authored change record.
///
/// The `id` is assigned by whoever read the record (the file stem for
/// changesets stored on disk) and must be unique within one release run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub id: String,
    pub summary: String,
    pub releases: Vec<PackageRelease>,
    #[serde(default)]
    pub category: ChangeCategory,
}

impl Changeset {
    #[must_use]
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            releases: Vec::new(),
            category: ChangeCategory::default(),
        }
    }

    #[must_use]
    pub fn with_release(mut self, name: impl Into<String>, bump_type: BumpType) -> Self {
        self.releases.push(PackageRelease {
            name: name.into(),
            bump_type,
        });
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: ChangeCategory) -> Self {
        self.category = category;
        self
    }

    /// Returns true if this changeset lists `name` among its releases.
    #[must_use]
    pub fn names(&self, name: &str) -> bool {
        self.releases.iter().any(|r| r.name == name)
    }
}

/// A workspace package as seen by the release planner.
///
/// `dependencies` holds only workspace-local edges, keyed by the dependency's
/// package name, with the declared requirement as value. Requirements are
/// carried for reporting; they are never evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: Version,
    pub path: PathBuf,
    pub dependencies: IndexMap<String, String>,
}

impl PackageInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            version,
            path: path.into(),
            dependencies: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_dependency(
        mut self,
        name: impl Into<String>,
        requirement: impl Into<String>,
    ) -> Self {
        self.dependencies.insert(name.into(), requirement.into());
        self
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join("Cargo.toml")
    }
}
