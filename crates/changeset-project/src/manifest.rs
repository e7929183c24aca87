use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ProjectError;

pub(crate) type DependencyTable = IndexMap<String, DependencySpec>;

#[derive(Debug, Deserialize)]
pub(crate) struct CargoManifest {
    pub(crate) package: Option<Package>,
    pub(crate) workspace: Option<WorkspaceSection>,
    #[serde(default)]
    pub(crate) dependencies: DependencyTable,
    #[serde(default, rename = "build-dependencies")]
    pub(crate) build_dependencies: DependencyTable,
}

impl CargoManifest {
    /// Dependencies that ship with the package. Dev-dependencies are left out.
    pub(crate) fn release_dependencies(&self) -> impl Iterator<Item = (&String, &DependencySpec)> {
        self.dependencies.iter().chain(&self.build_dependencies)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Package {
    pub(crate) name: String,
    pub(crate) version: Option<VersionField>,
    pub(crate) metadata: Option<Metadata>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum VersionField {
    Literal(String),
    Inherited(InheritedField),
}

#[derive(Debug, Deserialize)]
pub(crate) struct InheritedField {
    pub(crate) workspace: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkspaceSection {
    pub(crate) members: Option<Vec<String>>,
    pub(crate) exclude: Option<Vec<String>>,
    pub(crate) package: Option<WorkspacePackage>,
    pub(crate) metadata: Option<Metadata>,
    #[serde(default)]
    pub(crate) dependencies: DependencyTable,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkspacePackage {
    pub(crate) version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DependencySpec {
    Requirement(String),
    Detailed(DetailedDependency),
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DetailedDependency {
    pub(crate) version: Option<String>,
    pub(crate) package: Option<String>,
    #[serde(default)]
    pub(crate) workspace: bool,
}

impl DependencySpec {
    pub(crate) fn detailed(&self) -> Option<&DetailedDependency> {
        match self {
            Self::Requirement(_) => None,
            Self::Detailed(detailed) => Some(detailed),
        }
    }

    pub(crate) fn requirement(&self) -> Option<&str> {
        match self {
            Self::Requirement(req) => Some(req),
            Self::Detailed(detailed) => detailed.version.as_deref(),
        }
    }

    /// Package name behind the dependency key, following `package = "..."` renames.
    pub(crate) fn package_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.detailed()
            .and_then(|d| d.package.as_deref())
            .unwrap_or(key)
    }

    pub(crate) fn is_inherited(&self) -> bool {
        self.detailed().is_some_and(|d| d.workspace)
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct Metadata {
    pub(crate) changeset: Option<ChangesetMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ChangelogValue {
    Enabled(bool),
    Generator(String),
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct ChangesetMetadata {
    pub(crate) commit: Option<bool>,
    pub(crate) tags: Option<bool>,
    pub(crate) keep_changesets: Option<bool>,
    pub(crate) commit_title_template: Option<String>,
    pub(crate) changeset_dir: Option<String>,
    pub(crate) changelog: Option<ChangelogValue>,
    #[serde(default)]
    pub(crate) linked: Vec<Vec<String>>,
}

pub(crate) fn read_manifest(path: &Path) -> Result<CargoManifest, ProjectError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| ProjectError::io(path, source))?;
    toml::from_str(&content).map_err(|source| ProjectError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
