use std::path::{Path, PathBuf};

use crate::error::ProjectError;
use crate::manifest::{ChangelogValue, ChangesetMetadata, read_manifest};
use crate::project::{CargoProject, ProjectKind};

const DEFAULT_CHANGELOG_GENERATOR: &str = "default";
const DEFAULT_COMMIT_TITLE_TEMPLATE: &str = "{new-version}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitConfig {
    commit: bool,
    tags: bool,
    keep_changesets: bool,
    commit_title_template: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            commit: true,
            tags: true,
            keep_changesets: false,
            commit_title_template: String::from(DEFAULT_COMMIT_TITLE_TEMPLATE),
        }
    }
}

impl GitConfig {
    #[must_use]
    pub fn commit(&self) -> bool {
        self.commit
    }

    #[must_use]
    pub fn tags(&self) -> bool {
        self.tags
    }

    #[must_use]
    pub fn keep_changesets(&self) -> bool {
        self.keep_changesets
    }

    #[must_use]
    pub fn commit_title_template(&self) -> &str {
        &self.commit_title_template
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_commit(mut self, commit: bool) -> Self {
        self.commit = commit;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_tags(mut self, tags: bool) -> Self {
        self.tags = tags;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_keep_changesets(mut self, keep_changesets: bool) -> Self {
        self.keep_changesets = keep_changesets;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_title_template(mut self, template: impl Into<String>) -> Self {
        self.commit_title_template = template.into();
        self
    }
}

/// Which changelog consumer receives the planned entries, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangelogSetting {
    Disabled,
    Generator(String),
}

impl Default for ChangelogSetting {
    fn default() -> Self {
        Self::Generator(DEFAULT_CHANGELOG_GENERATOR.to_string())
    }
}

impl ChangelogSetting {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Generator(_))
    }

    #[must_use]
    pub fn generator(&self) -> Option<&str> {
        match self {
            Self::Disabled => None,
            Self::Generator(name) => Some(name.as_str()),
        }
    }
}

impl From<ChangelogValue> for ChangelogSetting {
    fn from(value: ChangelogValue) -> Self {
        match value {
            ChangelogValue::Enabled(false) => Self::Disabled,
            ChangelogValue::Enabled(true) => Self::default(),
            ChangelogValue::Generator(name) => Self::Generator(name),
        }
    }
}

/// Changeset configuration of a project.
///
/// Read from `[workspace.metadata.changeset]`, or from
/// `[package.metadata.changeset]` for single-package projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootChangesetConfig {
    changeset_dir: PathBuf,
    git_config: GitConfig,
    changelog: ChangelogSetting,
    linked: Vec<Vec<String>>,
}

impl Default for RootChangesetConfig {
    fn default() -> Self {
        Self {
            changeset_dir: PathBuf::from(crate::DEFAULT_CHANGESET_DIR),
            git_config: GitConfig::default(),
            changelog: ChangelogSetting::default(),
            linked: Vec::new(),
        }
    }
}

impl RootChangesetConfig {
    #[must_use]
    pub fn changeset_dir(&self) -> &Path {
        &self.changeset_dir
    }

    #[must_use]
    pub fn git_config(&self) -> &GitConfig {
        &self.git_config
    }

    #[must_use]
    pub fn changelog(&self) -> &ChangelogSetting {
        &self.changelog
    }

    /// Linked package groups as declared. Validation happens when the
    /// workspace graph is built.
    #[must_use]
    pub fn linked(&self) -> &[Vec<String>] {
        &self.linked
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_git_config(mut self, git_config: GitConfig) -> Self {
        self.git_config = git_config;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_changelog(mut self, changelog: ChangelogSetting) -> Self {
        self.changelog = changelog;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_linked(mut self, linked: Vec<Vec<String>>) -> Self {
        self.linked = linked;
        self
    }

    fn from_metadata(metadata: Option<ChangesetMetadata>) -> Self {
        let Some(metadata) = metadata else {
            return Self::default();
        };
        let defaults = GitConfig::default();

        Self {
            changeset_dir: metadata
                .changeset_dir
                .map_or_else(|| PathBuf::from(crate::DEFAULT_CHANGESET_DIR), PathBuf::from),
            git_config: GitConfig {
                commit: metadata.commit.unwrap_or(defaults.commit),
                tags: metadata.tags.unwrap_or(defaults.tags),
                keep_changesets: metadata.keep_changesets.unwrap_or(defaults.keep_changesets),
                commit_title_template: metadata
                    .commit_title_template
                    .unwrap_or(defaults.commit_title_template),
            },
            changelog: metadata.changelog.map(Into::into).unwrap_or_default(),
            linked: metadata.linked,
        }
    }
}

/// Parses the root changeset configuration based on project kind.
///
/// For single-package projects, reads from `[package.metadata.changeset]`.
/// For workspaces, reads from `[workspace.metadata.changeset]`.
///
/// # Errors
///
/// Returns an error if the root manifest cannot be read or parsed.
pub fn parse_root_config(project: &CargoProject) -> Result<RootChangesetConfig, ProjectError> {
    let manifest = read_manifest(&project.root.join("Cargo.toml"))?;

    let metadata = match project.kind {
        ProjectKind::SinglePackage => manifest
            .package
            .and_then(|pkg| pkg.metadata)
            .and_then(|meta| meta.changeset),
        ProjectKind::VirtualWorkspace | ProjectKind::WorkspaceWithRoot => manifest
            .workspace
            .and_then(|ws| ws.metadata)
            .and_then(|meta| meta.changeset),
    };

    Ok(RootChangesetConfig::from_metadata(metadata))
}
