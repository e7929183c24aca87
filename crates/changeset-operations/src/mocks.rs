use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use changeset_core::{BumpType, Changeset, PackageInfo};
use changeset_git::{CommitRef, TagRef};
use changeset_project::{CargoProject, ProjectKind, RootChangesetConfig};
use semver::Version;

use crate::{OperationError, Result};
use crate::planner::PlannedRelease;
use crate::traits::{
    ChangelogWriter, ChangesetReader, GitProvider, InheritedVersionChecker, ManifestWriter,
    ProjectProvider,
};

/// Append-only record of the calls a mock received.
pub struct CallLog<T>(Mutex<Vec<T>>);

impl<T: Clone> CallLog<T> {
    fn record(&self, call: T) {
        self.0.lock().expect("lock poisoned").push(call);
    }

    fn extend(&self, calls: impl IntoIterator<Item = T>) {
        self.0.lock().expect("lock poisoned").extend(calls);
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<T> {
        self.0.lock().expect("lock poisoned").clone()
    }
}

impl<T> Default for CallLog<T> {
    fn default() -> Self {
        Self(Mutex::new(Vec::new()))
    }
}

pub struct MockProjectProvider {
    project: CargoProject,
    root_config: RootChangesetConfig,
}

impl MockProjectProvider {
    #[must_use]
    pub fn new(project: CargoProject) -> Self {
        Self {
            project,
            root_config: RootChangesetConfig::default(),
        }
    }

    #[must_use]
    pub fn with_root_config(mut self, config: RootChangesetConfig) -> Self {
        self.root_config = config;
        self
    }

    /// Makes `package` depend on `dependency` with a caret requirement on its
    /// current version.
    ///
    /// # Panics
    ///
    /// Panics if either package is unknown.
    #[must_use]
    pub fn with_dependency(mut self, package: &str, dependency: &str) -> Self {
        let requirement = self
            .project
            .packages
            .iter()
            .find(|p| p.name == dependency)
            .map(|p| format!("^{}", p.version))
            .expect("dependency is a mock package");
        let pkg = self
            .project
            .packages
            .iter_mut()
            .find(|p| p.name == package)
            .expect("package is a mock package");
        pkg.dependencies.insert(dependency.to_string(), requirement);
        self
    }

    #[must_use]
    pub fn with_linked(mut self, groups: Vec<Vec<String>>) -> Self {
        self.root_config = self.root_config.with_linked(groups);
        self
    }

    /// # Panics
    ///
    /// Panics if the version string is not valid semver.
    #[must_use]
    pub fn single_package(name: &str, version: &str) -> Self {
        let root = PathBuf::from("/mock/project");
        let project = CargoProject {
            root: root.clone(),
            kind: ProjectKind::SinglePackage,
            packages: vec![PackageInfo::new(
                name,
                version.parse().expect("valid version"),
                root,
            )],
        };
        Self::new(project)
    }

    /// # Panics
    ///
    /// Panics if any version string is not valid semver.
    #[must_use]
    pub fn workspace(packages: Vec<(&str, &str)>) -> Self {
        let root = PathBuf::from("/mock/workspace");
        let packages = packages
            .into_iter()
            .map(|(name, version)| {
                PackageInfo::new(
                    name,
                    version.parse().expect("valid version"),
                    root.join("crates").join(name),
                )
            })
            .collect();

        let project = CargoProject {
            root,
            kind: ProjectKind::VirtualWorkspace,
            packages,
        };
        Self::new(project)
    }
}

impl ProjectProvider for MockProjectProvider {
    fn discover_project(&self, _start_path: &Path) -> Result<CargoProject> {
        Ok(self.project.clone())
    }

    fn load_config(&self, _project: &CargoProject) -> Result<RootChangesetConfig> {
        Ok(self.root_config.clone())
    }
}

pub struct MockChangesetReader {
    changesets: HashMap<PathBuf, Changeset>,
    listed_files: Vec<PathBuf>,
}

impl MockChangesetReader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            changesets: HashMap::new(),
            listed_files: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_changeset(mut self, path: PathBuf, changeset: Changeset) -> Self {
        self.listed_files.push(path.clone());
        self.changesets.insert(path, changeset);
        self
    }

    #[must_use]
    pub fn with_changesets(self, changesets: Vec<(PathBuf, Changeset)>) -> Self {
        changesets
            .into_iter()
            .fold(self, |reader, (path, changeset)| {
                reader.with_changeset(path, changeset)
            })
    }
}

impl Default for MockChangesetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangesetReader for MockChangesetReader {
    fn read_changeset(&self, path: &Path) -> Result<Changeset> {
        self.changesets.get(path).cloned().ok_or_else(|| {
            OperationError::ChangesetFileRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock file not found"),
            }
        })
    }

    fn list_changesets(&self, _changeset_dir: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.listed_files.clone())
    }
}

#[derive(Default)]
pub struct MockGitProvider {
    dirty: bool,
    commit_fails: bool,
    existing_tags: HashSet<String>,
    staged: CallLog<PathBuf>,
    commits: CallLog<String>,
    tags: CallLog<(String, String)>,
    deleted: CallLog<PathBuf>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_clean(mut self, clean: bool) -> Self {
        self.dirty = !clean;
        self
    }

    /// Makes every `commit` call fail.
    #[must_use]
    pub fn failing_commit(mut self) -> Self {
        self.commit_fails = true;
        self
    }

    #[must_use]
    pub fn with_existing_tag(mut self, name: &str) -> Self {
        self.existing_tags.insert(name.to_string());
        self
    }

    #[must_use]
    pub fn staged_files(&self) -> Vec<PathBuf> {
        self.staged.calls()
    }

    #[must_use]
    pub fn commits(&self) -> Vec<String> {
        self.commits.calls()
    }

    #[must_use]
    pub fn tags_created(&self) -> Vec<(String, String)> {
        self.tags.calls()
    }

    #[must_use]
    pub fn deleted_files(&self) -> Vec<PathBuf> {
        self.deleted.calls()
    }
}

impl GitProvider for MockGitProvider {
    fn is_working_tree_clean(&self, _project_root: &Path) -> Result<bool> {
        Ok(!self.dirty)
    }

    fn tag_exists(&self, _project_root: &Path, tag_name: &str) -> Result<bool> {
        Ok(self.existing_tags.contains(tag_name))
    }

    fn stage_files(&self, _project_root: &Path, paths: &[&Path]) -> Result<()> {
        self.staged.extend(paths.iter().map(|p| p.to_path_buf()));
        Ok(())
    }

    fn commit(&self, _project_root: &Path, message: &str) -> Result<CommitRef> {
        if self.commit_fails {
            return Err(OperationError::Io(std::io::Error::other("no signature configured")));
        }
        self.commits.record(message.to_string());
        Ok(CommitRef {
            oid: format!("{:040x}", self.commits.calls().len()),
            title: message.lines().next().unwrap_or_default().to_string(),
        })
    }

    fn create_tag(&self, _project_root: &Path, tag_name: &str, message: &str) -> Result<TagRef> {
        self.tags.record((tag_name.to_string(), message.to_string()));
        Ok(TagRef {
            name: tag_name.to_string(),
            target: format!("{:040x}", self.commits.calls().len()),
        })
    }

    fn delete_files(&self, _project_root: &Path, paths: &[&Path]) -> Result<()> {
        self.deleted.extend(paths.iter().map(|p| p.to_path_buf()));
        Ok(())
    }
}

#[must_use]
pub fn make_changeset(id: &str, package_name: &str, bump: BumpType, summary: &str) -> Changeset {
    Changeset::new(id, summary).with_release(package_name, bump)
}

#[derive(Default)]
pub struct MockManifestWriter {
    written: CallLog<(PathBuf, Version)>,
    requirement_updates: CallLog<(PathBuf, String, Version)>,
    inherited_paths: HashSet<PathBuf>,
    requirements: HashSet<(PathBuf, String)>,
}

impl MockManifestWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_inherited(mut self, paths: Vec<PathBuf>) -> Self {
        self.inherited_paths = paths.into_iter().collect();
        self
    }

    /// Declares that `manifest_path` holds a requirement on `package`.
    #[must_use]
    pub fn with_requirement(mut self, manifest_path: PathBuf, package: &str) -> Self {
        self.requirements
            .insert((manifest_path, package.to_string()));
        self
    }

    #[must_use]
    pub fn written_versions(&self) -> Vec<(PathBuf, Version)> {
        self.written.calls()
    }

    #[must_use]
    pub fn updated_requirements(&self) -> Vec<(PathBuf, String, Version)> {
        self.requirement_updates.calls()
    }
}

impl InheritedVersionChecker for MockManifestWriter {
    fn has_inherited_version(&self, manifest_path: &Path) -> Result<bool> {
        Ok(self.inherited_paths.contains(manifest_path))
    }
}

impl ManifestWriter for MockManifestWriter {
    fn write_version(&self, manifest_path: &Path, new_version: &Version) -> Result<()> {
        self.written
            .record((manifest_path.to_path_buf(), new_version.clone()));
        Ok(())
    }

    fn verify_version(&self, _manifest_path: &Path, _expected: &Version) -> Result<()> {
        Ok(())
    }

    fn update_dependency_requirement(
        &self,
        manifest_path: &Path,
        package: &str,
        new_version: &Version,
    ) -> Result<bool> {
        let key = (manifest_path.to_path_buf(), package.to_string());
        if !self.requirements.contains(&key) {
            return Ok(false);
        }
        self.requirement_updates
            .record((key.0, key.1, new_version.clone()));
        Ok(true)
    }
}

/// Records every release it receives and reports `CHANGELOG.md` in the
/// package directory as written.
#[derive(Default)]
pub struct MockChangelogWriter {
    written: CallLog<(String, PathBuf, PlannedRelease)>,
}

impl MockChangelogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn written_releases(&self) -> Vec<(String, PathBuf, PlannedRelease)> {
        self.written.calls()
    }
}

impl ChangelogWriter for MockChangelogWriter {
    fn write_release(
        &self,
        generator: &str,
        package_dir: &Path,
        release: &PlannedRelease,
    ) -> Result<Option<PathBuf>> {
        self.written.record((
            generator.to_string(),
            package_dir.to_path_buf(),
            release.clone(),
        ));
        Ok(Some(package_dir.join("CHANGELOG.md")))
    }
}
