use std::path::{Path, PathBuf};

use changeset_core::WorkspaceGraph;
use changeset_git::{CommitRef, TagRef};
use changeset_project::{CargoProject, ChangelogSetting, GitConfig, ProjectKind};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

use super::workspace::load_workspace;
use crate::Result;
use crate::error::OperationError;
use crate::planner::{PlannedRelease, ReleasePlan, resolve};
use crate::traits::{
    ChangelogWriter, ChangesetReader, GitProvider, ManifestWriter, ProjectProvider,
};

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseInput {
    pub dry_run: bool,
    pub no_commit: bool,
    pub no_tags: bool,
    pub keep_changesets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTag {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct GitOperationResult {
    pub commit: Option<CommitRef>,
    pub tags_created: Vec<TagRef>,
    pub changesets_deleted: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ReleaseOutput {
    pub plan: ReleasePlan,
    pub changesets_consumed: Vec<PathBuf>,
    pub planned_tags: Vec<PlannedTag>,
    pub manifests_updated: Vec<PathBuf>,
    pub changelogs_written: Vec<PathBuf>,
    pub git_result: Option<GitOperationResult>,
}

#[derive(Debug)]
pub enum ReleaseOutcome {
    DryRun(ReleaseOutput),
    Executed(ReleaseOutput),
    NoChangesets,
}

/// Git behavior after combining [`ReleaseInput`] with configuration. Tags
/// are only created on top of a release commit.
#[derive(Debug, Clone, Copy)]
struct GitPolicy {
    commit: bool,
    tags: bool,
    delete_changesets: bool,
}

impl GitPolicy {
    fn new(config: &GitConfig, input: &ReleaseInput) -> Self {
        let commit = !input.no_commit && config.commit();
        Self {
            commit,
            tags: commit && !input.no_tags && config.tags(),
            delete_changesets: !input.keep_changesets && !config.keep_changesets(),
        }
    }
}

/// Resolves pending changesets and applies the resulting plan.
///
/// The plan is computed and every precondition is checked before the first
/// write. Writes then happen in a fixed order: manifests, changelogs,
/// changeset removal, staging, commit, tags.
pub struct ReleaseOperation<P, R, M, C, G> {
    project_provider: P,
    changeset_reader: R,
    manifest_writer: M,
    changelog_writer: C,
    git_provider: G,
}

impl<P, R, M, C, G> ReleaseOperation<P, R, M, C, G>
where
    P: ProjectProvider,
    R: ChangesetReader,
    M: ManifestWriter,
    C: ChangelogWriter,
    G: GitProvider,
{
    pub fn new(
        project_provider: P,
        changeset_reader: R,
        manifest_writer: M,
        changelog_writer: C,
        git_provider: G,
    ) -> Self {
        Self {
            project_provider,
            changeset_reader,
            manifest_writer,
            changelog_writer,
            git_provider,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the workspace or its changesets cannot be loaded,
    /// if the changesets do not resolve, if a precondition fails (inherited
    /// versions, dirty working tree, existing tag), or if any write fails.
    /// An empty plan is [`ReleaseOutcome::NoChangesets`], not an error.
    ///
    /// Failures after validation are not rolled back. Manifests and
    /// changelogs already written stay on disk, and consumed changesets stay
    /// deleted when the commit or a tag fails. Recovering the working tree
    /// is up to the caller.
    pub fn execute(&self, start_path: &Path, input: &ReleaseInput) -> Result<ReleaseOutcome> {
        let workspace =
            load_workspace(&self.project_provider, &self.changeset_reader, start_path)?;
        let plan = resolve(&workspace.graph, &workspace.changesets)?;

        if plan.is_empty() {
            warn!("no unreleased changesets found");
            return Ok(ReleaseOutcome::NoChangesets);
        }

        let git_config = workspace.config.git_config();
        let policy = GitPolicy::new(git_config, input);
        let planned_tags = if policy.tags {
            plan_tags(workspace.project.kind, plan.releases())
        } else {
            Vec::new()
        };

        let mut output = ReleaseOutput {
            plan,
            changesets_consumed: workspace.changeset_files,
            planned_tags,
            manifests_updated: Vec::new(),
            changelogs_written: Vec::new(),
            git_result: None,
        };

        if input.dry_run {
            return Ok(ReleaseOutcome::DryRun(output));
        }

        self.validate(&workspace.project.root, &workspace.graph, &output, policy)?;

        output.manifests_updated =
            self.write_manifests(&workspace.project, &workspace.graph, &output.plan)?;
        output.changelogs_written = self.write_changelogs(
            &workspace.graph,
            workspace.config.changelog(),
            &output.plan,
        )?;
        output.git_result = Some(self.perform_git_operations(
            &workspace.project.root,
            git_config,
            policy,
            &output,
        )?);

        info!(
            packages = output.plan.len(),
            changesets = output.changesets_consumed.len(),
            "release applied"
        );

        Ok(ReleaseOutcome::Executed(output))
    }

    fn validate(
        &self,
        project_root: &Path,
        graph: &WorkspaceGraph,
        output: &ReleaseOutput,
        policy: GitPolicy,
    ) -> Result<()> {
        let released = output
            .plan
            .releases()
            .iter()
            .filter_map(|release| graph.package(&release.name));
        let inherited = self
            .manifest_writer
            .find_packages_with_inherited_versions(released)?;
        if !inherited.is_empty() {
            return Err(OperationError::InheritedVersions {
                packages: inherited,
            });
        }

        if policy.commit && !self.git_provider.is_working_tree_clean(project_root)? {
            return Err(OperationError::DirtyWorkingTree);
        }

        for tag in &output.planned_tags {
            if self.git_provider.tag_exists(project_root, &tag.name)? {
                return Err(OperationError::TagExists {
                    name: tag.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Writes new versions, then points every internal requirement on a
    /// released package at its new version.
    fn write_manifests(
        &self,
        project: &CargoProject,
        graph: &WorkspaceGraph,
        plan: &ReleasePlan,
    ) -> Result<Vec<PathBuf>> {
        let mut updated = IndexSet::new();

        for release in plan.releases() {
            let Some(package) = graph.package(&release.name) else {
                continue;
            };
            let manifest_path = package.manifest_path();
            self.manifest_writer
                .write_version(&manifest_path, &release.new_version)?;
            self.manifest_writer
                .verify_version(&manifest_path, &release.new_version)?;
            debug!(
                manifest = %manifest_path.display(),
                old = %release.current_version,
                new = %release.new_version,
                "updated manifest version"
            );
            updated.insert(manifest_path);
        }

        let mut candidates: IndexSet<PathBuf> =
            graph.packages().map(|pkg| pkg.manifest_path()).collect();
        if project.is_workspace() {
            candidates.insert(project.root.join("Cargo.toml"));
        }

        for manifest_path in candidates {
            for release in plan.releases() {
                let changed = self.manifest_writer.update_dependency_requirement(
                    &manifest_path,
                    &release.name,
                    &release.new_version,
                )?;
                if changed {
                    debug!(
                        manifest = %manifest_path.display(),
                        dependency = %release.name,
                        version = %release.new_version,
                        "updated dependency requirement"
                    );
                    updated.insert(manifest_path.clone());
                }
            }
        }

        Ok(updated.into_iter().collect())
    }

    fn write_changelogs(
        &self,
        graph: &WorkspaceGraph,
        setting: &ChangelogSetting,
        plan: &ReleasePlan,
    ) -> Result<Vec<PathBuf>> {
        let Some(generator) = setting.generator() else {
            debug!("changelog generation disabled");
            return Ok(Vec::new());
        };

        let mut written = Vec::new();
        for release in plan.releases() {
            let Some(package) = graph.package(&release.name) else {
                continue;
            };
            if let Some(path) =
                self.changelog_writer
                    .write_release(generator, &package.path, release)?
            {
                debug!(
                    package = %release.name,
                    path = %path.display(),
                    "wrote changelog"
                );
                written.push(path);
            }
        }

        Ok(written)
    }

    fn perform_git_operations(
        &self,
        project_root: &Path,
        git_config: &GitConfig,
        policy: GitPolicy,
        output: &ReleaseOutput,
    ) -> Result<GitOperationResult> {
        let mut result = GitOperationResult::default();

        if policy.delete_changesets && !output.changesets_consumed.is_empty() {
            let paths: Vec<&Path> = output
                .changesets_consumed
                .iter()
                .map(AsRef::as_ref)
                .collect();
            self.git_provider.delete_files(project_root, &paths)?;
            result
                .changesets_deleted
                .clone_from(&output.changesets_consumed);
        }

        if !policy.commit {
            return Ok(result);
        }

        let files_to_stage = collect_files_to_stage(output, &result.changesets_deleted);
        let file_refs: Vec<&Path> = files_to_stage.iter().map(AsRef::as_ref).collect();
        self.git_provider.stage_files(project_root, &file_refs)?;

        let message = build_commit_message(output.plan.releases(), git_config);
        let commit = self.git_provider.commit(project_root, &message)?;
        info!(oid = %commit.oid, title = %commit.title, "created release commit");
        result.commit = Some(commit);

        for tag in &output.planned_tags {
            let tag_info = self
                .git_provider
                .create_tag(project_root, &tag.name, &tag.message)?;
            debug!(tag = %tag_info.name, "created tag");
            result.tags_created.push(tag_info);
        }

        Ok(result)
    }
}

fn plan_tags(kind: ProjectKind, releases: &[PlannedRelease]) -> Vec<PlannedTag> {
    releases
        .iter()
        .map(|release| {
            let name = match kind {
                ProjectKind::SinglePackage => format!("v{}", release.new_version),
                ProjectKind::VirtualWorkspace | ProjectKind::WorkspaceWithRoot => {
                    format!("{}-v{}", release.name, release.new_version)
                }
            };
            PlannedTag {
                name,
                message: format!("Release {} v{}", release.name, release.new_version),
            }
        })
        .collect()
}

fn collect_files_to_stage(output: &ReleaseOutput, changesets_deleted: &[PathBuf]) -> Vec<PathBuf> {
    output
        .manifests_updated
        .iter()
        .chain(&output.changelogs_written)
        .chain(changesets_deleted)
        .cloned()
        .collect()
}

fn build_commit_message(releases: &[PlannedRelease], git_config: &GitConfig) -> String {
    let new_version = releases
        .iter()
        .map(|r| format!("{}-v{}", r.name, r.new_version))
        .collect::<Vec<_>>()
        .join(", ");

    let title = git_config
        .commit_title_template()
        .replace("{new-version}", &new_version);

    let body: Vec<String> = releases
        .iter()
        .map(|r| format!("- {} {} -> {}", r.name, r.current_version, r.new_version))
        .collect();

    format!("{title}\n\n{}", body.join("\n"))
}
