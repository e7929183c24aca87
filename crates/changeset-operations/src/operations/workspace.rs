use std::path::{Path, PathBuf};

use changeset_core::{Changeset, WorkspaceGraph};
use changeset_project::{CargoProject, RootChangesetConfig};
use tracing::debug;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangesetReader, ProjectProvider};

/// Everything a planning run needs, read from disk up front.
pub(super) struct LoadedWorkspace {
    pub project: CargoProject,
    pub config: RootChangesetConfig,
    pub graph: WorkspaceGraph,
    pub changeset_files: Vec<PathBuf>,
    pub changesets: Vec<Changeset>,
}

/// # Errors
///
/// Returns an error if the project cannot be discovered, has no packages,
/// describes an invalid graph, or if any changeset cannot be read.
pub(super) fn load_workspace<P, R>(
    project_provider: &P,
    changeset_reader: &R,
    start_path: &Path,
) -> Result<LoadedWorkspace>
where
    P: ProjectProvider,
    R: ChangesetReader,
{
    let project = project_provider.discover_project(start_path)?;
    if project.packages.is_empty() {
        return Err(OperationError::EmptyProject(project.root));
    }

    let config = project_provider.load_config(&project)?;
    let graph = WorkspaceGraph::new(project.packages.iter().cloned(), config.linked())?;

    let changeset_dir = project.root.join(config.changeset_dir());
    let changeset_files = changeset_reader.list_changesets(&changeset_dir)?;
    let changesets = changeset_files
        .iter()
        .map(|path| changeset_reader.read_changeset(path))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        root = %project.root.display(),
        packages = graph.len(),
        linked_groups = graph.linked_groups().len(),
        changesets = changesets.len(),
        "loaded workspace"
    );

    Ok(LoadedWorkspace {
        project,
        config,
        graph,
        changeset_files,
        changesets,
    })
}
