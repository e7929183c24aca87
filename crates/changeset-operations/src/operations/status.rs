use std::path::Path;

use changeset_core::Changeset;

use super::workspace::load_workspace;
use crate::Result;
use crate::planner::{ReleasePlan, resolve};
use crate::traits::{ChangesetReader, ProjectProvider};

#[derive(Debug)]
pub struct StatusOutput {
    pub changesets: Vec<Changeset>,
    pub plan: ReleasePlan,
    /// Packages the plan leaves alone, in discovery order.
    pub unchanged_packages: Vec<String>,
}

/// Resolves the pending changesets without touching anything.
pub struct StatusOperation<P, R> {
    project_provider: P,
    changeset_reader: R,
}

impl<P, R> StatusOperation<P, R>
where
    P: ProjectProvider,
    R: ChangesetReader,
{
    pub fn new(project_provider: P, changeset_reader: R) -> Self {
        Self {
            project_provider,
            changeset_reader,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the project cannot be discovered, if changeset files
    /// cannot be read, or if the changesets cannot be resolved.
    pub fn execute(&self, start_path: &Path) -> Result<StatusOutput> {
        let workspace =
            load_workspace(&self.project_provider, &self.changeset_reader, start_path)?;
        let plan = resolve(&workspace.graph, &workspace.changesets)?;

        let unchanged_packages = workspace
            .graph
            .package_names()
            .filter(|name| plan.release(name).is_none())
            .map(ToString::to_string)
            .collect();

        Ok(StatusOutput {
            changesets: workspace.changesets,
            plan,
            unchanged_packages,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use changeset_core::BumpType;

    use super::*;
    use crate::OperationError;
    use crate::mocks::{MockChangesetReader, MockProjectProvider, make_changeset};
    use crate::planner::{PlanError, ReleaseKind};

    #[test]
    fn returns_empty_plan_when_no_changesets() {
        let project_provider = MockProjectProvider::single_package("my-crate", "1.0.0");
        let changeset_reader = MockChangesetReader::new();

        let operation = StatusOperation::new(project_provider, changeset_reader);

        let result = operation
            .execute(Path::new("/any"))
            .expect("StatusOperation failed for project with no changesets");

        assert!(result.changesets.is_empty());
        assert!(result.plan.is_empty());
        assert_eq!(result.unchanged_packages, ["my-crate"]);
    }

    #[test]
    fn takes_maximum_bump_from_multiple_changesets() {
        let project_provider = MockProjectProvider::single_package("my-crate", "1.0.0");
        let changeset_reader = MockChangesetReader::new().with_changesets(vec![
            (
                PathBuf::from(".changeset/fix.md"),
                make_changeset("fix", "my-crate", BumpType::Patch, "Fix bug"),
            ),
            (
                PathBuf::from(".changeset/feature.md"),
                make_changeset("feature", "my-crate", BumpType::Minor, "Add feature"),
            ),
        ]);

        let operation = StatusOperation::new(project_provider, changeset_reader);

        let result = operation
            .execute(Path::new("/any"))
            .expect("StatusOperation failed to aggregate multiple changesets");

        assert_eq!(result.changesets.len(), 2);
        let release = result.plan.release("my-crate").expect("my-crate planned");
        assert_eq!(release.bump_type, BumpType::Minor);
        assert_eq!(release.new_version.to_string(), "1.1.0");
        assert_eq!(release.changelog.len(), 2);
    }

    #[test]
    fn reports_propagated_and_unchanged_packages() {
        let project_provider = MockProjectProvider::workspace(vec![
            ("crate-a", "1.0.0"),
            ("crate-b", "2.0.0"),
            ("crate-c", "0.3.0"),
        ])
        .with_dependency("crate-b", "crate-a");
        let changeset_reader = MockChangesetReader::new().with_changeset(
            PathBuf::from(".changeset/a.md"),
            make_changeset("a", "crate-a", BumpType::Major, "Breaking"),
        );

        let operation = StatusOperation::new(project_provider, changeset_reader);

        let result = operation.execute(Path::new("/any")).expect("status");

        let b = result.plan.release("crate-b").expect("crate-b planned");
        assert_eq!(b.kind, ReleaseKind::Propagated);
        assert_eq!(b.new_version.to_string(), "2.0.1");
        assert_eq!(result.unchanged_packages, ["crate-c"]);
    }

    #[test]
    fn unknown_package_is_an_error() {
        let project_provider = MockProjectProvider::single_package("my-crate", "1.0.0");
        let changeset_reader = MockChangesetReader::new().with_changeset(
            PathBuf::from(".changeset/typo.md"),
            make_changeset("typo", "my-crat", BumpType::Patch, "Fix"),
        );

        let operation = StatusOperation::new(project_provider, changeset_reader);

        let err = operation
            .execute(Path::new("/any"))
            .expect_err("should fail");

        assert!(matches!(
            err,
            OperationError::Plan(PlanError::UnknownPackage { ref package, .. }) if package == "my-crat"
        ));
    }

    #[test]
    fn invalid_linked_group_is_rejected() {
        let project_provider = MockProjectProvider::workspace(vec![("crate-a", "1.0.0")])
            .with_linked(vec![vec!["crate-a".to_string(), "crate-x".to_string()]]);

        let operation = StatusOperation::new(project_provider, MockChangesetReader::new());

        let err = operation.execute(Path::new("/any")).expect_err("should fail");

        assert!(matches!(err, OperationError::Graph(_)));
    }
}
