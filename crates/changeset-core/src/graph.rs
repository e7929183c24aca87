use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::{GraphError, Result};
use crate::types::PackageInfo;

/// Packages that are always released with the same bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedGroup {
    members: Vec<String>,
}

impl LinkedGroup {
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }
}

/// Immutable view of the workspace for one planning run.
///
/// Construction checks that every internal dependency and every linked group
/// member refers to a known package, and that linked groups are disjoint.
/// Packages keep their declaration order.
#[derive(Debug, Clone)]
pub struct WorkspaceGraph {
    packages: IndexMap<String, PackageInfo>,
    linked: Vec<LinkedGroup>,
}

impl WorkspaceGraph {
    /// # Errors
    ///
    /// Returns a [`GraphError`] if a package is declared twice, a dependency or
    /// linked member is unknown, a linked group has fewer than two distinct
    /// members, or two linked groups share a package.
    pub fn new(
        packages: impl IntoIterator<Item = PackageInfo>,
        linked: &[Vec<String>],
    ) -> Result<Self> {
        let mut by_name = IndexMap::new();
        for package in packages {
            if by_name.contains_key(&package.name) {
                return Err(GraphError::DuplicatePackage { name: package.name });
            }
            by_name.insert(package.name.clone(), package);
        }

        for package in by_name.values() {
            if let Some(dependency) = package
                .dependencies
                .keys()
                .find(|dep| !by_name.contains_key(*dep))
            {
                return Err(GraphError::UnknownDependency {
                    package: package.name.clone(),
                    dependency: dependency.clone(),
                });
            }
        }

        let linked = build_linked_groups(&by_name, linked)?;

        Ok(Self {
            packages: by_name,
            linked,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    #[must_use]
    pub fn package(&self, name: &str) -> Option<&PackageInfo> {
        self.packages.get(name)
    }

    pub fn packages(&self) -> impl Iterator<Item = &PackageInfo> {
        self.packages.values()
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    #[must_use]
    pub fn linked_groups(&self) -> &[LinkedGroup] {
        &self.linked
    }

    #[must_use]
    pub fn linked_group_of(&self, name: &str) -> Option<&LinkedGroup> {
        self.linked.iter().find(|group| group.contains(name))
    }

    /// Internal dependencies of `name`, in declaration order.
    pub fn dependencies_of<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.packages
            .get(name)
            .into_iter()
            .flat_map(|pkg| pkg.dependencies.keys().map(String::as_str))
    }
}

fn build_linked_groups(
    packages: &IndexMap<String, PackageInfo>,
    declared: &[Vec<String>],
) -> Result<Vec<LinkedGroup>> {
    let mut claimed: HashSet<String> = HashSet::new();
    let mut groups = Vec::with_capacity(declared.len());

    for group in declared {
        let mut members: Vec<String> = Vec::with_capacity(group.len());
        for member in group {
            if !packages.contains_key(member) {
                return Err(GraphError::UnknownLinkedMember {
                    member: member.clone(),
                });
            }
            if !members.contains(member) {
                members.push(member.clone());
            }
        }

        if members.len() < 2 {
            return Err(GraphError::LinkedGroupTooSmall {
                members: group.clone(),
            });
        }

        for member in &members {
            if !claimed.insert(member.clone()) {
                return Err(GraphError::OverlappingLinkedGroups {
                    package: member.clone(),
                });
            }
        }

        groups.push(LinkedGroup { members });
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use semver::Version;

    use super::*;

    fn pkg(name: &str) -> PackageInfo {
        PackageInfo::new(name, Version::new(1, 0, 0), format!("/ws/crates/{name}"))
    }

    fn group(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn builds_graph_with_edges_and_groups() {
        let graph = WorkspaceGraph::new(
            vec![
                pkg("pkg-a"),
                pkg("pkg-b"),
                pkg("pkg-c").with_dependency("pkg-a", "^1.0"),
            ],
            &[group(&["pkg-a", "pkg-b"])],
        )
        .expect("valid graph");

        assert_eq!(graph.len(), 3);
        assert!(graph.contains("pkg-c"));
        assert_eq!(graph.dependencies_of("pkg-c").collect::<Vec<_>>(), ["pkg-a"]);
        assert_eq!(graph.dependencies_of("pkg-a").count(), 0);
        assert_eq!(graph.linked_groups().len(), 1);
        assert!(
            graph
                .linked_group_of("pkg-b")
                .is_some_and(|g| g.contains("pkg-a"))
        );
        assert!(graph.linked_group_of("pkg-c").is_none());
    }

    #[test]
    fn dependencies_of_unknown_package_is_empty() {
        let graph = WorkspaceGraph::new(vec![pkg("pkg-a")], &[]).expect("valid graph");

        assert_eq!(graph.dependencies_of("missing").count(), 0);
    }

    #[test]
    fn rejects_duplicate_package() {
        let err = WorkspaceGraph::new(vec![pkg("pkg-a"), pkg("pkg-a")], &[])
            .expect_err("duplicate should fail");

        assert_eq!(
            err,
            GraphError::DuplicatePackage {
                name: "pkg-a".to_string()
            }
        );
    }

    #[test]
    fn rejects_dependency_outside_workspace() {
        let err = WorkspaceGraph::new(vec![pkg("pkg-a").with_dependency("serde", "1")], &[])
            .expect_err("unknown dependency should fail");

        assert!(matches!(
            err,
            GraphError::UnknownDependency { ref package, ref dependency }
                if package == "pkg-a" && dependency == "serde"
        ));
    }

    #[test]
    fn rejects_unknown_linked_member() {
        let err = WorkspaceGraph::new(vec![pkg("pkg-a")], &[group(&["pkg-a", "ghost"])])
            .expect_err("unknown member should fail");

        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn rejects_group_with_single_distinct_member() {
        let err = WorkspaceGraph::new(
            vec![pkg("pkg-a"), pkg("pkg-b")],
            &[group(&["pkg-a", "pkg-a"])],
        )
        .expect_err("single member group should fail");

        assert!(matches!(err, GraphError::LinkedGroupTooSmall { .. }));
    }

    #[test]
    fn repeated_member_within_group_is_collapsed() {
        let graph = WorkspaceGraph::new(
            vec![pkg("pkg-a"), pkg("pkg-b")],
            &[group(&["pkg-a", "pkg-b", "pkg-a"])],
        )
        .expect("valid graph");

        assert_eq!(graph.linked_groups()[0].members(), ["pkg-a", "pkg-b"]);
    }

    #[test]
    fn rejects_overlapping_groups() {
        let err = WorkspaceGraph::new(
            vec![pkg("pkg-a"), pkg("pkg-b"), pkg("pkg-c")],
            &[group(&["pkg-a", "pkg-b"]), group(&["pkg-b", "pkg-c"])],
        )
        .expect_err("overlap should fail");

        assert_eq!(
            err,
            GraphError::OverlappingLinkedGroups {
                package: "pkg-b".to_string()
            }
        );
    }
}
