use changeset_core::{ChangeCategory, Changeset, WorkspaceGraph};
use indexmap::IndexMap;
use semver::Version;
use serde::Serialize;

use super::intent::{BumpIntents, DirectNote};

/// One line of a package's release notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChangelogEntry {
    /// A changeset summary that named the package.
    Direct {
        summary: String,
        changeset_id: String,
        category: ChangeCategory,
    },
    /// An internal dependency that is released alongside the package.
    Dependency { package: String, version: Version },
    /// A linked group member whose changeset pulled this package along.
    Linked { package: String, version: Version },
}

impl From<&DirectNote> for ChangelogEntry {
    fn from(note: &DirectNote) -> Self {
        Self::Direct {
            summary: note.summary.clone(),
            changeset_id: note.changeset_id.clone(),
            category: note.category,
        }
    }
}

/// Builds the entries for `package` once every final version is known.
///
/// Direct entries come first in changeset order. A released dependency gets a
/// dependency entry unless some changeset named both packages, in which case
/// its summary already covers the change. Linked group members that carry the
/// group's release get a linked entry under the same rule, unless they are
/// already listed as a dependency. Both kinds are sorted by name, dependency
/// entries first.
pub(super) fn build_entries(
    graph: &WorkspaceGraph,
    changesets: &[Changeset],
    package: &str,
    notes: &[DirectNote],
    direct: &BumpIntents,
    new_versions: &IndexMap<String, Version>,
) -> Vec<ChangelogEntry> {
    let released_upstream = |upstream: &str| {
        if upstream == package || named_together(changesets, package, upstream) {
            return None;
        }
        new_versions
            .get(upstream)
            .map(|version| (upstream.to_string(), version.clone()))
    };

    let mut dependency_entries: Vec<_> = graph
        .dependencies_of(package)
        .filter_map(&released_upstream)
        .collect();
    dependency_entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut linked_entries: Vec<_> = group_carriers(graph, package, direct, new_versions)
        .into_iter()
        .filter(|member| !dependency_entries.iter().any(|(dep, _)| dep == member))
        .filter_map(released_upstream)
        .collect();
    linked_entries.sort_by(|a, b| a.0.cmp(&b.0));

    notes
        .iter()
        .map(ChangelogEntry::from)
        .chain(
            dependency_entries
                .into_iter()
                .map(|(package, version)| ChangelogEntry::Dependency { package, version }),
        )
        .chain(
            linked_entries
                .into_iter()
                .map(|(package, version)| ChangelogEntry::Linked { package, version }),
        )
        .collect()
}

/// Members of `package`'s linked group whose own release drove the group.
///
/// Members a changeset asked to bump win. Without any, the group was raised by
/// propagation, so the members with a released dependency carry it.
fn group_carriers<'a>(
    graph: &'a WorkspaceGraph,
    package: &str,
    direct: &BumpIntents,
    new_versions: &IndexMap<String, Version>,
) -> Vec<&'a str> {
    let Some(group) = graph.linked_group_of(package) else {
        return Vec::new();
    };

    let requested: Vec<_> = group
        .members()
        .iter()
        .map(String::as_str)
        .filter(|member| direct.get(member).is_release())
        .collect();
    if !requested.is_empty() {
        return requested;
    }

    group
        .members()
        .iter()
        .map(String::as_str)
        .filter(|member| {
            graph
                .dependencies_of(member)
                .any(|dep| new_versions.contains_key(dep))
        })
        .collect()
}

fn named_together(changesets: &[Changeset], package: &str, upstream: &str) -> bool {
    changesets
        .iter()
        .any(|cs| cs.names(package) && cs.names(upstream))
}
