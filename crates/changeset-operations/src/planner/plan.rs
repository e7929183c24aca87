use changeset_core::{BumpType, Changeset, WorkspaceGraph};
use changeset_version::{VersionError, bump_version};
use indexmap::IndexMap;
use semver::Version;
use serde::Serialize;
use tracing::debug;

use super::changelog::{ChangelogEntry, build_entries};
use super::error::{InvariantViolation, PlanError};
use super::intent::{Aggregation, BumpIntents};

/// Why a package is part of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseKind {
    /// A changeset asked for a bump.
    Direct,
    /// Pulled in by a dependency or a linked group.
    Propagated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRelease {
    pub name: String,
    pub current_version: Version,
    pub new_version: Version,
    pub bump_type: BumpType,
    pub kind: ReleaseKind,
    pub changelog: Vec<ChangelogEntry>,
}

/// The outcome of one resolution run.
///
/// Releases are sorted by package name. Packages that are not released do not
/// appear at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleasePlan {
    releases: Vec<PlannedRelease>,
    consumed_changesets: Vec<String>,
}

impl ReleasePlan {
    #[must_use]
    pub fn releases(&self) -> &[PlannedRelease] {
        &self.releases
    }

    #[must_use]
    pub fn release(&self, name: &str) -> Option<&PlannedRelease> {
        self.releases.iter().find(|r| r.name == name)
    }

    /// Changeset ids folded into this plan, in processing order.
    #[must_use]
    pub fn consumed_changesets(&self) -> &[String] {
        &self.consumed_changesets
    }

    /// True when nothing is released.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub(super) fn assemble(
        graph: &WorkspaceGraph,
        changesets: &[Changeset],
        aggregation: &Aggregation,
        resolved: &BumpIntents,
    ) -> Result<Self, PlanError> {
        let mut new_versions = IndexMap::new();
        for package in graph.packages() {
            let bump_type = resolved.get(&package.name);
            if !bump_type.is_release() {
                continue;
            }
            let new_version =
                bump_version(&package.version, bump_type).map_err(|source| match source {
                    VersionError::NoBump { .. } => PlanError::from(InvariantViolation::NoBump {
                        package: package.name.clone(),
                    }),
                    VersionError::Overflow { .. } => PlanError::VersionOverflow {
                        package: package.name.clone(),
                        source,
                    },
                })?;
            new_versions.insert(package.name.clone(), new_version);
        }

        let mut releases = Vec::with_capacity(new_versions.len());
        for (name, new_version) in &new_versions {
            let Some(package) = graph.package(name) else {
                continue;
            };
            let bump_type = resolved.get(name);
            let kind = if aggregation.intents.get(name).is_release() {
                ReleaseKind::Direct
            } else {
                ReleaseKind::Propagated
            };
            let changelog = build_entries(
                graph,
                changesets,
                name,
                aggregation.notes_for(name),
                &aggregation.intents,
                &new_versions,
            );

            debug!(
                package = %name,
                bump = %bump_type,
                old = %package.version,
                new = %new_version,
                ?kind,
                "planned release"
            );

            releases.push(PlannedRelease {
                name: name.clone(),
                current_version: package.version.clone(),
                new_version: new_version.clone(),
                bump_type,
                kind,
                changelog,
            });
        }
        releases.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            releases,
            consumed_changesets: aggregation.consumed.clone(),
        })
    }
}
