use std::collections::HashSet;

use changeset_core::{BumpType, ChangeCategory, Changeset, WorkspaceGraph};
use indexmap::IndexMap;

use super::error::PlanError;

/// Bump strength per package. A package without an entry is at
/// [`BumpType::None`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpIntents(IndexMap<String, BumpType>);

impl BumpIntents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> BumpType {
        self.0.get(name).copied().unwrap_or_default()
    }

    /// Raises `name` to at least `bump_type`.
    ///
    /// Returns `true` if the stored intent changed.
    pub fn raise(&mut self, name: &str, bump_type: BumpType) -> bool {
        if bump_type <= self.get(name) {
            return false;
        }
        self.0.insert(name.to_string(), bump_type);
        true
    }

    /// Packages with an intent above `none`, in the order they were first raised.
    pub fn released(&self) -> impl Iterator<Item = (&str, BumpType)> {
        self.0
            .iter()
            .filter(|(_, bump)| bump.is_release())
            .map(|(name, bump)| (name.as_str(), *bump))
    }
}

impl<S: Into<String>> FromIterator<(S, BumpType)> for BumpIntents {
    fn from_iter<I: IntoIterator<Item = (S, BumpType)>>(iter: I) -> Self {
        let mut intents = Self::new();
        for (name, bump_type) in iter {
            intents.raise(&name.into(), bump_type);
        }
        intents
    }
}

/// A changeset summary that named a package directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectNote {
    pub summary: String,
    pub changeset_id: String,
    pub category: ChangeCategory,
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub intents: BumpIntents,
    /// Direct notes per package, in changeset order.
    pub notes: IndexMap<String, Vec<DirectNote>>,
    /// Changeset ids in processing order.
    pub consumed: Vec<String>,
}

impl Aggregation {
    #[must_use]
    pub fn notes_for(&self, name: &str) -> &[DirectNote] {
        self.notes.get(name).map_or(&[], Vec::as_slice)
    }
}

/// Folds `changesets` into per-package intents.
///
/// A `none` entry still counts as naming the package: its summary is kept and
/// shows up if the package ends up released for another reason.
///
/// # Errors
///
/// Returns [`PlanError::UnknownPackage`] if any changeset names a package that
/// is not in `graph`, and [`PlanError::DuplicateChangeset`] if two changesets
/// share an id. Nothing is returned for a failing input.
pub fn aggregate(graph: &WorkspaceGraph, changesets: &[Changeset]) -> Result<Aggregation, PlanError> {
    let mut seen_ids = HashSet::new();
    let mut aggregation = Aggregation::default();

    for changeset in changesets {
        if !seen_ids.insert(changeset.id.as_str()) {
            return Err(PlanError::DuplicateChangeset {
                id: changeset.id.clone(),
            });
        }

        if let Some(release) = changeset.releases.iter().find(|r| !graph.contains(&r.name)) {
            return Err(PlanError::UnknownPackage {
                changeset_id: changeset.id.clone(),
                package: release.name.clone(),
            });
        }

        for release in &changeset.releases {
            aggregation.intents.raise(&release.name, release.bump_type);

            let notes = aggregation.notes.entry(release.name.clone()).or_default();
            if !notes.iter().any(|n| n.changeset_id == changeset.id) {
                notes.push(DirectNote {
                    summary: changeset.summary.clone(),
                    changeset_id: changeset.id.clone(),
                    category: changeset.category,
                });
            }
        }

        aggregation.consumed.push(changeset.id.clone());
    }

    Ok(aggregation)
}
