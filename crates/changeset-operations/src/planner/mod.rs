//! Release plan resolution.
//!
//! [`resolve`] is a pure function: changesets are folded into bump intents,
//! intents are pushed through linked groups and internal dependency edges
//! until nothing changes, and the result is frozen into a [`ReleasePlan`]
//! with final versions and changelog entries. Nothing here touches the file
//! system.

mod changelog;
mod error;
mod intent;
mod linked;
mod plan;
mod propagation;

use changeset_core::{Changeset, WorkspaceGraph};

pub use changelog::ChangelogEntry;
pub use error::{InvariantViolation, PlanError};
pub use intent::{Aggregation, BumpIntents, DirectNote, aggregate};
pub use linked::normalize_linked;
pub use plan::{PlannedRelease, ReleaseKind, ReleasePlan};
pub use propagation::propagate;

/// Resolves `changesets` against `graph` into a release plan.
///
/// # Errors
///
/// Returns [`PlanError::UnknownPackage`] or [`PlanError::DuplicateChangeset`]
/// for invalid input, and [`PlanError::InvariantViolation`] if the planner
/// itself misbehaves. An input without releases yields an empty plan, not an
/// error.
pub fn resolve(graph: &WorkspaceGraph, changesets: &[Changeset]) -> Result<ReleasePlan, PlanError> {
    let aggregation = aggregate(graph, changesets)?;
    let resolved = propagate(graph, &aggregation.intents)?;
    ReleasePlan::assemble(graph, changesets, &aggregation, &resolved)
}
