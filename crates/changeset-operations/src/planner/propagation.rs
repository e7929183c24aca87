use changeset_core::{BumpType, WorkspaceGraph};
use tracing::debug;

use super::error::InvariantViolation;
use super::intent::BumpIntents;
use super::linked::normalize_linked;

/// Re-releases dependents of released packages until nothing changes.
///
/// Each round raises every package that has a released internal dependency to
/// at least `patch`, judged against the previous round's intents, and then
/// re-normalizes linked groups. Intents only grow over a four-level lattice,
/// so convergence takes at most `packages × 4` rounds; dependency cycles need
/// no special handling.
///
/// # Errors
///
/// Returns [`InvariantViolation::PropagationDidNotConverge`] if the round
/// limit is exceeded.
pub fn propagate(
    graph: &WorkspaceGraph,
    intents: &BumpIntents,
) -> Result<BumpIntents, InvariantViolation> {
    propagate_within(graph, intents, graph.len() * BumpType::LEVELS + 1)
}

pub(super) fn propagate_within(
    graph: &WorkspaceGraph,
    intents: &BumpIntents,
    max_rounds: usize,
) -> Result<BumpIntents, InvariantViolation> {
    let mut current = normalize_linked(graph, intents);

    for round in 1..=max_rounds {
        let next = normalize_linked(graph, &propagation_round(graph, &current));
        if next == current {
            debug!(rounds = round, "dependency propagation converged");
            return Ok(current);
        }
        debug!(round, "dependency propagation raised intents");
        current = next;
    }

    Err(InvariantViolation::PropagationDidNotConverge { rounds: max_rounds })
}

fn propagation_round(graph: &WorkspaceGraph, snapshot: &BumpIntents) -> BumpIntents {
    let mut next = snapshot.clone();

    for package in graph.packages() {
        let exposed = graph
            .dependencies_of(&package.name)
            .any(|dep| snapshot.get(dep).is_release());
        if exposed && next.raise(&package.name, BumpType::Patch) {
            debug!(package = %package.name, "re-released for dependency bump");
        }
    }

    next
}
