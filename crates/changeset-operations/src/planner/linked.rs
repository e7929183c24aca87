use changeset_core::{BumpType, WorkspaceGraph};

use super::intent::BumpIntents;

/// Raises every member of each linked group to the group's highest intent.
///
/// Groups whose members are all at `none` are left alone. Applying this twice
/// gives the same result as applying it once.
#[must_use]
pub fn normalize_linked(graph: &WorkspaceGraph, intents: &BumpIntents) -> BumpIntents {
    let mut normalized = intents.clone();

    for group in graph.linked_groups() {
        let group_max = group
            .members()
            .iter()
            .map(|member| intents.get(member))
            .max()
            .unwrap_or_default();

        if group_max == BumpType::None {
            continue;
        }

        for member in group.members() {
            normalized.raise(member, group_max);
        }
    }

    normalized
}
