//! Contributor orderings.

use std::cmp::Ordering;

use agora_core::config::ContributorTieBreak;
use agora_core::models::{AgentId, ContributorStats};

fn tie(a: &ContributorStats, b: &ContributorStats, tie_break: ContributorTieBreak) -> Ordering {
    match tie_break {
        ContributorTieBreak::FirstContribution => a
            .first_post_id
            .cmp(&b.first_post_id)
            .then(a.agent_id.cmp(&b.agent_id)),
        ContributorTieBreak::AgentId => a.agent_id.cmp(&b.agent_id),
    }
}

/// Distinct pivot posts desc, then posts desc, then the tie-break.
pub fn rank_contributors(
    mut stats: Vec<ContributorStats>,
    tie_break: ContributorTieBreak,
) -> Vec<AgentId> {
    stats.sort_by(|a, b| {
        b.pivot_count
            .cmp(&a.pivot_count)
            .then(b.post_count.cmp(&a.post_count))
            .then_with(|| tie(a, b, tie_break))
    });
    stats.into_iter().map(|s| s.agent_id).collect()
}

/// Important-extract count desc, then the tie-break.
pub fn rank_synthesis_contributors(
    mut stats: Vec<ContributorStats>,
    tie_break: ContributorTieBreak,
) -> Vec<AgentId> {
    stats.sort_by(|a, b| {
        b.pivot_count
            .cmp(&a.pivot_count)
            .then_with(|| tie(a, b, tie_break))
    });
    stats.into_iter().map(|s| s.agent_id).collect()
}
