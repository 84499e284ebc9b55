use std::collections::HashSet;

use petgraph::stable_graph::NodeIndex;

use agora_core::errors::AgoraResult;
use agora_core::models::IdeaId;

use super::{IdeaVisitor, VisitOutcome};
use crate::snapshot::GraphSnapshot;

/// Visits all unvisited children of a node before descending into any of
/// them. Each child's own result is its children's `prev`. `end_visit` runs
/// bottom-up with the same contract as the depth-first walk.
pub fn visit_breadth_first<V: IdeaVisitor>(
    snapshot: &GraphSnapshot,
    root: IdeaId,
    visitor: &mut V,
) -> AgoraResult<Option<V::Output>> {
    let Some(idx) = snapshot.node(root) else {
        return Ok(None);
    };
    let Some(idea) = snapshot.idea(idx) else {
        return Ok(None);
    };
    let mut visited = HashSet::from([idx]);
    match visitor.visit_idea(idea, 0, None)? {
        VisitOutcome::Cut => visitor.end_visit(idea, 0, None, Vec::new()),
        VisitOutcome::Continue(result) => {
            descend(snapshot, idx, 0, result, &mut visited, visitor)
        }
    }
}

enum Visited<R> {
    Accepted(NodeIndex, R),
    Cut(NodeIndex),
}

/// `idx` was visited with `result`; visit its children, walk the accepted
/// ones, then close `idx`.
fn descend<V: IdeaVisitor>(
    snapshot: &GraphSnapshot,
    idx: NodeIndex,
    level: usize,
    result: V::Output,
    visited: &mut HashSet<NodeIndex>,
    visitor: &mut V,
) -> AgoraResult<Option<V::Output>> {
    let mut round = Vec::new();
    for child in snapshot.children(idx) {
        if !visited.insert(child) {
            continue;
        }
        let Some(idea) = snapshot.idea(child) else {
            continue;
        };
        match visitor.visit_idea(idea, level + 1, Some(&result))? {
            VisitOutcome::Continue(r) => round.push(Visited::Accepted(child, r)),
            VisitOutcome::Cut => round.push(Visited::Cut(child)),
        }
    }

    let mut child_results = Vec::new();
    for entry in round {
        let aggregate = match entry {
            Visited::Accepted(child, r) => {
                descend(snapshot, child, level + 1, r, visited, visitor)?
            }
            Visited::Cut(child) => match snapshot.idea(child) {
                Some(idea) => visitor.end_visit(idea, level + 1, None, Vec::new())?,
                None => None,
            },
        };
        if let Some(aggregate) = aggregate {
            child_results.push(aggregate);
        }
    }

    match snapshot.idea(idx) {
        Some(idea) => visitor.end_visit(idea, level, Some(result), child_results),
        None => Ok(None),
    }
}
