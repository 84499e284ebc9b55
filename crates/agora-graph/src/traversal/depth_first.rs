use std::collections::HashSet;

use petgraph::stable_graph::NodeIndex;

use agora_core::errors::AgoraResult;
use agora_core::models::IdeaId;

use super::{IdeaVisitor, VisitOutcome};
use crate::snapshot::GraphSnapshot;

/// Pre-order visit, post-order aggregation. Children are walked in store
/// order with the parent's result as `prev`.
pub fn visit_depth_first<V: IdeaVisitor>(
    snapshot: &GraphSnapshot,
    root: IdeaId,
    visitor: &mut V,
) -> AgoraResult<Option<V::Output>> {
    let Some(idx) = snapshot.node(root) else {
        return Ok(None);
    };
    let mut visited = HashSet::new();
    walk(snapshot, idx, 0, None, &mut visited, visitor)
}

fn walk<V: IdeaVisitor>(
    snapshot: &GraphSnapshot,
    idx: NodeIndex,
    level: usize,
    prev: Option<&V::Output>,
    visited: &mut HashSet<NodeIndex>,
    visitor: &mut V,
) -> AgoraResult<Option<V::Output>> {
    if !visited.insert(idx) {
        return Ok(None);
    }
    let Some(idea) = snapshot.idea(idx) else {
        return Ok(None);
    };

    match visitor.visit_idea(idea, level, prev)? {
        VisitOutcome::Cut => visitor.end_visit(idea, level, None, Vec::new()),
        VisitOutcome::Continue(result) => {
            let mut child_results = Vec::new();
            for child in snapshot.children(idx) {
                if let Some(r) = walk(snapshot, child, level + 1, Some(&result), visited, visitor)? {
                    child_results.push(r);
                }
            }
            visitor.end_visit(idea, level, Some(result), child_results)
        }
    }
}
