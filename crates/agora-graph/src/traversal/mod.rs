//! Visitor-driven walks over a [`GraphSnapshot`].
//!
//! Every walk keeps a visited set: a node reached a second time (through a
//! second parent or a cycle) is skipped and contributes no result.

mod breadth_first;
mod depth_first;

use agora_core::errors::AgoraResult;
use agora_core::models::{Idea, IdeaId};
use agora_core::traits::IGraphReader;
use agora_observability::traversal_span;
use tracing::debug;

use crate::snapshot::GraphSnapshot;

pub use breadth_first::visit_breadth_first;
pub use depth_first::visit_depth_first;

/// What a visitor wants after seeing a node.
#[derive(Debug, Clone, PartialEq)]
pub enum VisitOutcome<R> {
    /// Keep walking; `R` is handed to the children as `prev`.
    Continue(R),
    /// Do not descend below this node.
    Cut,
}

/// Callbacks invoked by the traversal engines.
pub trait IdeaVisitor {
    type Output;

    /// Pre-order hook. `prev` is the parent's result (`None` at the root).
    fn visit_idea(
        &mut self,
        idea: &Idea,
        level: usize,
        prev: Option<&Self::Output>,
    ) -> AgoraResult<VisitOutcome<Self::Output>>;

    /// Post-order hook, after the node's subtree. `result` is `None` for a
    /// cut node. The return value is this subtree's aggregate; `None` is
    /// left out of the parent's `child_results`.
    fn end_visit(
        &mut self,
        idea: &Idea,
        level: usize,
        result: Option<Self::Output>,
        child_results: Vec<Self::Output>,
    ) -> AgoraResult<Option<Self::Output>> {
        let _ = (idea, level, child_results);
        Ok(result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    #[default]
    DepthFirst,
    BreadthFirst,
}

impl TraversalOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepthFirst => "depth_first",
            Self::BreadthFirst => "breadth_first",
        }
    }
}

/// Load `root`'s discussion and walk it. A nonexistent or tombstoned root
/// yields `None` without calling the visitor.
pub fn visit_ideas<V: IdeaVisitor>(
    reader: &dyn IGraphReader,
    root: IdeaId,
    order: TraversalOrder,
    visitor: &mut V,
) -> AgoraResult<Option<V::Output>> {
    let span = traversal_span!(root, order.as_str());
    let _entered = span.enter();

    let Some(idea) = reader.get_idea(root)? else {
        return Ok(None);
    };
    if idea.is_tombstone() {
        return Ok(None);
    }
    let snapshot = GraphSnapshot::load(reader, idea.discussion_id)?;
    debug!(
        ideas = snapshot.idea_count(),
        links = snapshot.link_count(),
        "traversal snapshot loaded"
    );
    match order {
        TraversalOrder::DepthFirst => visit_depth_first(&snapshot, root, visitor),
        TraversalOrder::BreadthFirst => visit_breadth_first(&snapshot, root, visitor),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;

    use agora_core::models::{IdeaKind, IdeaLink};

    use super::*;

    pub fn idea(id: IdeaId) -> Idea {
        Idea {
            id,
            discussion_id: 1,
            kind: if id == 1 {
                IdeaKind::RootIdea
            } else {
                IdeaKind::Idea
            },
            short_title: Some(format!("Idea {id}")),
            long_title: None,
            definition: None,
            hidden: false,
            creation_date: Utc::now(),
            last_modified: Utc::now(),
            tombstone_date: None,
            version: 1,
        }
    }

    /// Snapshot with ideas `1..=n` and `(source, target)` links in order.
    pub fn snapshot(n: IdeaId, edges: &[(IdeaId, IdeaId)]) -> GraphSnapshot {
        let ideas = (1..=n).map(idea).collect();
        let links = edges
            .iter()
            .enumerate()
            .map(|(i, (s, t))| IdeaLink {
                id: i as i64 + 1,
                source_id: *s,
                target_id: *t,
                order: i as f64,
                link_type: "inclusion".into(),
                creation_date: Utc::now(),
                tombstone_date: None,
            })
            .collect();
        GraphSnapshot::from_parts(ideas, links)
    }

    /// Records the call sequence; results are the idea ids of the subtree.
    #[derive(Default)]
    pub struct Recorder {
        pub events: Vec<String>,
        pub cut: Vec<IdeaId>,
        pub prevs: Vec<(IdeaId, Option<IdeaId>)>,
    }

    impl IdeaVisitor for Recorder {
        type Output = Vec<IdeaId>;

        fn visit_idea(
            &mut self,
            idea: &Idea,
            level: usize,
            prev: Option<&Self::Output>,
        ) -> AgoraResult<VisitOutcome<Self::Output>> {
            self.events.push(format!("visit {} @{level}", idea.id));
            self.prevs
                .push((idea.id, prev.and_then(|p| p.first().copied())));
            if self.cut.contains(&idea.id) {
                return Ok(VisitOutcome::Cut);
            }
            Ok(VisitOutcome::Continue(vec![idea.id]))
        }

        fn end_visit(
            &mut self,
            idea: &Idea,
            level: usize,
            result: Option<Self::Output>,
            child_results: Vec<Self::Output>,
        ) -> AgoraResult<Option<Self::Output>> {
            self.events
                .push(format!("end {} @{level} children={}", idea.id, child_results.len()));
            Ok(result.map(|mut own| {
                own.extend(child_results.into_iter().flatten());
                own
            }))
        }
    }
}
