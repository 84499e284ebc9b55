//! In-memory copy of one discussion's live ideas and links.
//!
//! Traversals load the whole discussion once instead of querying children
//! node by node.

use std::cmp::Ordering;
use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use agora_core::errors::AgoraResult;
use agora_core::models::{DiscussionId, Idea, IdeaId, IdeaLink, IdeaLinkId};
use agora_core::traits::IGraphReader;

/// Edge payload: enough to reproduce the store's child ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkWeight {
    pub link_id: IdeaLinkId,
    pub order: f64,
}

impl LinkWeight {
    fn child_cmp(&self, other: &Self) -> Ordering {
        self.order
            .total_cmp(&other.order)
            .then(self.link_id.cmp(&other.link_id))
    }
}

/// Directed multigraph of live ideas. Parallel links are kept.
#[derive(Debug, Default)]
pub struct GraphSnapshot {
    graph: StableGraph<Idea, LinkWeight>,
    index: HashMap<IdeaId, NodeIndex>,
}

impl GraphSnapshot {
    /// Bulk-load every live idea and live link of a discussion.
    pub fn load(reader: &dyn IGraphReader, discussion_id: DiscussionId) -> AgoraResult<Self> {
        let ideas = reader.discussion_ideas(discussion_id)?;
        let links = reader.discussion_links(discussion_id)?;
        Ok(Self::from_parts(ideas, links))
    }

    /// Build from rows already fetched. Tombstoned rows and links with an
    /// endpoint outside `ideas` are dropped.
    pub fn from_parts(ideas: Vec<Idea>, links: Vec<IdeaLink>) -> Self {
        let mut snapshot = Self::default();
        for idea in ideas.into_iter().filter(Idea::is_live) {
            let id = idea.id;
            let idx = snapshot.graph.add_node(idea);
            snapshot.index.insert(id, idx);
        }
        for link in links.iter().filter(|l| !l.is_tombstone()) {
            let (Some(&source), Some(&target)) = (
                snapshot.index.get(&link.source_id),
                snapshot.index.get(&link.target_id),
            ) else {
                continue;
            };
            snapshot.graph.add_edge(
                source,
                target,
                LinkWeight {
                    link_id: link.id,
                    order: link.order,
                },
            );
        }
        snapshot
    }

    pub fn node(&self, id: IdeaId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub fn idea(&self, idx: NodeIndex) -> Option<&Idea> {
        self.graph.node_weight(idx)
    }

    pub fn contains(&self, id: IdeaId) -> bool {
        self.index.contains_key(&id)
    }

    /// Children in store order (link order, then link id), one entry per link.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.weight(), e.target()))
            .collect();
        edges.sort_by(|a, b| a.0.child_cmp(b.0));
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// Parents by link id, one entry per link.
    pub fn parents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| (e.weight().link_id, e.source()))
            .collect();
        edges.sort_by_key(|(link_id, _)| *link_id);
        edges.into_iter().map(|(_, source)| source).collect()
    }

    pub fn idea_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use agora_core::models::IdeaKind;

    use super::*;

    fn idea(id: IdeaId) -> Idea {
        Idea {
            id,
            discussion_id: 1,
            kind: IdeaKind::Idea,
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

    fn link(id: IdeaLinkId, source: IdeaId, target: IdeaId, order: f64) -> IdeaLink {
        IdeaLink {
            id,
            source_id: source,
            target_id: target,
            order,
            link_type: "inclusion".into(),
            creation_date: Utc::now(),
            tombstone_date: None,
        }
    }

    fn child_ids(snapshot: &GraphSnapshot, id: IdeaId) -> Vec<IdeaId> {
        let idx = snapshot.node(id).unwrap();
        snapshot
            .children(idx)
            .into_iter()
            .map(|c| snapshot.idea(c).unwrap().id)
            .collect()
    }

    #[test]
    fn children_sort_by_order_then_link_id() {
        let snapshot = GraphSnapshot::from_parts(
            vec![idea(1), idea(2), idea(3), idea(4)],
            vec![
                link(10, 1, 2, 1.0),
                link(11, 1, 3, 0.5),
                link(9, 1, 4, 1.0),
            ],
        );
        assert_eq!(child_ids(&snapshot, 1), vec![3, 4, 2]);
    }

    #[test]
    fn dangling_and_tombstoned_rows_are_dropped() {
        let mut dead = idea(3);
        dead.tombstone_date = Some(Utc::now());
        let mut dead_link = link(12, 1, 2, 0.0);
        dead_link.tombstone_date = Some(Utc::now());

        let snapshot = GraphSnapshot::from_parts(
            vec![idea(1), idea(2), dead],
            vec![link(10, 1, 3, 0.0), link(11, 1, 99, 0.0), dead_link],
        );
        assert_eq!(snapshot.idea_count(), 2);
        assert_eq!(snapshot.link_count(), 0);
        assert!(!snapshot.contains(3));
    }

    #[test]
    fn parallel_links_are_kept() {
        let snapshot = GraphSnapshot::from_parts(
            vec![idea(1), idea(2)],
            vec![link(10, 1, 2, 0.0), link(11, 1, 2, 1.0)],
        );
        assert_eq!(child_ids(&snapshot, 1), vec![2, 2]);
        let parents = snapshot.parents(snapshot.node(2).unwrap());
        assert_eq!(parents.len(), 2);
    }
}
