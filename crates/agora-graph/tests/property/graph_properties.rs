//! Property tests: strategy agreement, inverse consistency, idempotence,
//! traversal coverage.

use std::collections::BTreeSet;

use proptest::prelude::*;

use agora_core::errors::AgoraResult;
use agora_core::models::*;
use agora_core::traits::IIdeaStorage;
use agora_graph::{
    FixedPointClosure, IdeaGraph, IdeaVisitor, NativeClosure, TraversalOrder, VisitOutcome,
};
use agora_storage::StorageEngine;

/// Root plus `n` ideas; `edges` index into the ideas; `dead` ideas are
/// tombstoned afterwards.
fn build(
    engine: &StorageEngine,
    n: usize,
    edges: &[(usize, usize)],
    dead: &[usize],
) -> (IdeaId, Vec<IdeaId>) {
    let (d, root) = engine
        .create_discussion(&NewDiscussion::new("prop", "Property graph"))
        .unwrap();
    let ids: Vec<IdeaId> = (0..n)
        .map(|i| engine.create_idea(&NewIdea::new(d, format!("Idea {i}"))).unwrap())
        .collect();
    engine
        .create_link(&NewIdeaLink::new(root, ids[0], 0.0))
        .unwrap();
    for (order, (s, t)) in edges.iter().enumerate() {
        engine
            .create_link(&NewIdeaLink::new(ids[*s], ids[*t], order as f64))
            .unwrap();
    }
    for i in dead {
        engine.tombstone_idea(ids[*i]).unwrap();
    }
    (root, ids)
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<usize>)> {
    (2usize..8).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..16),
            prop::collection::vec(1..n, 0..2),
        )
    })
}

struct Collect(BTreeSet<IdeaId>);

impl IdeaVisitor for Collect {
    type Output = ();

    fn visit_idea(
        &mut self,
        idea: &Idea,
        _level: usize,
        _prev: Option<&()>,
    ) -> AgoraResult<VisitOutcome<()>> {
        self.0.insert(idea.id);
        Ok(VisitOutcome::Continue(()))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_native_and_fixed_point_agree((n, edges, dead) in graph_strategy()) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let (root, ids) = build(&engine, n, &edges, &dead);
        let native = IdeaGraph::with_resolver(&engine, Box::new(NativeClosure));
        let fixed = IdeaGraph::with_resolver(&engine, Box::new(FixedPointClosure));

        for &start in ids.iter().chain(std::iter::once(&root)) {
            for inclusive in [false, true] {
                prop_assert_eq!(
                    native.descendants(start, inclusive).unwrap(),
                    fixed.descendants(start, inclusive).unwrap()
                );
                prop_assert_eq!(
                    native.ancestors(&[start], inclusive).unwrap(),
                    fixed.ancestors(&[start], inclusive).unwrap()
                );
            }
        }
    }

    #[test]
    fn prop_descendant_iff_ancestor((n, edges, dead) in graph_strategy()) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let (_, ids) = build(&engine, n, &edges, &dead);
        let graph = IdeaGraph::with_resolver(&engine, Box::new(FixedPointClosure));

        for &a in &ids {
            let down = graph.descendants(a, false).unwrap();
            for &b in &ids {
                let up = graph.ancestors(&[b], false).unwrap();
                prop_assert_eq!(down.contains(&b), up.contains(&a));
            }
        }
    }

    #[test]
    fn prop_multi_root_ancestors_are_the_union((n, edges, dead) in graph_strategy()) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let (_, ids) = build(&engine, n, &edges, &dead);
        let graph = IdeaGraph::with_resolver(&engine, Box::new(FixedPointClosure));

        let together = graph.ancestors(&ids, false).unwrap();
        let mut separate = BTreeSet::new();
        for &id in &ids {
            separate.extend(graph.ancestors(&[id], false).unwrap());
        }
        prop_assert_eq!(together, separate);
    }

    #[test]
    fn prop_descendants_idempotent((n, edges, dead) in graph_strategy()) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let (root, _) = build(&engine, n, &edges, &dead);
        let graph = IdeaGraph::with_resolver(&engine, Box::new(NativeClosure));

        let first = graph.descendants(root, true).unwrap();
        let second = graph.descendants(root, true).unwrap();
        prop_assert!(first.contains(&root));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_walks_cover_the_inclusive_descendants((n, edges, dead) in graph_strategy()) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let (root, _) = build(&engine, n, &edges, &dead);
        let graph = IdeaGraph::with_resolver(&engine, Box::new(NativeClosure));
        let expected = graph.descendants(root, true).unwrap();

        for order in [TraversalOrder::DepthFirst, TraversalOrder::BreadthFirst] {
            let mut collect = Collect(BTreeSet::new());
            graph.visit(root, order, &mut collect).unwrap();
            prop_assert_eq!(&collect.0, &expected);
        }
    }
}
