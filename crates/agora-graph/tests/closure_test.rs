//! Native and fixed-point closures against a real store.

use std::collections::BTreeSet;

use agora_core::config::{ClosureStrategy, GraphConfig};
use agora_core::errors::{AgoraError, GraphError};
use agora_core::traits::IIdeaStorage;
use agora_graph::{ClosureResolver, FixedPointClosure, IdeaGraph, NativeClosure};
use agora_storage::StorageEngine;
use test_fixtures::load_discussion;

fn set(ids: &[i64]) -> BTreeSet<i64> {
    ids.iter().copied().collect()
}

fn graphs(engine: &StorageEngine) -> [IdeaGraph<'_>; 2] {
    [
        IdeaGraph::with_resolver(engine, Box::new(NativeClosure)),
        IdeaGraph::with_resolver(engine, Box::new(FixedPointClosure)),
    ]
}

#[test]
fn inclusive_descendants_contain_root() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let ids = load_discussion("scenario").install(&engine).unwrap();

    for graph in graphs(&engine) {
        let got = graph.descendants(ids.root(), true).unwrap();
        assert_eq!(
            got,
            set(&[ids.root(), ids.idea("A"), ids.idea("B")]),
            "{:?}",
            graph.resolver().strategy()
        );
    }
}

#[test]
fn cycle_returns_each_idea_once() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let ids = load_discussion("cycle").install(&engine).unwrap();
    let (a, b, c, d) = (ids.idea("A"), ids.idea("B"), ids.idea("C"), ids.idea("D"));

    // Without the B -> D branch the cycle is exactly {A, B, C}.
    engine.tombstone_idea(d).unwrap();

    for graph in graphs(&engine) {
        assert_eq!(graph.descendants(a, false).unwrap(), set(&[a, b, c]));
        assert_eq!(graph.descendants(a, true).unwrap(), set(&[a, b, c]));
    }
}

#[test]
fn tombstoning_a_child_leaves_its_siblings() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let ids = load_discussion("siblings").install(&engine).unwrap();
    let a = ids.idea("A");

    engine.tombstone_idea(ids.idea("X")).unwrap();

    for graph in graphs(&engine) {
        assert_eq!(graph.descendants(a, false).unwrap(), set(&[ids.idea("Y")]));
        assert_eq!(
            graph.descendants(ids.idea("B"), false).unwrap(),
            set(&[ids.idea("Z")])
        );
    }
}

#[test]
fn unknown_root_is_empty_or_itself() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for graph in graphs(&engine) {
        assert!(graph.descendants(999, false).unwrap().is_empty());
        assert_eq!(graph.descendants(999, true).unwrap(), set(&[999]));
        assert!(graph.ancestors(&[999], false).unwrap().is_empty());
    }
}

#[test]
fn single_target_ancestors_agree() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let ids = load_discussion("siblings").install(&engine).unwrap();
    let expected = set(&[ids.root(), ids.idea("A"), ids.idea("B")]);

    for graph in graphs(&engine) {
        assert_eq!(graph.ancestors(&[ids.idea("X")], false).unwrap(), expected);
    }
}

#[test]
fn native_rejects_multi_target_ancestors() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let ids = load_discussion("siblings").install(&engine).unwrap();
    let native = IdeaGraph::with_resolver(&engine, Box::new(NativeClosure));

    let err = native
        .ancestors(&[ids.idea("Y"), ids.idea("Z")], false)
        .unwrap_err();
    assert!(matches!(
        err,
        AgoraError::GraphError(GraphError::UnsupportedOperation { .. })
    ));
    assert!(!NativeClosure.supports_multi_root());
}

#[test]
fn fixed_point_seeds_several_targets() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let ids = load_discussion("siblings").install(&engine).unwrap();
    let graph = IdeaGraph::with_resolver(&engine, Box::new(FixedPointClosure));

    let targets = [ids.idea("Y"), ids.idea("Z")];
    assert_eq!(
        graph.ancestors(&targets, false).unwrap(),
        set(&[ids.root(), ids.idea("A"), ids.idea("B")])
    );
    assert_eq!(
        graph.ancestors(&targets, true).unwrap(),
        set(&[ids.root(), ids.idea("A"), ids.idea("B"), ids.idea("Y"), ids.idea("Z")])
    );
    assert!(graph.ancestors(&[], true).unwrap().is_empty());
}

#[test]
fn config_selects_the_strategy() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for strategy in [ClosureStrategy::Native, ClosureStrategy::FixedPoint] {
        let config = GraphConfig {
            closure_strategy: strategy,
        };
        let graph = IdeaGraph::new(&engine, &config);
        assert_eq!(graph.resolver().strategy(), strategy);
    }
}
