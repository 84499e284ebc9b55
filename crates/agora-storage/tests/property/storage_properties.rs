//! Property tests: CTE closure vs. a reference walk, inverse consistency,
//! related-count bounds.

use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;

use agora_core::models::*;
use agora_core::traits::{read_snapshot, IContentStorage, IIdeaStorage};
use agora_storage::StorageEngine;

/// Build `n` ideas under the root plus the given `(source, target)` edges
/// (indices into the idea list, possibly cyclic). Returns the idea ids.
fn build(engine: &StorageEngine, n: usize, edges: &[(usize, usize)]) -> (DiscussionId, Vec<IdeaId>) {
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
    (d, ids)
}

fn reference_reach(start: IdeaId, ids: &[IdeaId], edges: &[(usize, usize)]) -> BTreeSet<IdeaId> {
    let mut reached = BTreeSet::new();
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for (s, t) in edges {
            if ids[*s] == current && reached.insert(ids[*t]) {
                queue.push_back(ids[*t]);
            }
        }
    }
    reached
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..8).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..16);
        (Just(n), edges)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_descendants_match_reference_walk((n, edges) in graph_strategy()) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let (_, ids) = build(&engine, n, &edges);

        for &start in &ids {
            let got = read_snapshot(&engine, |r| {
                r.closure_ids(start, LinkDirection::Forward, false)
            })
            .unwrap();
            prop_assert_eq!(got, reference_reach(start, &ids, &edges));
        }
    }

    #[test]
    fn prop_inclusive_descendants_contain_root((n, edges) in graph_strategy()) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let (_, ids) = build(&engine, n, &edges);

        for &start in &ids {
            let got = read_snapshot(&engine, |r| {
                r.closure_ids(start, LinkDirection::Forward, true)
            })
            .unwrap();
            prop_assert!(got.contains(&start));
        }
    }

    #[test]
    fn prop_descendant_iff_ancestor((n, edges) in graph_strategy()) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let (_, ids) = build(&engine, n, &edges);

        let pairs = read_snapshot(&engine, |r| {
            let mut pairs = Vec::new();
            for &a in &ids {
                let down = r.closure_ids(a, LinkDirection::Forward, false)?;
                for &b in &ids {
                    let up = r.closure_ids(b, LinkDirection::Backward, false)?;
                    pairs.push((down.contains(&b), up.contains(&a)));
                }
            }
            Ok(pairs)
        })
        .unwrap();
        for (is_descendant, is_ancestor) in pairs {
            prop_assert_eq!(is_descendant, is_ancestor);
        }
    }

    #[test]
    fn prop_closure_is_idempotent((n, edges) in graph_strategy()) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let (_, ids) = build(&engine, n, &edges);

        let first = read_snapshot(&engine, |r| r.closure_ids(ids[0], LinkDirection::Forward, true))
            .unwrap();
        let second = read_snapshot(&engine, |r| r.closure_ids(ids[0], LinkDirection::Forward, true))
            .unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_read_never_exceeds_total(
        replies in prop::collection::vec(prop::option::of(0usize..6), 1..12),
        reads in prop::collection::vec(0usize..12, 0..20),
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let (d, ids) = build(&engine, 2, &[(0, 1)]);

        let mut posts: Vec<PostId> = Vec::new();
        for parent in &replies {
            let mut new = NewPost::new(d, 1);
            if let Some(p) = parent.and_then(|i| posts.get(i).copied()) {
                new = new.reply_to(p);
            }
            posts.push(engine.create_post(&new).unwrap());
        }
        engine
            .link_content(&NewIdeaContentLink::related(ids[1], posts[0], 1))
            .unwrap();
        for r in &reads {
            if let Some(post) = posts.get(*r) {
                engine.record_action(&NewPostAction::read(5, *post)).unwrap();
            }
        }

        let counts = read_snapshot(&engine, |r| r.related_post_counts(d, &ids, Some(5))).unwrap();
        prop_assert!(counts.read <= counts.total);
        prop_assert!(counts.total >= 1);
    }
}
