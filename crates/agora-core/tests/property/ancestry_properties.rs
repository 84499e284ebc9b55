//! Property tests for materialized reply paths.

use agora_core::ancestry::{child_ancestry, parse};
use proptest::prelude::*;

/// Ancestry strings of every post along a chain of replies.
fn chain_ancestries(ids: &[i64]) -> Vec<String> {
    let mut out = Vec::with_capacity(ids.len());
    let mut current = String::new();
    for (i, id) in ids.iter().enumerate() {
        out.push(current.clone());
        if i + 1 < ids.len() {
            current = child_ancestry(&current, *id);
        }
    }
    out
}

fn distinct_ids() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(1i64..10_000, 1..12).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_parse_recovers_the_chain(ids in distinct_ids()) {
        let ancestries = chain_ancestries(&ids);
        for (i, ancestry) in ancestries.iter().enumerate() {
            prop_assert_eq!(parse(ancestry), ids[..i].to_vec());
        }
    }

    #[test]
    fn prop_descendants_share_the_child_prefix(ids in distinct_ids()) {
        // The prefix storage matches with `LIKE` for the subtree of a post.
        let ancestries = chain_ancestries(&ids);
        for (r, root) in ids.iter().enumerate() {
            let prefix = child_ancestry(&ancestries[r], *root);
            for (c, ancestry) in ancestries.iter().enumerate() {
                prop_assert_eq!(ancestry.starts_with(&prefix), c > r, "candidate {} root {}", c, r);
            }
        }
    }
}
