//! Property tests for read/total counts under random read actions.

use agora_analytics::ContentAggregator;
use agora_core::config::AnalyticsConfig;
use agora_core::models::NewPostAction;
use agora_core::traits::IContentStorage;
use agora_graph::{FixedPointClosure, NativeClosure};
use agora_storage::StorageEngine;
use proptest::prelude::*;
use test_fixtures::load_discussion;

const POSTS: [&str; 9] = ["P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8", "P9"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_read_bounded_by_total(
        reads in prop::collection::vec((1i64..5, 0usize..POSTS.len()), 0..30),
        user in 1i64..5,
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let ids = load_discussion("energy_transition").install(&engine).unwrap();
        for (agent, post) in &reads {
            engine.record_action(&NewPostAction::read(*agent, ids.post(POSTS[*post]))).unwrap();
        }

        let native = ContentAggregator::with_resolver(&engine, Box::new(NativeClosure), AnalyticsConfig::default());
        let fixed = ContentAggregator::with_resolver(&engine, Box::new(FixedPointClosure), AnalyticsConfig::default());
        for idea in ids.ideas.values() {
            let a = native.num_total_and_read_posts_for(*idea, Some(user)).unwrap();
            let b = fixed.num_total_and_read_posts_for(*idea, Some(user)).unwrap();
            prop_assert!(a.read <= a.total);
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.total, native.num_posts(*idea).unwrap());
            prop_assert_eq!(a.read, native.num_read_posts_for(*idea, Some(user)).unwrap());
        }
    }
}
