//! most_common_words over the energy fixture.

use agora_analytics::{ContentAggregator, WordCountVisitor, WordCounter};
use agora_core::config::{AgoraConfig, AnalyticsConfig, WordWeights};
use agora_core::traits::read_snapshot;
use agora_graph::{visit_ideas, FixedPointClosure, NativeClosure, TraversalOrder};
use agora_storage::StorageEngine;
use test_fixtures::{load_discussion, Installed};

fn energy() -> (StorageEngine, Installed) {
    let engine = StorageEngine::open_in_memory().unwrap();
    let ids = load_discussion("energy_transition").install(&engine).unwrap();
    (engine, ids)
}

#[test]
fn subtree_words_by_weight() {
    let (engine, ids) = energy();
    let agg = ContentAggregator::from_config(&engine, &AgoraConfig::default());
    assert_eq!(
        agg.most_common_words(ids.idea("energy"), None, Some(5)).unwrap(),
        vec!["solar", "wind", "rooftop", "panels", "turbines"]
    );
}

#[test]
fn strategies_agree_on_words() {
    let (engine, ids) = energy();
    let native =
        ContentAggregator::with_resolver(&engine, Box::new(NativeClosure), AnalyticsConfig::default());
    let fixed = ContentAggregator::with_resolver(
        &engine,
        Box::new(FixedPointClosure),
        AnalyticsConfig::default(),
    );
    let idea = ids.idea("energy");
    assert_eq!(
        native.most_common_words(idea, None, Some(20)).unwrap(),
        fixed.most_common_words(idea, None, Some(20)).unwrap()
    );
}

#[test]
fn leaf_idea_counts_its_own_posts() {
    let (engine, ids) = energy();
    let agg = ContentAggregator::from_config(&engine, &AgoraConfig::default());
    assert_eq!(
        agg.most_common_words(ids.idea("wind"), Some("en"), Some(3)).unwrap(),
        vec!["wind", "turbines", "offshore"]
    );
}

#[test]
fn default_word_count_applies() {
    let (engine, ids) = energy();
    let agg = ContentAggregator::from_config(&engine, &AgoraConfig::default());
    let words = agg.most_common_words(ids.idea("energy"), None, None).unwrap();
    assert_eq!(words.len(), agg.config().default_word_count);
}

#[test]
fn language_selects_stop_words() {
    let (engine, ids) = energy();
    let agg = ContentAggregator::from_config(&engine, &AgoraConfig::default());
    let idea = ids.idea("energy");

    let english = agg.most_common_words(idea, None, Some(50)).unwrap();
    assert!(!english.iter().any(|w| w == "the"));

    let french = agg.most_common_words(idea, Some("fr"), Some(50)).unwrap();
    assert!(french.iter().any(|w| w == "the"));
}

#[test]
fn missing_idea_has_no_words() {
    let (engine, _) = energy();
    let agg = ContentAggregator::from_config(&engine, &AgoraConfig::default());
    assert!(agg.most_common_words(9_999, None, None).unwrap().is_empty());
}

#[test]
fn visitor_weights_text_sources() {
    let (engine, ids) = energy();
    let resolver = NativeClosure;
    let counter = read_snapshot(&engine, |reader| {
        let weights = WordWeights {
            post_body: 0.0,
            post_subject: 0.0,
            ..WordWeights::default()
        };
        let mut visitor = WordCountVisitor::new(
            reader,
            &resolver,
            weights,
            WordCounter::new(vec!["en".to_string()], 3),
        );
        visit_ideas(reader, ids.idea("energy"), TraversalOrder::DepthFirst, &mut visitor)?;
        Ok(visitor.into_counter())
    })
    .unwrap();

    // Titles and definitions only: energy 2, solar 1 + 2 + 1, wind 1 + 2.
    assert_eq!(counter.weight("energy"), 2.0);
    assert_eq!(counter.weight("solar"), 4.0);
    assert_eq!(counter.weight("wind"), 3.0);
    assert_eq!(counter.weight("municipal"), 1.0);
    assert_eq!(counter.weight("schools"), 0.0);
}
