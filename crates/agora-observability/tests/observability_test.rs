use agora_core::config::ObservabilityConfig;
use agora_core::models::IdeaChange;
use agora_core::traits::IModelWatcher;
use agora_observability::tracing_setup::spans::names;
use agora_observability::{
    aggregation_span, cascade_span, closure_span, init_tracing, traversal_span,
    RecordingWatcher, TracingWatcher,
};

#[test]
fn recording_watcher_keeps_arrival_order() {
    let watcher = RecordingWatcher::new();
    watcher.idea_created(1);
    watcher.idea_modified(1, 2);
    watcher.idea_deleted(1);
    assert_eq!(
        watcher.changes(),
        vec![
            IdeaChange::Created { id: 1 },
            IdeaChange::Modified { id: 1, version: 2 },
            IdeaChange::Deleted { id: 1 },
        ]
    );
}

#[test]
fn recording_watcher_drain_empties() {
    let watcher = RecordingWatcher::new();
    watcher.idea_created(5);
    assert_eq!(watcher.drain().len(), 1);
    assert!(watcher.changes().is_empty());
}

#[test]
fn recording_watcher_json_is_tagged() {
    let watcher = RecordingWatcher::new();
    watcher.idea_deleted(9);
    let json = watcher.to_json();
    assert_eq!(json[0]["event"], "deleted");
    assert_eq!(json[0]["id"], 9);
}

#[test]
fn tracing_watcher_is_object_safe() {
    let watcher: Box<dyn IModelWatcher> = Box::new(TracingWatcher);
    watcher.idea_created(1);
    watcher.idea_modified(1, 3);
    watcher.idea_deleted(1);
}

#[test]
fn init_tracing_is_idempotent() {
    let config = ObservabilityConfig::default();
    init_tracing(&config);
    init_tracing(&config);
}

#[test]
fn span_macros_build_named_spans() {
    let spans = [
        closure_span!(agora_core::models::LinkDirection::Forward, "native"),
        traversal_span!(1_i64, "depth_first"),
        aggregation_span!("num_posts", 1_i64),
        cascade_span!(1_i64),
    ];
    for span in &spans {
        let _entered = span.enter();
    }
    assert_eq!(names::CASCADE, "agora.cascade");
    assert_eq!(names::CLOSURE, "agora.closure");
}
