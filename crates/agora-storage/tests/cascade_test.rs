//! Tombstone cascade: atomicity, rollback on failure, watcher notifications.

use std::sync::Arc;

use agora_core::errors::AgoraError;
use agora_core::models::*;
use agora_core::traits::{read_snapshot, IIdeaStorage};
use agora_observability::RecordingWatcher;
use agora_storage::{to_storage_err, StorageEngine};

struct Graph {
    root: IdeaId,
    a: IdeaId,
    b: IdeaId,
    c: IdeaId,
    root_a: IdeaLinkId,
    a_c: IdeaLinkId,
}

/// root -> a -> c, root -> b
fn build(engine: &StorageEngine) -> Graph {
    let (d, root) = engine
        .create_discussion(&NewDiscussion::new("cascade", "Cascade"))
        .unwrap();
    let a = engine.create_idea(&NewIdea::new(d, "A")).unwrap();
    let b = engine.create_idea(&NewIdea::new(d, "B")).unwrap();
    let c = engine.create_idea(&NewIdea::new(d, "C")).unwrap();
    let root_a = engine.create_link(&NewIdeaLink::new(root, a, 0.0)).unwrap();
    engine.create_link(&NewIdeaLink::new(root, b, 1.0)).unwrap();
    let a_c = engine.create_link(&NewIdeaLink::new(a, c, 0.0)).unwrap();
    Graph {
        root,
        a,
        b,
        c,
        root_a,
        a_c,
    }
}

#[test]
fn tombstone_removes_idea_and_every_touching_link() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let g = build(&engine);

    engine.tombstone_idea(g.a).unwrap();

    let (a, root_a, a_c, root_children, c_parents) = read_snapshot(&engine, |r| {
        Ok((
            r.get_idea(g.a)?.unwrap(),
            r.get_link(g.root_a)?.unwrap(),
            r.get_link(g.a_c)?.unwrap(),
            r.get_children(g.root)?,
            r.get_parents(g.c)?,
        ))
    })
    .unwrap();

    assert!(a.is_tombstone());
    assert!(root_a.is_tombstone());
    assert!(a_c.is_tombstone());
    assert_eq!(root_children.iter().map(|i| i.id).collect::<Vec<_>>(), vec![g.b]);
    assert!(c_parents.is_empty());
}

#[test]
fn tombstone_leaves_siblings_untouched() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let g = build(&engine);
    let b_before = read_snapshot(&engine, |r| r.get_idea(g.b)).unwrap().unwrap();

    engine.tombstone_idea(g.a).unwrap();

    let b_after = read_snapshot(&engine, |r| r.get_idea(g.b)).unwrap().unwrap();
    assert!(b_after.is_live());
    assert_eq!(b_after.version, b_before.version);
    let c = read_snapshot(&engine, |r| r.get_idea(g.c)).unwrap().unwrap();
    assert!(c.is_live(), "children are orphaned, not tombstoned");
}

#[test]
fn tombstone_is_idempotent() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let g = build(&engine);

    engine.tombstone_idea(g.a).unwrap();
    let first = read_snapshot(&engine, |r| r.get_idea(g.a)).unwrap().unwrap();
    engine.tombstone_idea(g.a).unwrap();
    let second = read_snapshot(&engine, |r| r.get_idea(g.a)).unwrap().unwrap();

    assert_eq!(first.tombstone_date, second.tombstone_date);
    assert_eq!(first.version, second.version);
}

#[test]
fn root_idea_cannot_be_tombstoned() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let g = build(&engine);

    let err = engine.tombstone_idea(g.root).unwrap_err();
    assert!(matches!(err, AgoraError::ValidationError(_)), "got {err:?}");
    assert!(matches!(
        engine.tombstone_idea(12_345).unwrap_err(),
        AgoraError::IdeaNotFound { id: 12_345 }
    ));
}

#[test]
fn failed_cascade_rolls_back_every_change() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let g = build(&engine);
    let root_before = read_snapshot(&engine, |r| r.get_idea(g.root)).unwrap().unwrap();

    // Abort the idea update after the link updates already ran.
    let trigger = format!(
        "CREATE TRIGGER block_tombstone BEFORE UPDATE OF tombstone_date ON idea
         WHEN NEW.id = {} AND NEW.tombstone_date IS NOT NULL
         BEGIN SELECT RAISE(ABORT, 'tombstone blocked'); END;",
        g.a
    );
    engine
        .pool()
        .writer
        .with_conn(|conn| {
            conn.execute_batch(&trigger)
                .map_err(|e| to_storage_err(e.to_string()))
        })
        .unwrap();

    let err = engine.tombstone_idea(g.a).unwrap_err();
    match err {
        AgoraError::CascadeFailed { idea_id, reason } => {
            assert_eq!(idea_id, g.a);
            assert!(reason.contains("tombstone blocked"), "reason: {reason}");
        }
        other => panic!("expected CascadeFailed, got {other:?}"),
    }

    let (a, root_a, a_c, root_after) = read_snapshot(&engine, |r| {
        Ok((
            r.get_idea(g.a)?.unwrap(),
            r.get_link(g.root_a)?.unwrap(),
            r.get_link(g.a_c)?.unwrap(),
            r.get_idea(g.root)?.unwrap(),
        ))
    })
    .unwrap();
    assert!(a.is_live());
    assert!(!root_a.is_tombstone(), "link tombstones must be rolled back");
    assert!(!a_c.is_tombstone());
    assert_eq!(root_after.version, root_before.version);
}

// ═══════════════════════════════════════════════════════════════════════════
// WATCHER NOTIFICATIONS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn watcher_sees_creates_and_link_modifications() {
    let watcher = Arc::new(RecordingWatcher::new());
    let engine = StorageEngine::open_in_memory()
        .unwrap()
        .with_watcher(watcher.clone());

    let (d, root) = engine
        .create_discussion(&NewDiscussion::new("watched", "Watched"))
        .unwrap();
    let a = engine.create_idea(&NewIdea::new(d, "A")).unwrap();
    let link = engine.create_link(&NewIdeaLink::new(root, a, 0.0)).unwrap();
    engine.tombstone_link(link).unwrap();

    assert_eq!(
        watcher.changes(),
        vec![
            IdeaChange::Created { id: root },
            IdeaChange::Created { id: a },
            IdeaChange::Modified { id: root, version: 2 },
            IdeaChange::Modified { id: root, version: 3 },
        ]
    );
}

#[test]
fn watcher_sees_delete_and_parent_modification() {
    let watcher = Arc::new(RecordingWatcher::new());
    let engine = StorageEngine::open_in_memory()
        .unwrap()
        .with_watcher(watcher.clone());
    let g = build(&engine);
    watcher.drain();

    engine.tombstone_idea(g.a).unwrap();

    // root: created v1, two links -> v3, cascade -> v4
    assert_eq!(
        watcher.drain(),
        vec![
            IdeaChange::Deleted { id: g.a },
            IdeaChange::Modified { id: g.root, version: 4 },
        ]
    );
}

#[test]
fn watcher_is_silent_when_the_write_fails() {
    let watcher = Arc::new(RecordingWatcher::new());
    let engine = StorageEngine::open_in_memory()
        .unwrap()
        .with_watcher(watcher.clone());
    let g = build(&engine);
    watcher.drain();

    assert!(engine.tombstone_idea(g.root).is_err());
    assert!(engine
        .create_link(&NewIdeaLink::new(g.root, 9_999, 0.0))
        .is_err());
    assert!(watcher.changes().is_empty());
}

#[test]
fn move_reports_former_and_new_parents() {
    let watcher = Arc::new(RecordingWatcher::new());
    let engine = StorageEngine::open_in_memory()
        .unwrap()
        .with_watcher(watcher.clone());
    let g = build(&engine);
    watcher.drain();

    engine.move_idea(g.c, g.b, 0.0).unwrap();

    let changes = watcher.drain();
    let ids: Vec<IdeaId> = changes.iter().map(IdeaChange::idea_id).collect();
    assert_eq!(ids, vec![g.a, g.b]);
    assert!(changes
        .iter()
        .all(|c| matches!(c, IdeaChange::Modified { .. })));
}
