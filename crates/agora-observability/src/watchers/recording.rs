use std::sync::Mutex;

use agora_core::models::{IdeaChange, IdeaId};
use agora_core::traits::IModelWatcher;

/// Collects changes in arrival order for later inspection.
#[derive(Debug, Default)]
pub struct RecordingWatcher {
    changes: Mutex<Vec<IdeaChange>>,
}

impl RecordingWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, change: IdeaChange) {
        match self.changes.lock() {
            Ok(mut changes) => changes.push(change),
            Err(e) => tracing::warn!(error = %e, "recording watcher lock poisoned, change dropped"),
        }
    }

    /// Changes recorded so far.
    pub fn changes(&self) -> Vec<IdeaChange> {
        self.changes
            .lock()
            .map(|changes| changes.clone())
            .unwrap_or_default()
    }

    /// Remove and return the recorded changes.
    pub fn drain(&self) -> Vec<IdeaChange> {
        self.changes
            .lock()
            .map(|mut changes| std::mem::take(&mut *changes))
            .unwrap_or_default()
    }

    /// Recorded changes as a JSON array.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.changes()).unwrap_or(serde_json::Value::Null)
    }
}

impl IModelWatcher for RecordingWatcher {
    fn idea_created(&self, id: IdeaId) {
        self.push(IdeaChange::Created { id });
    }

    fn idea_modified(&self, id: IdeaId, version: u32) {
        self.push(IdeaChange::Modified { id, version });
    }

    fn idea_deleted(&self, id: IdeaId) {
        self.push(IdeaChange::Deleted { id });
    }
}
