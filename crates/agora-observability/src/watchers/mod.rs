//! Change-notification sinks.

mod recording;

pub use recording::RecordingWatcher;

use agora_core::models::IdeaId;
use agora_core::traits::IModelWatcher;

use crate::tracing_setup::events;

/// Emits every change as a structured log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingWatcher;

impl IModelWatcher for TracingWatcher {
    fn idea_created(&self, id: IdeaId) {
        events::idea_created(id);
    }

    fn idea_modified(&self, id: IdeaId, version: u32) {
        events::idea_modified(id, version);
    }

    fn idea_deleted(&self, id: IdeaId) {
        events::idea_deleted(id);
    }
}
