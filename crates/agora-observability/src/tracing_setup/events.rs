//! Structured log events for idea-graph changes.
//!
//! Each function emits a `tracing` event with structured fields.

use agora_core::models::IdeaId;

/// Log an idea creation event.
pub fn idea_created(idea_id: IdeaId) {
    tracing::info!(event = "idea_created", idea_id, "idea created");
}

/// Log an idea modification event.
pub fn idea_modified(idea_id: IdeaId, version: u32) {
    tracing::info!(event = "idea_modified", idea_id, version, "idea modified");
}

/// Log an idea deletion (tombstone) event.
pub fn idea_deleted(idea_id: IdeaId) {
    tracing::info!(event = "idea_deleted", idea_id, "idea tombstoned");
}

/// Log a completed tombstone cascade.
pub fn cascade_completed(idea_id: IdeaId, links_tombstoned: usize) {
    tracing::info!(
        event = "cascade_completed",
        idea_id,
        links_tombstoned,
        "tombstone cascade committed"
    );
}

/// Log a failed tombstone cascade.
pub fn cascade_failed(idea_id: IdeaId, reason: &str) {
    tracing::warn!(
        event = "cascade_failed",
        idea_id,
        reason = %reason,
        "tombstone cascade rolled back"
    );
}
