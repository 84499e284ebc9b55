use super::{GraphError, StorageError};

/// Top-level error for every public Agora operation.
#[derive(Debug, thiserror::Error)]
pub enum AgoraError {
    #[error("discussion not found: {id}")]
    DiscussionNotFound { id: i64 },

    #[error("idea not found: {id}")]
    IdeaNotFound { id: i64 },

    #[error("idea link not found: {id}")]
    LinkNotFound { id: i64 },

    #[error("post not found: {id}")]
    PostNotFound { id: i64 },

    #[error("discussion {discussion_id} already has a live root idea")]
    DuplicateRootIdea { discussion_id: i64 },

    #[error("invalid idea link {source_id} -> {target_id}: {reason}")]
    InvalidLink {
        source_id: i64,
        target_id: i64,
        reason: String,
    },

    #[error("tombstone cascade failed for idea {idea_id}: {reason}")]
    CascadeFailed { idea_id: i64, reason: String },

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("graph error: {0}")]
    GraphError(#[from] GraphError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),
}
