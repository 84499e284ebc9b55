//! # agora-core
//!
//! Foundation crate for the Agora idea-graph engine.
//! Defines the discussion data model, storage and watcher traits, errors,
//! config, and constants. Every other crate in the workspace depends on this.

pub mod ancestry;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AgoraConfig;
pub use errors::{AgoraError, AgoraResult};
pub use models::{
    AgentId, DiscussionId, Idea, IdeaId, IdeaKind, IdeaLink, IdeaLinkId, Post, PostId,
};
