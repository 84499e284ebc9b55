//! Error taxonomy. Subsystem errors convert into [`AgoraError`] via `From`.

mod agora_error;
mod graph_error;
mod storage_error;

pub use agora_error::AgoraError;
pub use graph_error::GraphError;
pub use storage_error::StorageError;

/// Result alias used across the workspace.
pub type AgoraResult<T> = Result<T, AgoraError>;
