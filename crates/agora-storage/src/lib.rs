//! # agora-storage
//!
//! SQLite persistence layer for the idea graph and its content.
//! Single write connection + read pool, versioned migrations,
//! tombstone-aware queries, recursive-CTE closures, and the SQL behind
//! post/read/contributor aggregation.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use agora_core::errors::{AgoraError, StorageError};

/// Wrap a SQLite failure message as an [`AgoraError`].
pub fn to_storage_err(message: String) -> AgoraError {
    AgoraError::StorageError(StorageError::sqlite(message))
}
