//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use agora_core::config::StorageConfig;
use agora_core::errors::AgoraResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    /// `None` for in-memory databases, whose connections cannot share state.
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    /// The writer is opened first so read-only connections find the file.
    pub fn open(path: &Path, config: &StorageConfig) -> AgoraResult<Self> {
        let writer = WriteConnection::open(path, config)?;
        let readers = ReadPool::open(path, config)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory pool. All reads go through the writer.
    pub fn open_in_memory(config: &StorageConfig) -> AgoraResult<Self> {
        let writer = WriteConnection::open_in_memory(config)?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }
}
