//! The one connection allowed to write. Every write, migration and
//! maintenance pragma is serialized on its lock.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use agora_core::config::StorageConfig;
use agora_core::errors::AgoraResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, config: &StorageConfig) -> AgoraResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| to_storage_err(format!("open writer {}: {e}", path.display())))?;
        Self::configured(conn, config)
    }

    pub fn open_in_memory(config: &StorageConfig) -> AgoraResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| to_storage_err(format!("open in-memory writer: {e}")))?;
        Self::configured(conn, config)
    }

    fn configured(conn: Connection, config: &StorageConfig) -> AgoraResult<Self> {
        apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` holding the write lock. Not reentrant: `f` must not call
    /// back into the engine.
    pub fn with_conn<F, T>(&self, f: F) -> AgoraResult<T>
    where
        F: FnOnce(&Connection) -> AgoraResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("writer lock poisoned: {e}")))?;
        f(&guard)
    }
}
