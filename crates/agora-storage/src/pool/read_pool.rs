//! Read-only connections for snapshots of a file-backed store.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, TryLockError};

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use agora_core::config::StorageConfig;
use agora_core::errors::AgoraResult;

use super::pragmas::apply_read_pragmas;
use crate::to_storage_err;

const MAX_POOL_SIZE: usize = 8;

pub struct ReadPool {
    slots: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open `config.read_pool_size` read-only connections (at most 8).
    pub fn open(path: &Path, config: &StorageConfig) -> AgoraResult<Self> {
        let size = config.read_pool_size.clamp(1, MAX_POOL_SIZE);
        let slots = (0..size)
            .map(|_| {
                let conn = Connection::open_with_flags(
                    path,
                    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )
                .map_err(|e| to_storage_err(format!("open reader: {e}")))?;
                apply_read_pragmas(&conn, config)?;
                Ok(Mutex::new(conn))
            })
            .collect::<AgoraResult<Vec<_>>>()?;
        Ok(Self {
            slots,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on an idle reader, starting the scan at the round-robin
    /// cursor. Blocks on the cursor's slot only when every reader is busy.
    pub fn with_conn<F, T>(&self, f: F) -> AgoraResult<T>
    where
        F: FnOnce(&Connection) -> AgoraResult<T>,
    {
        let guard = self.acquire()?;
        f(&guard)
    }

    fn acquire(&self) -> AgoraResult<MutexGuard<'_, Connection>> {
        let start = self.cursor.fetch_add(1, Ordering::Relaxed) % self.slots.len();
        for offset in 0..self.slots.len() {
            let slot = &self.slots[(start + offset) % self.slots.len()];
            match slot.try_lock() {
                Ok(guard) => return Ok(guard),
                Err(TryLockError::WouldBlock) => continue,
                Err(TryLockError::Poisoned(e)) => {
                    return Err(to_storage_err(format!("reader lock poisoned: {e}")))
                }
            }
        }
        debug!(readers = self.slots.len(), "all readers busy, waiting");
        self.slots[start]
            .lock()
            .map_err(|e| to_storage_err(format!("reader lock poisoned: {e}")))
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }
}
