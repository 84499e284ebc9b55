use serde::{Deserialize, Serialize};

use super::defaults;

/// `db_path` value selecting a private in-memory database.
pub const MEMORY_DB_PATH: &str = ":memory:";

/// SQLite connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file, or [`MEMORY_DB_PATH`].
    pub db_path: String,
    pub wal_mode: bool,
    /// `PRAGMA mmap_size`, bytes.
    pub mmap_size: u64,
    /// `PRAGMA cache_size`; negative values are KiB.
    pub cache_size: i64,
    pub busy_timeout_ms: u32,
    /// Read-only connections serving snapshots of a file-backed store.
    pub read_pool_size: usize,
}

impl StorageConfig {
    /// A configuration for a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Self {
            db_path: MEMORY_DB_PATH.to_string(),
            ..Self::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path == MEMORY_DB_PATH
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            wal_mode: defaults::DEFAULT_WAL_MODE,
            mmap_size: defaults::DEFAULT_MMAP_SIZE,
            cache_size: defaults::DEFAULT_CACHE_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
