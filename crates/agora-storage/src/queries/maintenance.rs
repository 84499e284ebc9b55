//! Integrity checks and WAL checkpointing.

use rusqlite::Connection;
use tracing::info;

use agora_core::errors::{AgoraResult, StorageError};

use crate::to_storage_err;

/// Run `PRAGMA integrity_check`; anything but `ok` is corruption.
pub fn integrity_check(conn: &Connection) -> AgoraResult<()> {
    let mut stmt = conn
        .prepare("PRAGMA integrity_check")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let messages = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    if messages.len() == 1 && messages[0] == "ok" {
        return Ok(());
    }
    Err(StorageError::CorruptionDetected {
        details: messages.join("; "),
    }
    .into())
}

/// Truncating WAL checkpoint.
pub fn checkpoint(conn: &Connection) -> AgoraResult<()> {
    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
        .map_err(|e| to_storage_err(e.to_string()))?;
    info!("wal checkpoint completed");
    Ok(())
}
