//! Versioned schema migrations, tracked in `PRAGMA user_version`.

pub mod v001_idea_graph;
pub mod v002_content;

use rusqlite::Connection;
use tracing::info;

use agora_core::constants::SCHEMA_VERSION;
use agora_core::errors::{AgoraError, AgoraResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> AgoraResult<()>;

const MIGRATIONS: [(u32, &str, MigrationFn); 2] = [
    (1, "idea_graph", v001_idea_graph::migrate),
    (2, "content", v002_content::migrate),
];

/// Current schema version of the database.
pub fn current_version(conn: &Connection) -> AgoraResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every migration newer than the stored version, each in its own
/// transaction. Returns the resulting version.
pub fn run_migrations(conn: &Connection) -> AgoraResult<u32> {
    let current = current_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(StorageError::MigrationFailed {
            version: current,
            reason: format!("database is newer than supported version {SCHEMA_VERSION}"),
        }
        .into());
    }

    for (version, name, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        apply(conn, version, migrate).map_err(|e| match e {
            AgoraError::StorageError(StorageError::MigrationFailed { .. }) => e,
            other => StorageError::MigrationFailed {
                version,
                reason: other.to_string(),
            }
            .into(),
        })?;
        info!(version, name, "applied schema migration");
    }
    current_version(conn)
}

fn apply(conn: &Connection, version: u32, migrate: MigrationFn) -> AgoraResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("migration begin: {e}")))?;
    match migrate(&tx).and_then(|()| {
        tx.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))
    }) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("migration commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}
