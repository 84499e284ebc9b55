//! SQL for every read and write path. Each submodule takes a bare
//! `&Connection` so the same functions serve the writer and snapshots.

pub mod analytics_ops;
pub mod closure;
pub mod discussion_ops;
pub mod idea_ops;
pub mod link_ops;
pub mod maintenance;
pub mod post_ops;
pub mod snapshot;

use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::Connection;
use tracing::warn;

use agora_core::errors::AgoraResult;
use agora_core::models::ContentLinkKind;

use crate::to_storage_err;

/// Run `f` in a transaction on `conn`; commit on success, roll back on error.
pub(crate) fn in_transaction<T>(
    conn: &Connection,
    op: &str,
    f: impl FnOnce(&Connection) -> AgoraResult<T>,
) -> AgoraResult<T> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("{op} begin: {e}")))?;
    match f(&tx) {
        Ok(value) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("{op} commit: {e}")))?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(op, error = %rollback_err, "rollback failed");
            }
            Err(e)
        }
    }
}

pub(crate) fn now_str() -> String {
    Utc::now().to_rfc3339()
}

pub(crate) fn parse_ts(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn parse_opt_ts(
    idx: usize,
    value: Option<String>,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    value.map(|v| parse_ts(idx, &v)).transpose()
}

/// Error for an unrecognized discriminator column.
pub(crate) fn bad_enum(idx: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        format!("unknown discriminator '{value}'").into(),
    )
}

/// An id set bound as a single JSON array parameter. Read it back with
/// [`in_id_array`]; the set size is then independent of SQLite's
/// host-parameter limit.
pub(crate) fn id_array(ids: &[i64]) -> AgoraResult<Value> {
    Ok(Value::Text(serde_json::to_string(ids)?))
}

/// `IN` operand over the JSON id array bound at `?{param}`.
pub(crate) fn in_id_array(param: usize) -> String {
    format!("(SELECT value FROM json_each(?{param}))")
}

/// `'related_post', 'extract'` for SQL `IN` lists.
pub(crate) fn positive_kinds_sql() -> String {
    ContentLinkKind::positive_kinds()
        .iter()
        .map(|k| format!("'{}'", k.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_sets_bind_as_one_json_array() {
        assert_eq!(id_array(&[3, 7, 11]).unwrap(), Value::Text("[3,7,11]".into()));
        assert_eq!(id_array(&[]).unwrap(), Value::Text("[]".into()));
        assert_eq!(in_id_array(2), "(SELECT value FROM json_each(?2))");
    }

    #[test]
    fn positive_kinds_render_as_sql_literals() {
        assert_eq!(positive_kinds_sql(), "'related_post', 'extract'");
    }

    #[test]
    fn timestamps_round_trip() {
        let now = now_str();
        let parsed = parse_ts(0, &now).unwrap();
        assert_eq!(parsed.to_rfc3339(), now);
        assert!(parse_ts(0, "yesterday").is_err());
    }
}
