//! Transitive closure over live links with a recursive CTE.
//!
//! `UNION` (not `UNION ALL`) discards rows already produced, so each idea
//! enters the working set at most once and cycles terminate.

use std::collections::BTreeSet;

use rusqlite::Connection;
use tracing::debug;

use agora_core::errors::AgoraResult;
use agora_core::models::{IdeaId, LinkDirection};

use crate::to_storage_err;

const DESCENDANTS_SQL: &str = "
    WITH RECURSIVE reach(id) AS (
        SELECT l.target_id
          FROM idea_idea_link l
          JOIN idea i ON i.id = l.target_id
         WHERE l.source_id = ?1
           AND l.tombstone_date IS NULL
           AND i.tombstone_date IS NULL
        UNION
        SELECT l.target_id
          FROM idea_idea_link l
          JOIN reach r ON l.source_id = r.id
          JOIN idea i ON i.id = l.target_id
         WHERE l.tombstone_date IS NULL
           AND i.tombstone_date IS NULL
    )
    SELECT id FROM reach";

const ANCESTORS_SQL: &str = "
    WITH RECURSIVE reach(id) AS (
        SELECT l.source_id
          FROM idea_idea_link l
          JOIN idea i ON i.id = l.source_id
         WHERE l.target_id = ?1
           AND l.tombstone_date IS NULL
           AND i.tombstone_date IS NULL
        UNION
        SELECT l.source_id
          FROM idea_idea_link l
          JOIN reach r ON l.target_id = r.id
          JOIN idea i ON i.id = l.source_id
         WHERE l.tombstone_date IS NULL
           AND i.tombstone_date IS NULL
    )
    SELECT id FROM reach";

/// Ideas reachable from `root` in `direction`. `inclusive` adds `root`
/// whether or not it exists.
pub fn closure_ids(
    conn: &Connection,
    root: IdeaId,
    direction: LinkDirection,
    inclusive: bool,
) -> AgoraResult<BTreeSet<IdeaId>> {
    let sql = match direction {
        LinkDirection::Forward => DESCENDANTS_SQL,
        LinkDirection::Backward => ANCESTORS_SQL,
    };
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([root], |row| row.get::<_, IdeaId>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut ids = rows
        .collect::<Result<BTreeSet<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    if inclusive {
        ids.insert(root);
    }
    debug!(root, ?direction, inclusive, size = ids.len(), "native closure");
    Ok(ids)
}
