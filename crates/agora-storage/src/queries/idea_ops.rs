//! Idea CRUD, adjacency reads, and the tombstone cascade.

use rusqlite::{named_params, params, Connection, ErrorCode, OptionalExtension, Row};
use tracing::debug;

use agora_core::errors::{AgoraError, AgoraResult};
use agora_core::models::{DiscussionId, Idea, IdeaId, IdeaKind, IdeaPatch, NewIdea};
use agora_observability::cascade_span;
use agora_observability::tracing_setup::events;

use super::{bad_enum, discussion_ops, in_transaction, now_str, parse_opt_ts, parse_ts};
use crate::to_storage_err;

/// Column list matching [`map_idea`], with the `idea` table aliased as `i`.
pub(crate) const IDEA_COLUMNS: &str = "i.id, i.discussion_id, i.kind, i.short_title, \
     i.long_title, i.definition, i.hidden, i.creation_date, i.last_modified, \
     i.tombstone_date, i.version";

pub(crate) fn map_idea(row: &Row<'_>) -> rusqlite::Result<Idea> {
    let kind: String = row.get(2)?;
    let created: String = row.get(7)?;
    let modified: String = row.get(8)?;
    Ok(Idea {
        id: row.get(0)?,
        discussion_id: row.get(1)?,
        kind: IdeaKind::from_str_name(&kind).ok_or_else(|| bad_enum(2, &kind))?,
        short_title: row.get(3)?,
        long_title: row.get(4)?,
        definition: row.get(5)?,
        hidden: row.get(6)?,
        creation_date: parse_ts(7, &created)?,
        last_modified: parse_ts(8, &modified)?,
        tombstone_date: parse_opt_ts(9, row.get(9)?)?,
        version: row.get(10)?,
    })
}

fn query_ideas(conn: &Connection, sql: &str, id: i64) -> AgoraResult<Vec<Idea>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([id], map_idea)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// What a committed tombstone cascade touched.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeReport {
    pub idea_id: IdeaId,
    pub links_tombstoned: usize,
    /// Former parents and their bumped versions.
    pub modified_parents: Vec<(IdeaId, u32)>,
}

pub fn insert_idea(conn: &Connection, new: &NewIdea) -> AgoraResult<IdeaId> {
    if !discussion_ops::discussion_exists(conn, new.discussion_id)? {
        return Err(AgoraError::DiscussionNotFound {
            id: new.discussion_id,
        });
    }
    if new.kind == IdeaKind::RootIdea && root_idea(conn, new.discussion_id)?.is_some() {
        return Err(AgoraError::DuplicateRootIdea {
            discussion_id: new.discussion_id,
        });
    }

    let now = now_str();
    conn.execute(
        "INSERT INTO idea (discussion_id, kind, short_title, long_title, definition,
                           hidden, creation_date, last_modified)
         VALUES (:discussion_id, :kind, :short_title, :long_title, :definition,
                 :hidden, :now, :now)",
        named_params! {
            ":discussion_id": new.discussion_id,
            ":kind": new.kind.as_str(),
            ":short_title": new.short_title,
            ":long_title": new.long_title,
            ":definition": new.definition,
            ":hidden": new.hidden,
            ":now": now,
        },
    )
    .map_err(|e| match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) if new.kind == IdeaKind::RootIdea => {
            AgoraError::DuplicateRootIdea {
                discussion_id: new.discussion_id,
            }
        }
        _ => to_storage_err(format!("insert idea: {e}")),
    })?;
    Ok(conn.last_insert_rowid())
}

/// Fetch an idea, tombstoned or not.
pub fn get_idea(conn: &Connection, id: IdeaId) -> AgoraResult<Option<Idea>> {
    conn.query_row(
        &format!("SELECT {IDEA_COLUMNS} FROM idea i WHERE i.id = ?1"),
        [id],
        map_idea,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Fetch an idea that must exist and be live.
pub(crate) fn require_live_idea(conn: &Connection, id: IdeaId) -> AgoraResult<Idea> {
    match get_idea(conn, id)? {
        Some(idea) if idea.is_live() => Ok(idea),
        Some(_) => Err(AgoraError::ValidationError(format!(
            "idea {id} is tombstoned"
        ))),
        None => Err(AgoraError::IdeaNotFound { id }),
    }
}

pub fn root_idea(conn: &Connection, discussion_id: DiscussionId) -> AgoraResult<Option<Idea>> {
    conn.query_row(
        &format!(
            "SELECT {IDEA_COLUMNS} FROM idea i
             WHERE i.discussion_id = ?1 AND i.kind = 'root_idea' AND i.tombstone_date IS NULL"
        ),
        [discussion_id],
        map_idea,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply a patch to a live idea. Returns the new version.
pub fn update_idea(conn: &Connection, id: IdeaId, patch: &IdeaPatch) -> AgoraResult<u32> {
    in_transaction(conn, "update_idea", |conn| {
        require_live_idea(conn, id)?;
        conn.query_row(
            "UPDATE idea SET
                short_title   = COALESCE(:short_title, short_title),
                long_title    = COALESCE(:long_title, long_title),
                definition    = COALESCE(:definition, definition),
                hidden        = COALESCE(:hidden, hidden),
                last_modified = :now,
                version       = version + 1
             WHERE id = :id
             RETURNING version",
            named_params! {
                ":short_title": patch.short_title,
                ":long_title": patch.long_title,
                ":definition": patch.definition,
                ":hidden": patch.hidden,
                ":now": now_str(),
                ":id": id,
            },
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(format!("update idea {id}: {e}")))
    })
}

/// Increment an idea's version after a structural change. Returns the new version.
pub(crate) fn bump_version(conn: &Connection, id: IdeaId, now: &str) -> AgoraResult<u32> {
    conn.query_row(
        "UPDATE idea SET version = version + 1, last_modified = ?2 WHERE id = ?1
         RETURNING version",
        params![id, now],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(format!("bump version of idea {id}: {e}")))
}

/// Tombstone an idea and every live link touching it in one transaction.
///
/// Returns `None` when the idea was already tombstoned. The root idea cannot
/// be tombstoned. Any failure inside the cascade rolls back every change and
/// surfaces as [`AgoraError::CascadeFailed`].
pub fn tombstone_idea(conn: &Connection, id: IdeaId) -> AgoraResult<Option<CascadeReport>> {
    let idea = get_idea(conn, id)?.ok_or(AgoraError::IdeaNotFound { id })?;
    if idea.is_root() {
        return Err(AgoraError::ValidationError(format!(
            "root idea {id} of discussion {} cannot be tombstoned",
            idea.discussion_id
        )));
    }
    if idea.is_tombstone() {
        debug!(idea_id = id, "idea already tombstoned");
        return Ok(None);
    }

    let span = cascade_span!(id);
    let _entered = span.enter();
    match in_transaction(conn, "tombstone_idea", |tx| cascade(tx, id)) {
        Ok(report) => {
            events::cascade_completed(id, report.links_tombstoned);
            Ok(Some(report))
        }
        Err(e) => {
            let reason = e.to_string();
            events::cascade_failed(id, &reason);
            Err(AgoraError::CascadeFailed {
                idea_id: id,
                reason,
            })
        }
    }
}

fn cascade(conn: &Connection, id: IdeaId) -> AgoraResult<CascadeReport> {
    let now = now_str();

    let parents: Vec<IdeaId> = {
        let mut stmt = conn
            .prepare_cached(
                "SELECT DISTINCT source_id FROM idea_idea_link
                 WHERE target_id = ?1 AND source_id != ?1 AND tombstone_date IS NULL
                 ORDER BY source_id",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map([id], |row| row.get(0))
            .map_err(|e| to_storage_err(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| to_storage_err(e.to_string()))?
    };

    let links_tombstoned = conn
        .execute(
            "UPDATE idea_idea_link SET tombstone_date = ?2
             WHERE tombstone_date IS NULL AND (source_id = ?1 OR target_id = ?1)",
            params![id, now],
        )
        .map_err(|e| to_storage_err(format!("tombstone links of idea {id}: {e}")))?;

    conn.execute(
        "UPDATE idea SET tombstone_date = ?2, last_modified = ?2, version = version + 1
         WHERE id = ?1",
        params![id, now],
    )
    .map_err(|e| to_storage_err(format!("tombstone idea {id}: {e}")))?;

    let mut modified_parents = Vec::with_capacity(parents.len());
    for parent in parents {
        modified_parents.push((parent, bump_version(conn, parent, &now)?));
    }

    Ok(CascadeReport {
        idea_id: id,
        links_tombstoned,
        modified_parents,
    })
}

/// Live targets of live outbound links, one entry per link.
pub fn get_children(conn: &Connection, id: IdeaId) -> AgoraResult<Vec<Idea>> {
    query_ideas(
        conn,
        &format!(
            "SELECT {IDEA_COLUMNS} FROM idea_idea_link l
             JOIN idea i ON i.id = l.target_id
             WHERE l.source_id = ?1 AND l.tombstone_date IS NULL AND i.tombstone_date IS NULL
             ORDER BY l.link_order, l.id"
        ),
        id,
    )
}

/// Live sources of live inbound links, by link id.
pub fn get_parents(conn: &Connection, id: IdeaId) -> AgoraResult<Vec<Idea>> {
    query_ideas(
        conn,
        &format!(
            "SELECT {IDEA_COLUMNS} FROM idea_idea_link l
             JOIN idea i ON i.id = l.source_id
             WHERE l.target_id = ?1 AND l.tombstone_date IS NULL AND i.tombstone_date IS NULL
             ORDER BY l.id"
        ),
        id,
    )
}

pub fn num_children(conn: &Connection, id: IdeaId) -> AgoraResult<usize> {
    conn.query_row(
        "SELECT COUNT(*) FROM idea_idea_link l
         JOIN idea i ON i.id = l.target_id
         WHERE l.source_id = ?1 AND l.tombstone_date IS NULL AND i.tombstone_date IS NULL",
        [id],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Every live idea of a discussion, by id.
pub fn discussion_ideas(conn: &Connection, discussion_id: DiscussionId) -> AgoraResult<Vec<Idea>> {
    query_ideas(
        conn,
        &format!(
            "SELECT {IDEA_COLUMNS} FROM idea i
             WHERE i.discussion_id = ?1 AND i.tombstone_date IS NULL
             ORDER BY i.id"
        ),
        discussion_id,
    )
}
