//! Idea link CRUD, versioned edits, and frontier expansion.

use std::collections::BTreeSet;

use rusqlite::{named_params, Connection, OptionalExtension, Row};

use agora_core::errors::{AgoraError, AgoraResult};
use agora_core::models::{
    DiscussionId, IdeaId, IdeaLink, IdeaLinkId, LinkDirection, NewIdeaLink,
};

use super::idea_ops::{bump_version, get_idea, require_live_idea};
use super::{id_array, in_id_array, in_transaction, now_str, parse_opt_ts, parse_ts};
use crate::to_storage_err;

const LINK_COLUMNS: &str =
    "l.id, l.source_id, l.target_id, l.link_order, l.link_type, l.creation_date, l.tombstone_date";

fn map_link(row: &Row<'_>) -> rusqlite::Result<IdeaLink> {
    let created: String = row.get(5)?;
    Ok(IdeaLink {
        id: row.get(0)?,
        source_id: row.get(1)?,
        target_id: row.get(2)?,
        order: row.get(3)?,
        link_type: row.get(4)?,
        creation_date: parse_ts(5, &created)?,
        tombstone_date: parse_opt_ts(6, row.get(6)?)?,
    })
}

/// Result of a link write: the link id plus the source idea's new version.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkChange {
    pub link_id: IdeaLinkId,
    pub source_id: IdeaId,
    pub source_version: u32,
}

/// Check that both endpoints exist, are live, and share a discussion.
fn validate_endpoints(conn: &Connection, source_id: IdeaId, target_id: IdeaId) -> AgoraResult<()> {
    let source = get_idea(conn, source_id)?.ok_or(AgoraError::IdeaNotFound { id: source_id })?;
    let target = get_idea(conn, target_id)?.ok_or(AgoraError::IdeaNotFound { id: target_id })?;
    let invalid = |reason: String| AgoraError::InvalidLink {
        source_id,
        target_id,
        reason,
    };
    if source.is_tombstone() {
        return Err(invalid(format!("source idea {source_id} is tombstoned")));
    }
    if target.is_tombstone() {
        return Err(invalid(format!("target idea {target_id} is tombstoned")));
    }
    if source.discussion_id != target.discussion_id {
        return Err(invalid(format!(
            "ideas belong to discussions {} and {}",
            source.discussion_id, target.discussion_id
        )));
    }
    Ok(())
}

fn insert_link_row(conn: &Connection, new: &NewIdeaLink, now: &str) -> AgoraResult<IdeaLinkId> {
    conn.execute(
        "INSERT INTO idea_idea_link (source_id, target_id, link_order, link_type, creation_date)
         VALUES (:source_id, :target_id, :order, :link_type, :now)",
        named_params! {
            ":source_id": new.source_id,
            ":target_id": new.target_id,
            ":order": new.order,
            ":link_type": new.link_type,
            ":now": now,
        },
    )
    .map_err(|e| to_storage_err(format!("insert idea link: {e}")))?;
    Ok(conn.last_insert_rowid())
}

fn tombstone_link_row(conn: &Connection, id: IdeaLinkId, now: &str) -> AgoraResult<()> {
    conn.execute(
        "UPDATE idea_idea_link SET tombstone_date = ?2 WHERE id = ?1",
        rusqlite::params![id, now],
    )
    .map_err(|e| to_storage_err(format!("tombstone idea link {id}: {e}")))?;
    Ok(())
}

fn require_live_link(conn: &Connection, id: IdeaLinkId) -> AgoraResult<IdeaLink> {
    match get_link(conn, id)? {
        Some(link) if !link.is_tombstone() => Ok(link),
        Some(_) => Err(AgoraError::ValidationError(format!(
            "idea link {id} is tombstoned"
        ))),
        None => Err(AgoraError::LinkNotFound { id }),
    }
}

pub fn insert_link(conn: &Connection, new: &NewIdeaLink) -> AgoraResult<LinkChange> {
    if !new.order.is_finite() {
        return Err(AgoraError::ValidationError(format!(
            "link order must be finite, got {}",
            new.order
        )));
    }
    in_transaction(conn, "insert_link", |conn| {
        validate_endpoints(conn, new.source_id, new.target_id)?;
        let now = now_str();
        let link_id = insert_link_row(conn, new, &now)?;
        let source_version = bump_version(conn, new.source_id, &now)?;
        Ok(LinkChange {
            link_id,
            source_id: new.source_id,
            source_version,
        })
    })
}

/// Fetch a link, tombstoned or not.
pub fn get_link(conn: &Connection, id: IdeaLinkId) -> AgoraResult<Option<IdeaLink>> {
    conn.query_row(
        &format!("SELECT {LINK_COLUMNS} FROM idea_idea_link l WHERE l.id = ?1"),
        [id],
        map_link,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn tombstone_link(conn: &Connection, id: IdeaLinkId) -> AgoraResult<LinkChange> {
    in_transaction(conn, "tombstone_link", |conn| {
        let link = require_live_link(conn, id)?;
        let now = now_str();
        tombstone_link_row(conn, id, &now)?;
        let source_version = bump_version(conn, link.source_id, &now)?;
        Ok(LinkChange {
            link_id: id,
            source_id: link.source_id,
            source_version,
        })
    })
}

/// Versioned reorder: the old link is tombstoned and a copy carrying the
/// new order replaces it. Returns the replacement.
pub fn reorder_link(conn: &Connection, id: IdeaLinkId, order: f64) -> AgoraResult<LinkChange> {
    if !order.is_finite() {
        return Err(AgoraError::ValidationError(format!(
            "link order must be finite, got {order}"
        )));
    }
    in_transaction(conn, "reorder_link", |conn| {
        let link = require_live_link(conn, id)?;
        let now = now_str();
        tombstone_link_row(conn, id, &now)?;
        let replacement = NewIdeaLink {
            source_id: link.source_id,
            target_id: link.target_id,
            order,
            link_type: link.link_type,
        };
        let link_id = insert_link_row(conn, &replacement, &now)?;
        let source_version = bump_version(conn, link.source_id, &now)?;
        Ok(LinkChange {
            link_id,
            source_id: link.source_id,
            source_version,
        })
    })
}

/// Result of [`move_idea`].
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    pub link: LinkChange,
    /// Former parents and their bumped versions.
    pub former_parents: Vec<(IdeaId, u32)>,
}

/// Replace every live inbound link of `id` with one from `new_parent`.
pub fn move_idea(
    conn: &Connection,
    id: IdeaId,
    new_parent: IdeaId,
    order: f64,
) -> AgoraResult<MoveReport> {
    if !order.is_finite() {
        return Err(AgoraError::ValidationError(format!(
            "link order must be finite, got {order}"
        )));
    }
    in_transaction(conn, "move_idea", |conn| {
        let idea = require_live_idea(conn, id)?;
        if idea.is_root() {
            return Err(AgoraError::ValidationError(format!(
                "root idea {id} cannot be moved"
            )));
        }
        if new_parent == id {
            return Err(AgoraError::ValidationError(format!(
                "idea {id} cannot be moved under itself"
            )));
        }
        validate_endpoints(conn, new_parent, id)?;

        let now = now_str();
        let inbound = live_inbound_links(conn, id)?;
        let mut former: BTreeSet<IdeaId> = BTreeSet::new();
        for link in &inbound {
            tombstone_link_row(conn, link.id, &now)?;
            if link.source_id != new_parent && link.source_id != id {
                former.insert(link.source_id);
            }
        }
        let mut former_parents = Vec::with_capacity(former.len());
        for parent in former {
            former_parents.push((parent, bump_version(conn, parent, &now)?));
        }

        let link_id = insert_link_row(conn, &NewIdeaLink::new(new_parent, id, order), &now)?;
        let source_version = bump_version(conn, new_parent, &now)?;
        Ok(MoveReport {
            link: LinkChange {
                link_id,
                source_id: new_parent,
                source_version,
            },
            former_parents,
        })
    })
}

fn live_inbound_links(conn: &Connection, id: IdeaId) -> AgoraResult<Vec<IdeaLink>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {LINK_COLUMNS} FROM idea_idea_link l
             WHERE l.target_id = ?1 AND l.tombstone_date IS NULL
             ORDER BY l.id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([id], map_link)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Earliest live inbound link from a live parent.
pub fn first_parent_link(conn: &Connection, id: IdeaId) -> AgoraResult<Option<IdeaLink>> {
    conn.query_row(
        &format!(
            "SELECT {LINK_COLUMNS} FROM idea_idea_link l
             JOIN idea s ON s.id = l.source_id
             WHERE l.target_id = ?1 AND l.tombstone_date IS NULL AND s.tombstone_date IS NULL
             ORDER BY l.id
             LIMIT 1"
        ),
        [id],
        map_link,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Every live link whose endpoints are both live ideas of the discussion.
pub fn discussion_links(
    conn: &Connection,
    discussion_id: DiscussionId,
) -> AgoraResult<Vec<IdeaLink>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {LINK_COLUMNS} FROM idea_idea_link l
             JOIN idea s ON s.id = l.source_id
             JOIN idea t ON t.id = l.target_id
             WHERE s.discussion_id = ?1
               AND l.tombstone_date IS NULL
               AND s.tombstone_date IS NULL
               AND t.tombstone_date IS NULL
             ORDER BY l.id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([discussion_id], map_link)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Live ideas one live link away from any of `ids`.
pub fn live_neighbor_ids(
    conn: &Connection,
    ids: &[IdeaId],
    direction: LinkDirection,
) -> AgoraResult<BTreeSet<IdeaId>> {
    if ids.is_empty() {
        return Ok(BTreeSet::new());
    }
    let (from, to) = match direction {
        LinkDirection::Forward => ("source_id", "target_id"),
        LinkDirection::Backward => ("target_id", "source_id"),
    };
    let sql = format!(
        "SELECT DISTINCT l.{to} FROM idea_idea_link l
         JOIN idea i ON i.id = l.{to}
         WHERE l.{from} IN {} AND l.tombstone_date IS NULL AND i.tombstone_date IS NULL",
        in_id_array(1)
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([id_array(ids)?], |row| row.get::<_, IdeaId>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<BTreeSet<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
