//! Discussion creation (with its root idea) and lookup.

use rusqlite::{named_params, Connection, OptionalExtension};

use agora_core::errors::AgoraResult;
use agora_core::models::{Discussion, DiscussionId, IdeaId, IdeaKind, NewDiscussion, NewIdea};

use super::{idea_ops, in_transaction, now_str, parse_ts};
use crate::to_storage_err;

/// Insert a discussion and its root idea atomically.
pub fn insert_discussion(
    conn: &Connection,
    new: &NewDiscussion,
) -> AgoraResult<(DiscussionId, IdeaId)> {
    in_transaction(conn, "insert_discussion", |conn| {
        let locales =
            serde_json::to_string(&new.locales).map_err(|e| to_storage_err(e.to_string()))?;
        conn.execute(
            "INSERT INTO discussion (slug, topic, locales, creation_date)
             VALUES (:slug, :topic, :locales, :now)",
            named_params! {
                ":slug": new.slug,
                ":topic": new.topic,
                ":locales": locales,
                ":now": now_str(),
            },
        )
        .map_err(|e| to_storage_err(format!("insert discussion '{}': {e}", new.slug)))?;
        let discussion_id = conn.last_insert_rowid();

        let root = NewIdea {
            discussion_id,
            kind: IdeaKind::RootIdea,
            short_title: Some(new.topic.clone()),
            long_title: None,
            definition: None,
            hidden: false,
        };
        let root_id = idea_ops::insert_idea(conn, &root)?;
        Ok((discussion_id, root_id))
    })
}

pub fn get_discussion(conn: &Connection, id: DiscussionId) -> AgoraResult<Option<Discussion>> {
    let row = conn
        .query_row(
            "SELECT id, slug, topic, locales, creation_date FROM discussion WHERE id = ?1",
            [id],
            |row| {
                let created: String = row.get(4)?;
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    parse_ts(4, &created)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((id, slug, topic, locales_json, creation_date)) => {
            let locales: Vec<String> = serde_json::from_str(&locales_json)
                .map_err(|e| to_storage_err(format!("parse locales: {e}")))?;
            Ok(Some(Discussion {
                id,
                slug,
                topic,
                locales,
                creation_date,
            }))
        }
        None => Ok(None),
    }
}

pub fn discussion_exists(conn: &Connection, id: DiscussionId) -> AgoraResult<bool> {
    conn.query_row("SELECT 1 FROM discussion WHERE id = ?1", [id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
        .map_err(|e| to_storage_err(e.to_string()))
}
