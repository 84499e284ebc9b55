//! Posts, idea-content links and post actions.

use rusqlite::{named_params, Connection, OptionalExtension, Row};

use agora_core::ancestry;
use agora_core::errors::{AgoraError, AgoraResult};
use agora_core::models::{
    ActionId, ContentLinkId, ContentLinkKind, NewIdeaContentLink, NewPost, NewPostAction, Post,
    PostId, PostKind,
};

use super::idea_ops::get_idea;
use super::{bad_enum, discussion_ops, id_array, in_id_array, now_str, parse_ts};
use crate::to_storage_err;

const POST_COLUMNS: &str = "p.id, p.discussion_id, p.kind, p.creator_id, p.parent_id, \
     p.ancestry, p.subject, p.body, p.hidden, p.creation_date";

fn map_post(row: &Row<'_>) -> rusqlite::Result<Post> {
    let kind: String = row.get(2)?;
    let created: String = row.get(9)?;
    Ok(Post {
        id: row.get(0)?,
        discussion_id: row.get(1)?,
        kind: PostKind::from_str_name(&kind).ok_or_else(|| bad_enum(2, &kind))?,
        creator_id: row.get(3)?,
        parent_id: row.get(4)?,
        ancestry: row.get(5)?,
        subject: row.get(6)?,
        body: row.get(7)?,
        hidden: row.get(8)?,
        creation_date: parse_ts(9, &created)?,
    })
}

/// Insert a post, deriving its ancestry from the parent.
pub fn insert_post(conn: &Connection, new: &NewPost) -> AgoraResult<PostId> {
    if !discussion_ops::discussion_exists(conn, new.discussion_id)? {
        return Err(AgoraError::DiscussionNotFound {
            id: new.discussion_id,
        });
    }
    let post_ancestry = match new.parent_id {
        Some(parent_id) => {
            let parent =
                get_post(conn, parent_id)?.ok_or(AgoraError::PostNotFound { id: parent_id })?;
            if parent.discussion_id != new.discussion_id {
                return Err(AgoraError::ValidationError(format!(
                    "parent post {parent_id} belongs to discussion {}",
                    parent.discussion_id
                )));
            }
            ancestry::child_ancestry(&parent.ancestry, parent.id)
        }
        None => String::new(),
    };

    conn.execute(
        "INSERT INTO post (discussion_id, kind, creator_id, parent_id, ancestry,
                           subject, body, hidden, creation_date)
         VALUES (:discussion_id, :kind, :creator_id, :parent_id, :ancestry,
                 :subject, :body, :hidden, :now)",
        named_params! {
            ":discussion_id": new.discussion_id,
            ":kind": new.kind.as_str(),
            ":creator_id": new.creator_id,
            ":parent_id": new.parent_id,
            ":ancestry": post_ancestry,
            ":subject": new.subject,
            ":body": new.body,
            ":hidden": new.hidden,
            ":now": now_str(),
        },
    )
    .map_err(|e| to_storage_err(format!("insert post: {e}")))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_post(conn: &Connection, id: PostId) -> AgoraResult<Option<Post>> {
    conn.query_row(
        &format!("SELECT {POST_COLUMNS} FROM post p WHERE p.id = ?1"),
        [id],
        map_post,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Posts with the given ids, ascending. Unknown ids are skipped.
pub fn get_posts(conn: &Connection, ids: &[PostId]) -> AgoraResult<Vec<Post>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {POST_COLUMNS} FROM post p WHERE p.id IN {} ORDER BY p.id",
        in_id_array(1)
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([id_array(ids)?], map_post)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn insert_content_link(
    conn: &Connection,
    new: &NewIdeaContentLink,
) -> AgoraResult<ContentLinkId> {
    let post = get_post(conn, new.content_id)?.ok_or(AgoraError::PostNotFound {
        id: new.content_id,
    })?;
    if new.important && new.kind != ContentLinkKind::Extract {
        return Err(AgoraError::ValidationError(format!(
            "only extracts can be important, got {}",
            new.kind.as_str()
        )));
    }
    if let Some(idea_id) = new.idea_id {
        let idea = get_idea(conn, idea_id)?.ok_or(AgoraError::IdeaNotFound { id: idea_id })?;
        if idea.is_tombstone() {
            return Err(AgoraError::ValidationError(format!(
                "idea {idea_id} is tombstoned"
            )));
        }
        if idea.discussion_id != post.discussion_id {
            return Err(AgoraError::ValidationError(format!(
                "idea {idea_id} and post {} belong to different discussions",
                post.id
            )));
        }
    }

    conn.execute(
        "INSERT INTO idea_content_link (idea_id, content_id, kind, important, creator_id,
                                        creation_date)
         VALUES (:idea_id, :content_id, :kind, :important, :creator_id, :now)",
        named_params! {
            ":idea_id": new.idea_id,
            ":content_id": new.content_id,
            ":kind": new.kind.as_str(),
            ":important": new.important,
            ":creator_id": new.creator_id,
            ":now": now_str(),
        },
    )
    .map_err(|e| to_storage_err(format!("insert content link: {e}")))?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_action(conn: &Connection, new: &NewPostAction) -> AgoraResult<ActionId> {
    if get_post(conn, new.post_id)?.is_none() {
        return Err(AgoraError::PostNotFound { id: new.post_id });
    }
    conn.execute(
        "INSERT INTO post_action (kind, actor_id, post_id, creation_date)
         VALUES (:kind, :actor_id, :post_id, :now)",
        named_params! {
            ":kind": new.kind.as_str(),
            ":actor_id": new.actor_id,
            ":post_id": new.post_id,
            ":now": now_str(),
        },
    )
    .map_err(|e| to_storage_err(format!("insert post action: {e}")))?;
    Ok(conn.last_insert_rowid())
}

/// Tombstone a live action.
pub fn retract_action(conn: &Connection, id: ActionId) -> AgoraResult<()> {
    let changed = conn
        .execute(
            "UPDATE post_action SET tombstone_date = ?2
             WHERE id = ?1 AND tombstone_date IS NULL",
            rusqlite::params![id, now_str()],
        )
        .map_err(|e| to_storage_err(format!("retract post action {id}: {e}")))?;
    if changed == 0 {
        return Err(AgoraError::ValidationError(format!(
            "no live post action with id {id}"
        )));
    }
    Ok(())
}
