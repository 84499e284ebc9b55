//! Aggregation SQL over idea subtrees: related posts, read counts,
//! orphans, contributors.
//!
//! A post is related to an idea set when it lies in the reply subtree of a
//! "pivot" post positively linked to one of the ideas. Reply subtrees are
//! matched on the ancestry string, never recursively.

use std::collections::BTreeSet;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

use agora_core::ancestry;
use agora_core::errors::AgoraResult;
use agora_core::models::{
    AgentId, ContributorStats, DiscussionId, IdeaId, PostCounts, PostId,
};

use super::{id_array, in_id_array, positive_kinds_sql, post_ops};
use crate::to_storage_err;

/// `related(pivot_id, post_id, creator_id)`: every (pivot, reply) pair under
/// the live, non-hidden ideas of the JSON id array bound at `?{ideas_param}`.
/// Expects the discussion id in `?1`.
fn related_cte(ideas_param: usize) -> String {
    format!(
        "related(pivot_id, post_id, creator_id) AS (
            SELECT DISTINCT root.id, sub.id, sub.creator_id
              FROM idea i
              JOIN idea_content_link icl
                ON icl.idea_id = i.id AND icl.kind IN ({kinds})
              JOIN post root ON root.id = icl.content_id
              JOIN post sub ON {in_subtree}
             WHERE i.id IN {ideas}
               AND i.discussion_id = ?1
               AND i.tombstone_date IS NULL
               AND i.hidden = 0
               AND sub.discussion_id = ?1
               AND sub.hidden = 0
        )",
        kinds = positive_kinds_sql(),
        in_subtree = ancestry::subtree_condition_sql("sub", "root"),
        ideas = in_id_array(ideas_param),
    )
}

fn query_ids(conn: &Connection, sql: &str, values: Vec<Value>) -> AgoraResult<Vec<i64>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(values.iter()), |row| row.get::<_, i64>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

fn query_count(conn: &Connection, sql: &str, values: Vec<Value>) -> AgoraResult<usize> {
    conn.query_row(sql, params_from_iter(values.iter()), |row| row.get::<_, i64>(0))
        .map(|n| n as usize)
        .map_err(|e| to_storage_err(e.to_string()))
}

fn query_stats(
    conn: &Connection,
    sql: &str,
    values: Vec<Value>,
) -> AgoraResult<Vec<ContributorStats>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(values.iter()), |row| {
            Ok(ContributorStats {
                agent_id: row.get(0)?,
                pivot_count: row.get::<_, i64>(1)? as usize,
                post_count: row.get::<_, i64>(2)? as usize,
                first_post_id: row.get(3)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Related posts of `idea_ids`, ascending and distinct.
pub fn related_post_ids(
    conn: &Connection,
    discussion_id: DiscussionId,
    idea_ids: &[IdeaId],
) -> AgoraResult<Vec<PostId>> {
    if idea_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "WITH {} SELECT DISTINCT post_id FROM related ORDER BY post_id",
        related_cte(2)
    );
    query_ids(
        conn,
        &sql,
        vec![Value::Integer(discussion_id), id_array(idea_ids)?],
    )
}

/// Total and read counts of the related posts in a single statement.
/// With no user, `?2` binds NULL and no action matches.
pub fn related_post_counts(
    conn: &Connection,
    discussion_id: DiscussionId,
    idea_ids: &[IdeaId],
    user: Option<AgentId>,
) -> AgoraResult<PostCounts> {
    if idea_ids.is_empty() {
        return Ok(PostCounts::default());
    }
    let sql = format!(
        "WITH {}
         SELECT COUNT(DISTINCT r.post_id), COUNT(DISTINCT a.post_id)
           FROM related r
           LEFT JOIN post_action a
             ON a.post_id = r.post_id
            AND a.actor_id = ?2
            AND a.kind = 'read'
            AND a.tombstone_date IS NULL",
        related_cte(3)
    );
    let user = user.map_or(Value::Null, Value::Integer);
    let values = vec![Value::Integer(discussion_id), user, id_array(idea_ids)?];
    conn.query_row(&sql, params_from_iter(values.iter()), |row| {
        Ok(PostCounts {
            total: row.get::<_, i64>(0)? as usize,
            read: row.get::<_, i64>(1)? as usize,
        })
    })
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Non-hidden posts of the discussion.
pub fn discussion_post_count(conn: &Connection, discussion_id: DiscussionId) -> AgoraResult<usize> {
    query_count(
        conn,
        "SELECT COUNT(*) FROM post WHERE discussion_id = ?1 AND hidden = 0",
        vec![Value::Integer(discussion_id)],
    )
}

/// Eligible posts (non-synthesis, non-hidden) not under any live,
/// non-hidden idea of the discussion. Ascending.
pub fn orphan_post_ids(conn: &Connection, discussion_id: DiscussionId) -> AgoraResult<Vec<PostId>> {
    let sql = format!(
        "SELECT p.id FROM post p
          WHERE p.discussion_id = ?1 AND p.kind != 'synthesis_post' AND p.hidden = 0
         EXCEPT
         SELECT sub.id
           FROM idea i
           JOIN idea_content_link icl
             ON icl.idea_id = i.id AND icl.kind IN ({kinds})
           JOIN post root ON root.id = icl.content_id
           JOIN post sub ON {in_subtree}
          WHERE i.discussion_id = ?1
            AND i.tombstone_date IS NULL
            AND i.hidden = 0
         ORDER BY 1",
        kinds = positive_kinds_sql(),
        in_subtree = ancestry::subtree_condition_sql("sub", "root"),
    );
    query_ids(conn, &sql, vec![Value::Integer(discussion_id)])
}

/// Synthesis posts of the discussion, hidden included.
pub fn synthesis_post_count(conn: &Connection, discussion_id: DiscussionId) -> AgoraResult<usize> {
    query_count(
        conn,
        "SELECT COUNT(*) FROM post WHERE discussion_id = ?1 AND kind = 'synthesis_post'",
        vec![Value::Integer(discussion_id)],
    )
}

/// Per-author distinct pivot posts and distinct posts under `idea_ids`.
pub fn contributor_stats(
    conn: &Connection,
    discussion_id: DiscussionId,
    idea_ids: &[IdeaId],
) -> AgoraResult<Vec<ContributorStats>> {
    if idea_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "WITH {}
         SELECT creator_id, COUNT(DISTINCT pivot_id), COUNT(DISTINCT post_id), MIN(post_id)
           FROM related
          GROUP BY creator_id",
        related_cte(2)
    );
    query_stats(
        conn,
        &sql,
        vec![Value::Integer(discussion_id), id_array(idea_ids)?],
    )
}

/// Per-author important-extract counts for extracts attached to `idea_ids`.
pub fn important_extract_stats(
    conn: &Connection,
    idea_ids: &[IdeaId],
) -> AgoraResult<Vec<ContributorStats>> {
    if idea_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT p.creator_id, COUNT(DISTINCT icl.id), COUNT(DISTINCT p.id), MIN(p.id)
           FROM idea_content_link icl
           JOIN post p ON p.id = icl.content_id
           JOIN idea i ON i.id = icl.idea_id
          WHERE icl.kind = 'extract'
            AND icl.important = 1
            AND i.tombstone_date IS NULL
            AND icl.idea_id IN {}
          GROUP BY p.creator_id",
        in_id_array(1)
    );
    query_stats(conn, &sql, vec![id_array(idea_ids)?])
}

/// Live ideas positively linked to the post or to any post above it.
pub fn ideas_linked_to_thread(conn: &Connection, post_id: PostId) -> AgoraResult<BTreeSet<IdeaId>> {
    let Some(post) = post_ops::get_post(conn, post_id)? else {
        return Ok(BTreeSet::new());
    };
    let mut thread = ancestry::parse(&post.ancestry);
    thread.push(post.id);

    let sql = format!(
        "SELECT DISTINCT icl.idea_id
           FROM idea_content_link icl
           JOIN idea i ON i.id = icl.idea_id
          WHERE icl.kind IN ({kinds})
            AND i.tombstone_date IS NULL
            AND icl.content_id IN {posts}",
        kinds = positive_kinds_sql(),
        posts = in_id_array(1)
    );
    Ok(query_ids(conn, &sql, vec![id_array(&thread)?])?
        .into_iter()
        .collect())
}
