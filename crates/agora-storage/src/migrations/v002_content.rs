//! v002: post, idea_content_link, post_action.

use rusqlite::Connection;

use agora_core::errors::AgoraResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AgoraResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS post (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            discussion_id INTEGER NOT NULL REFERENCES discussion(id),
            kind          TEXT NOT NULL
                CHECK (kind IN ('assembl_post', 'synthesis_post', 'imported_post')),
            creator_id    INTEGER NOT NULL,
            parent_id     INTEGER REFERENCES post(id),
            ancestry      TEXT NOT NULL DEFAULT '',
            subject       TEXT,
            body          TEXT,
            hidden        INTEGER NOT NULL DEFAULT 0,
            creation_date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_post_discussion ON post(discussion_id);
        CREATE INDEX IF NOT EXISTS idx_post_ancestry ON post(ancestry);
        CREATE INDEX IF NOT EXISTS idx_post_creator ON post(creator_id);

        CREATE TABLE IF NOT EXISTS idea_content_link (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            idea_id       INTEGER REFERENCES idea(id),
            content_id    INTEGER NOT NULL REFERENCES post(id),
            kind          TEXT NOT NULL
                CHECK (kind IN ('related_post', 'extract', 'thread_context_break')),
            important     INTEGER NOT NULL DEFAULT 0,
            creator_id    INTEGER NOT NULL,
            creation_date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_icl_idea ON idea_content_link(idea_id);
        CREATE INDEX IF NOT EXISTS idx_icl_content ON idea_content_link(content_id);

        CREATE TABLE IF NOT EXISTS post_action (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            kind           TEXT NOT NULL CHECK (kind IN ('read', 'like')),
            actor_id       INTEGER NOT NULL,
            post_id        INTEGER NOT NULL REFERENCES post(id),
            creation_date  TEXT NOT NULL,
            tombstone_date TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_action_post_actor_live
            ON post_action(post_id, actor_id) WHERE tombstone_date IS NULL;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
