//! v001: discussion, idea, idea_idea_link.

use rusqlite::Connection;

use agora_core::errors::AgoraResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AgoraResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS discussion (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            slug          TEXT NOT NULL UNIQUE,
            topic         TEXT NOT NULL,
            locales       TEXT NOT NULL DEFAULT '[]',
            creation_date TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS idea (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            discussion_id  INTEGER NOT NULL REFERENCES discussion(id),
            kind           TEXT NOT NULL CHECK (kind IN ('idea', 'root_idea')),
            short_title    TEXT,
            long_title     TEXT,
            definition     TEXT,
            hidden         INTEGER NOT NULL DEFAULT 0,
            creation_date  TEXT NOT NULL,
            last_modified  TEXT NOT NULL,
            tombstone_date TEXT,
            version        INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_idea_discussion ON idea(discussion_id);
        -- Exactly one live root per discussion.
        CREATE UNIQUE INDEX IF NOT EXISTS ux_idea_live_root
            ON idea(discussion_id)
            WHERE kind = 'root_idea' AND tombstone_date IS NULL;

        CREATE TABLE IF NOT EXISTS idea_idea_link (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            source_id      INTEGER NOT NULL REFERENCES idea(id),
            target_id      INTEGER NOT NULL REFERENCES idea(id),
            link_order     REAL NOT NULL DEFAULT 0.0,
            link_type      TEXT NOT NULL DEFAULT 'idea:InclusionRelation',
            creation_date  TEXT NOT NULL,
            tombstone_date TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_link_source_live
            ON idea_idea_link(source_id) WHERE tombstone_date IS NULL;
        CREATE INDEX IF NOT EXISTS idx_link_target_live
            ON idea_idea_link(target_id) WHERE tombstone_date IS NULL;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
