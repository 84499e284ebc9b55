//! StorageEngine: owns the ConnectionPool, implements IIdeaStorage and
//! IContentStorage, runs migrations at startup, and notifies the model
//! watcher after each committed write.

use std::path::Path;
use std::sync::Arc;

use agora_core::config::StorageConfig;
use agora_core::errors::AgoraResult;
use agora_core::models::{
    ActionId, ContentLinkId, DiscussionId, IdeaId, IdeaLinkId, IdeaPatch, NewDiscussion,
    NewIdea, NewIdeaContentLink, NewIdeaLink, NewPost, NewPostAction, PostId,
};
use agora_core::traits::{IContentStorage, IIdeaStorage, IModelWatcher, SnapshotFn};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::snapshot::SnapshotReader;
use crate::queries::{
    discussion_ops, idea_ops, link_ops, maintenance, post_ops,
};
use crate::to_storage_err;

/// The main storage engine.
pub struct StorageEngine {
    pool: ConnectionPool,
    watcher: Option<Arc<dyn IModelWatcher>>,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk, with default settings.
    pub fn open(path: &Path) -> AgoraResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    /// Open the database named by `config.db_path`; `:memory:` selects an
    /// in-memory store.
    pub fn from_config(config: &StorageConfig) -> AgoraResult<Self> {
        if config.is_in_memory() {
            return Self::in_memory_with_config(config);
        }
        Self::open_with_config(Path::new(&config.db_path), config)
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> AgoraResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self {
            pool,
            watcher: None,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine. Reads are routed through the writer.
    pub fn open_in_memory() -> AgoraResult<Self> {
        Self::in_memory_with_config(&StorageConfig::in_memory())
    }

    fn in_memory_with_config(config: &StorageConfig) -> AgoraResult<Self> {
        let pool = ConnectionPool::open_in_memory(config)?;
        let engine = Self {
            pool,
            watcher: None,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Attach a watcher notified after every committed idea-graph change.
    pub fn with_watcher(mut self, watcher: Arc<dyn IModelWatcher>) -> Self {
        self.watcher = Some(watcher);
        self
    }

    fn initialize(&self) -> AgoraResult<()> {
        self.pool.writer.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn schema_version(&self) -> AgoraResult<u32> {
        self.pool
            .writer
            .with_conn(migrations::current_version)
    }

    pub fn verify_integrity(&self) -> AgoraResult<()> {
        self.pool.writer.with_conn(maintenance::integrity_check)
    }

    pub fn checkpoint(&self) -> AgoraResult<()> {
        self.pool.writer.with_conn(maintenance::checkpoint)
    }

    /// File-backed: a pooled reader. In-memory: the writer.
    fn with_reader<F, T>(&self, f: F) -> AgoraResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> AgoraResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }

    fn notify(&self, f: impl FnOnce(&dyn IModelWatcher)) {
        if let Some(watcher) = &self.watcher {
            f(watcher.as_ref());
        }
    }
}

impl IIdeaStorage for StorageEngine {
    fn create_discussion(&self, new: &NewDiscussion) -> AgoraResult<(DiscussionId, IdeaId)> {
        let (discussion_id, root_id) = self
            .pool
            .writer
            .with_conn(|conn| discussion_ops::insert_discussion(conn, new))?;
        self.notify(|w| w.idea_created(root_id));
        Ok((discussion_id, root_id))
    }

    fn create_idea(&self, new: &NewIdea) -> AgoraResult<IdeaId> {
        let id = self
            .pool
            .writer
            .with_conn(|conn| idea_ops::insert_idea(conn, new))?;
        self.notify(|w| w.idea_created(id));
        Ok(id)
    }

    fn update_idea(&self, id: IdeaId, patch: &IdeaPatch) -> AgoraResult<u32> {
        let version = self
            .pool
            .writer
            .with_conn(|conn| idea_ops::update_idea(conn, id, patch))?;
        self.notify(|w| w.idea_modified(id, version));
        Ok(version)
    }

    fn tombstone_idea(&self, id: IdeaId) -> AgoraResult<()> {
        let report = self
            .pool
            .writer
            .with_conn(|conn| idea_ops::tombstone_idea(conn, id))?;
        if let Some(report) = report {
            self.notify(|w| {
                w.idea_deleted(report.idea_id);
                for (parent, version) in &report.modified_parents {
                    w.idea_modified(*parent, *version);
                }
            });
        }
        Ok(())
    }

    fn move_idea(&self, id: IdeaId, new_parent: IdeaId, order: f64) -> AgoraResult<IdeaLinkId> {
        let report = self
            .pool
            .writer
            .with_conn(|conn| link_ops::move_idea(conn, id, new_parent, order))?;
        self.notify(|w| {
            for (parent, version) in &report.former_parents {
                w.idea_modified(*parent, *version);
            }
            w.idea_modified(report.link.source_id, report.link.source_version);
        });
        Ok(report.link.link_id)
    }

    fn create_link(&self, new: &NewIdeaLink) -> AgoraResult<IdeaLinkId> {
        let change = self
            .pool
            .writer
            .with_conn(|conn| link_ops::insert_link(conn, new))?;
        self.notify(|w| w.idea_modified(change.source_id, change.source_version));
        Ok(change.link_id)
    }

    fn tombstone_link(&self, id: IdeaLinkId) -> AgoraResult<()> {
        let change = self
            .pool
            .writer
            .with_conn(|conn| link_ops::tombstone_link(conn, id))?;
        self.notify(|w| w.idea_modified(change.source_id, change.source_version));
        Ok(())
    }

    fn reorder_link(&self, id: IdeaLinkId, order: f64) -> AgoraResult<IdeaLinkId> {
        let change = self
            .pool
            .writer
            .with_conn(|conn| link_ops::reorder_link(conn, id, order))?;
        self.notify(|w| w.idea_modified(change.source_id, change.source_version));
        Ok(change.link_id)
    }

    fn snapshot(&self, f: &mut SnapshotFn<'_>) -> AgoraResult<()> {
        self.with_reader(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("snapshot begin: {e}")))?;
            f(&SnapshotReader::new(&tx))?;
            tx.commit()
                .map_err(|e| to_storage_err(format!("snapshot end: {e}")))
        })
    }
}

impl IContentStorage for StorageEngine {
    fn create_post(&self, new: &NewPost) -> AgoraResult<PostId> {
        self.pool
            .writer
            .with_conn(|conn| post_ops::insert_post(conn, new))
    }

    fn link_content(&self, new: &NewIdeaContentLink) -> AgoraResult<ContentLinkId> {
        self.pool
            .writer
            .with_conn(|conn| post_ops::insert_content_link(conn, new))
    }

    fn record_action(&self, new: &NewPostAction) -> AgoraResult<ActionId> {
        self.pool
            .writer
            .with_conn(|conn| post_ops::insert_action(conn, new))
    }

    fn retract_action(&self, id: ActionId) -> AgoraResult<()> {
        self.pool
            .writer
            .with_conn(|conn| post_ops::retract_action(conn, id))
    }
}
