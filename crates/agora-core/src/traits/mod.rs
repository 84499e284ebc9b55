//! Seams between the store and the engines built on top of it.

mod content_storage;
mod graph_reader;
mod idea_storage;
mod model_watcher;

pub use content_storage::IContentStorage;
pub use graph_reader::IGraphReader;
pub use idea_storage::{read_snapshot, IIdeaStorage, SnapshotFn};
pub use model_watcher::IModelWatcher;
