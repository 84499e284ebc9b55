use crate::models::IdeaId;

/// Receives idea-graph changes after they commit.
pub trait IModelWatcher: Send + Sync {
    fn idea_created(&self, id: IdeaId);
    fn idea_modified(&self, id: IdeaId, version: u32);
    fn idea_deleted(&self, id: IdeaId);
}
