use crate::errors::{AgoraError, AgoraResult};
use crate::models::{
    DiscussionId, IdeaId, IdeaLinkId, IdeaPatch, NewDiscussion, NewIdea, NewIdeaLink,
};

use super::IGraphReader;

/// Callback handed a reader bound to one read transaction.
pub type SnapshotFn<'a> = dyn FnMut(&dyn IGraphReader) -> AgoraResult<()> + 'a;

/// Writes over the idea graph plus snapshot-isolated reads.
pub trait IIdeaStorage: Send + Sync {
    // --- Discussions ---
    /// Creates the discussion and its root idea in one transaction.
    fn create_discussion(&self, new: &NewDiscussion) -> AgoraResult<(DiscussionId, IdeaId)>;

    // --- Ideas ---
    fn create_idea(&self, new: &NewIdea) -> AgoraResult<IdeaId>;
    /// Applies the patch and returns the new version.
    fn update_idea(&self, id: IdeaId, patch: &IdeaPatch) -> AgoraResult<u32>;
    /// Tombstones the idea and every live link touching it, atomically.
    fn tombstone_idea(&self, id: IdeaId) -> AgoraResult<()>;
    /// Replaces every live inbound link with one from `new_parent`.
    fn move_idea(&self, id: IdeaId, new_parent: IdeaId, order: f64) -> AgoraResult<IdeaLinkId>;

    // --- Links ---
    fn create_link(&self, new: &NewIdeaLink) -> AgoraResult<IdeaLinkId>;
    fn tombstone_link(&self, id: IdeaLinkId) -> AgoraResult<()>;
    /// Tombstones the link and creates a replacement with the new order.
    fn reorder_link(&self, id: IdeaLinkId, order: f64) -> AgoraResult<IdeaLinkId>;

    // --- Reads ---
    /// Runs `f` against a consistent read snapshot. The reader must not be
    /// used to trigger writes on the same storage.
    fn snapshot(&self, f: &mut SnapshotFn<'_>) -> AgoraResult<()>;
}

/// Runs `f` inside one snapshot of `storage` and returns its value.
pub fn read_snapshot<S, T, F>(storage: &S, f: F) -> AgoraResult<T>
where
    S: IIdeaStorage + ?Sized,
    F: FnOnce(&dyn IGraphReader) -> AgoraResult<T>,
{
    let mut f = Some(f);
    let mut out = None;
    storage.snapshot(&mut |reader| {
        let f = f
            .take()
            .ok_or_else(|| AgoraError::ConcurrencyError("snapshot callback reentered".into()))?;
        out = Some(f(reader)?);
        Ok(())
    })?;
    out.ok_or_else(|| AgoraError::ConcurrencyError("snapshot callback never ran".into()))
}
