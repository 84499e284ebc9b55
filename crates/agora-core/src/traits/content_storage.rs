use crate::errors::AgoraResult;
use crate::models::{ActionId, ContentLinkId, NewIdeaContentLink, NewPost, NewPostAction, PostId};

/// Writes over posts, idea-content links and post actions.
pub trait IContentStorage: Send + Sync {
    /// Derives the ancestry string from the parent post.
    fn create_post(&self, new: &NewPost) -> AgoraResult<PostId>;
    fn link_content(&self, new: &NewIdeaContentLink) -> AgoraResult<ContentLinkId>;
    fn record_action(&self, new: &NewPostAction) -> AgoraResult<ActionId>;
    fn retract_action(&self, id: ActionId) -> AgoraResult<()>;
}
