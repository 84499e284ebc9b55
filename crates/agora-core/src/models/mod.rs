//! Discussion data model: ideas, links, posts, content links, actions.

mod action;
mod analytics;
mod change;
mod content_link;
mod discussion;
mod idea;
mod idea_link;
mod post;

pub use action::{ActionKind, NewPostAction, PostAction};
pub use analytics::{ContributorStats, PostCounts};
pub use change::IdeaChange;
pub use content_link::{ContentLinkKind, IdeaContentLink, NewIdeaContentLink};
pub use discussion::{Discussion, NewDiscussion};
pub use idea::{Idea, IdeaKind, IdeaPatch, NewIdea};
pub use idea_link::{IdeaLink, LinkDirection, NewIdeaLink};
pub use post::{NewPost, Post, PostKind};

pub type DiscussionId = i64;
pub type IdeaId = i64;
pub type IdeaLinkId = i64;
pub type PostId = i64;
pub type AgentId = i64;
pub type ContentLinkId = i64;
pub type ActionId = i64;
