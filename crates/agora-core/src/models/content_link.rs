use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AgentId, ContentLinkId, IdeaId, PostId};

/// Kind discriminator for idea ↔ post associations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentLinkKind {
    /// The post substantively belongs under the idea.
    RelatedPost,
    /// A harvested fragment of the post, attached to an idea.
    Extract,
    /// The post breaks the thread context of the idea.
    ThreadContextBreak,
}

impl ContentLinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RelatedPost => "related_post",
            Self::Extract => "extract",
            Self::ThreadContextBreak => "thread_context_break",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "related_post" => Some(Self::RelatedPost),
            "extract" => Some(Self::Extract),
            "thread_context_break" => Some(Self::ThreadContextBreak),
            _ => None,
        }
    }

    /// Positive links place the post (and its replies) under the idea.
    pub fn is_positive(&self) -> bool {
        matches!(self, Self::RelatedPost | Self::Extract)
    }

    /// All kinds counted as positive, for SQL `IN` lists.
    pub fn positive_kinds() -> [Self; 2] {
        [Self::RelatedPost, Self::Extract]
    }
}

/// Association between a post and an idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaContentLink {
    pub id: ContentLinkId,
    pub idea_id: Option<IdeaId>,
    pub content_id: PostId,
    pub kind: ContentLinkKind,
    /// Only meaningful for extracts.
    pub important: bool,
    pub creator_id: AgentId,
    pub creation_date: DateTime<Utc>,
}

/// Input for creating a content link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIdeaContentLink {
    #[serde(default)]
    pub idea_id: Option<IdeaId>,
    pub content_id: PostId,
    pub kind: ContentLinkKind,
    #[serde(default)]
    pub important: bool,
    pub creator_id: AgentId,
}

impl NewIdeaContentLink {
    pub fn related(idea_id: IdeaId, content_id: PostId, creator_id: AgentId) -> Self {
        Self {
            idea_id: Some(idea_id),
            content_id,
            kind: ContentLinkKind::RelatedPost,
            important: false,
            creator_id,
        }
    }

    pub fn extract(
        idea_id: Option<IdeaId>,
        content_id: PostId,
        creator_id: AgentId,
        important: bool,
    ) -> Self {
        Self {
            idea_id,
            content_id,
            kind: ContentLinkKind::Extract,
            important,
            creator_id,
        }
    }
}
