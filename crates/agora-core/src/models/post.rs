use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AgentId, DiscussionId, PostId};

/// Kind discriminator for posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    AssemblPost,
    SynthesisPost,
    ImportedPost,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssemblPost => "assembl_post",
            Self::SynthesisPost => "synthesis_post",
            Self::ImportedPost => "imported_post",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "assembl_post" => Some(Self::AssemblPost),
            "synthesis_post" => Some(Self::SynthesisPost),
            "imported_post" => Some(Self::ImportedPost),
            _ => None,
        }
    }
}

/// A message in a discussion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub discussion_id: DiscussionId,
    pub kind: PostKind,
    pub creator_id: AgentId,
    pub parent_id: Option<PostId>,
    /// Materialized reply path, see [`crate::ancestry`].
    pub ancestry: String,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub hidden: bool,
    pub creation_date: DateTime<Utc>,
}

/// Input for creating a post. The ancestry string is derived from the parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub discussion_id: DiscussionId,
    #[serde(default = "default_kind")]
    pub kind: PostKind,
    pub creator_id: AgentId,
    #[serde(default)]
    pub parent_id: Option<PostId>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

fn default_kind() -> PostKind {
    PostKind::AssemblPost
}

impl NewPost {
    pub fn new(discussion_id: DiscussionId, creator_id: AgentId) -> Self {
        Self {
            discussion_id,
            kind: PostKind::AssemblPost,
            creator_id,
            parent_id: None,
            subject: None,
            body: None,
            hidden: false,
        }
    }

    pub fn reply_to(mut self, parent_id: PostId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_kind(mut self, kind: PostKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}
