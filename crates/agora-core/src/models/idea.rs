use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DiscussionId, IdeaId};

/// Kind discriminator for ideas.
///
/// The root idea stands for the whole discussion: it logically contains every
/// post, which is why aggregations branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaKind {
    Idea,
    RootIdea,
}

impl IdeaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::RootIdea => "root_idea",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "idea" => Some(Self::Idea),
            "root_idea" => Some(Self::RootIdea),
            _ => None,
        }
    }
}

/// A node of the discussion graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub discussion_id: DiscussionId,
    pub kind: IdeaKind,
    pub short_title: Option<String>,
    pub long_title: Option<String>,
    pub definition: Option<String>,
    pub hidden: bool,
    pub creation_date: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    /// `None` while the idea is live.
    pub tombstone_date: Option<DateTime<Utc>>,
    /// Incremented on every modification.
    pub version: u32,
}

impl Idea {
    pub fn is_root(&self) -> bool {
        self.kind == IdeaKind::RootIdea
    }

    pub fn is_tombstone(&self) -> bool {
        self.tombstone_date.is_some()
    }

    pub fn is_live(&self) -> bool {
        self.tombstone_date.is_none()
    }
}

/// Input for creating an idea.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIdea {
    pub discussion_id: DiscussionId,
    #[serde(default = "default_kind")]
    pub kind: IdeaKind,
    #[serde(default)]
    pub short_title: Option<String>,
    #[serde(default)]
    pub long_title: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

fn default_kind() -> IdeaKind {
    IdeaKind::Idea
}

impl NewIdea {
    pub fn new(discussion_id: DiscussionId, short_title: impl Into<String>) -> Self {
        Self {
            discussion_id,
            kind: IdeaKind::Idea,
            short_title: Some(short_title.into()),
            long_title: None,
            definition: None,
            hidden: false,
        }
    }

    pub fn with_long_title(mut self, long_title: impl Into<String>) -> Self {
        self.long_title = Some(long_title.into());
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Partial update of an idea's editable fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdeaPatch {
    pub short_title: Option<String>,
    pub long_title: Option<String>,
    pub definition: Option<String>,
    pub hidden: Option<bool>,
}
