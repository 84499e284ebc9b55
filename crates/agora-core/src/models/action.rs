use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActionId, AgentId, PostId};

/// What an agent did to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Read,
    Like,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Like => "like",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "read" => Some(Self::Read),
            "like" => Some(Self::Like),
            _ => None,
        }
    }
}

/// A recorded action. Retracted actions carry a tombstone date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAction {
    pub id: ActionId,
    pub kind: ActionKind,
    pub actor_id: AgentId,
    pub post_id: PostId,
    pub creation_date: DateTime<Utc>,
    pub tombstone_date: Option<DateTime<Utc>>,
}

/// Input for recording an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPostAction {
    pub kind: ActionKind,
    pub actor_id: AgentId,
    pub post_id: PostId,
}

impl NewPostAction {
    pub fn read(actor_id: AgentId, post_id: PostId) -> Self {
        Self {
            kind: ActionKind::Read,
            actor_id,
            post_id,
        }
    }
}
