use serde::{Deserialize, Serialize};

use super::IdeaId;

/// A committed change to the idea graph, as reported to watchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum IdeaChange {
    Created { id: IdeaId },
    Modified { id: IdeaId, version: u32 },
    Deleted { id: IdeaId },
}

impl IdeaChange {
    pub fn idea_id(&self) -> IdeaId {
        match self {
            Self::Created { id } | Self::Modified { id, .. } | Self::Deleted { id } => *id,
        }
    }
}
