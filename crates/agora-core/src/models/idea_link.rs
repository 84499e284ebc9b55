use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IdeaId, IdeaLinkId};
use crate::constants::INCLUSION_LINK_TYPE;

/// A directed, ordered edge. The source is the parent, the target the child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaLink {
    pub id: IdeaLinkId,
    pub source_id: IdeaId,
    pub target_id: IdeaId,
    /// Sort key among the source's children.
    pub order: f64,
    pub link_type: String,
    pub creation_date: DateTime<Utc>,
    pub tombstone_date: Option<DateTime<Utc>>,
}

impl IdeaLink {
    pub fn is_tombstone(&self) -> bool {
        self.tombstone_date.is_some()
    }
}

/// Input for creating a link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIdeaLink {
    pub source_id: IdeaId,
    pub target_id: IdeaId,
    #[serde(default)]
    pub order: f64,
    #[serde(default = "default_link_type")]
    pub link_type: String,
}

fn default_link_type() -> String {
    INCLUSION_LINK_TYPE.to_string()
}

impl NewIdeaLink {
    pub fn new(source_id: IdeaId, target_id: IdeaId, order: f64) -> Self {
        Self {
            source_id,
            target_id,
            order,
            link_type: default_link_type(),
        }
    }
}

/// Which way to follow links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkDirection {
    /// source → target (towards descendants).
    Forward,
    /// target → source (towards ancestors).
    Backward,
}
