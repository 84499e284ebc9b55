use serde::{Deserialize, Serialize};

use super::AgentId;

/// Total and read post counts taken from a single query execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCounts {
    pub total: usize,
    pub read: usize,
}

/// Per-author aggregate under an idea subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStats {
    pub agent_id: AgentId,
    /// Distinct pivot posts (or extracts, for synthesis contributors).
    pub pivot_count: usize,
    /// Distinct posts authored under the subtree.
    pub post_count: usize,
    /// Smallest post id contributed: the insertion-order tie-break key.
    pub first_post_id: i64,
}
