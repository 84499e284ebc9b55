use std::collections::BTreeSet;

use crate::errors::AgoraResult;
use crate::models::{
    AgentId, ContributorStats, Discussion, DiscussionId, Idea, IdeaId, IdeaLink, IdeaLinkId,
    LinkDirection, Post, PostCounts, PostId,
};

/// Read-only view of the idea graph and its content, bound to one snapshot.
///
/// Every method filters tombstoned rows except the point lookups
/// (`get_idea`, `get_link`), which return them so callers can tell
/// "deleted" from "never existed".
pub trait IGraphReader {
    // --- Discussions & ideas ---
    fn get_discussion(&self, id: DiscussionId) -> AgoraResult<Option<Discussion>>;
    fn get_idea(&self, id: IdeaId) -> AgoraResult<Option<Idea>>;
    fn root_idea(&self, discussion_id: DiscussionId) -> AgoraResult<Option<Idea>>;
    fn get_link(&self, id: IdeaLinkId) -> AgoraResult<Option<IdeaLink>>;

    // --- Adjacency ---
    /// Live targets of live outbound links, by link order then link id.
    /// One entry per link.
    fn get_children(&self, idea_id: IdeaId) -> AgoraResult<Vec<Idea>>;
    /// Live sources of live inbound links, by link id.
    fn get_parents(&self, idea_id: IdeaId) -> AgoraResult<Vec<Idea>>;
    fn num_children(&self, idea_id: IdeaId) -> AgoraResult<usize>;
    /// Earliest live inbound link.
    fn first_parent_link(&self, idea_id: IdeaId) -> AgoraResult<Option<IdeaLink>>;
    /// One frontier expansion: live ideas one live link away from any of `ids`.
    fn live_neighbor_ids(
        &self,
        ids: &[IdeaId],
        direction: LinkDirection,
    ) -> AgoraResult<BTreeSet<IdeaId>>;
    /// Transitive closure computed by the store in a single recursive query.
    fn closure_ids(
        &self,
        root: IdeaId,
        direction: LinkDirection,
        inclusive: bool,
    ) -> AgoraResult<BTreeSet<IdeaId>>;

    // --- Bulk prefetch ---
    fn discussion_ideas(&self, discussion_id: DiscussionId) -> AgoraResult<Vec<Idea>>;
    fn discussion_links(&self, discussion_id: DiscussionId) -> AgoraResult<Vec<IdeaLink>>;

    // --- Content ---
    fn get_post(&self, id: PostId) -> AgoraResult<Option<Post>>;
    /// Posts with the given ids, ascending by id. Unknown ids are skipped.
    fn get_posts(&self, ids: &[PostId]) -> AgoraResult<Vec<Post>>;
    /// Non-hidden posts of `discussion_id` in the reply subtree of any post
    /// positively linked to a live, non-hidden idea in `idea_ids`.
    /// Ascending, distinct.
    fn related_post_ids(
        &self,
        discussion_id: DiscussionId,
        idea_ids: &[IdeaId],
    ) -> AgoraResult<Vec<PostId>>;
    /// Total and read counts of `related_post_ids` from one statement.
    fn related_post_counts(
        &self,
        discussion_id: DiscussionId,
        idea_ids: &[IdeaId],
        user: Option<AgentId>,
    ) -> AgoraResult<PostCounts>;
    /// Non-hidden posts of the discussion.
    fn discussion_post_count(&self, discussion_id: DiscussionId) -> AgoraResult<usize>;
    /// Non-synthesis, non-hidden posts not under any live, non-hidden idea.
    fn orphan_post_ids(&self, discussion_id: DiscussionId) -> AgoraResult<Vec<PostId>>;
    fn synthesis_post_count(&self, discussion_id: DiscussionId) -> AgoraResult<usize>;
    /// Per-author pivot and post counts over `related_post_ids`. Unordered.
    fn contributor_stats(
        &self,
        discussion_id: DiscussionId,
        idea_ids: &[IdeaId],
    ) -> AgoraResult<Vec<ContributorStats>>;
    /// Per-author counts of important extracts attached to `idea_ids`. Unordered.
    fn important_extract_stats(&self, idea_ids: &[IdeaId]) -> AgoraResult<Vec<ContributorStats>>;
    /// Live ideas positively linked to `post_id` or to any post above it.
    fn ideas_linked_to_thread(&self, post_id: PostId) -> AgoraResult<BTreeSet<IdeaId>>;
}
