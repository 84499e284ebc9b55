//! [`IGraphReader`] over one connection inside an open read transaction.

use std::collections::BTreeSet;

use rusqlite::Connection;

use agora_core::errors::AgoraResult;
use agora_core::models::{
    AgentId, ContributorStats, Discussion, DiscussionId, Idea, IdeaId, IdeaLink, IdeaLinkId,
    LinkDirection, Post, PostCounts, PostId,
};
use agora_core::traits::IGraphReader;

use super::{analytics_ops, closure, discussion_ops, idea_ops, link_ops, post_ops};

/// Reader bound to a connection for the lifetime of a snapshot.
pub struct SnapshotReader<'c> {
    conn: &'c Connection,
}

impl<'c> SnapshotReader<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl IGraphReader for SnapshotReader<'_> {
    fn get_discussion(&self, id: DiscussionId) -> AgoraResult<Option<Discussion>> {
        discussion_ops::get_discussion(self.conn, id)
    }

    fn get_idea(&self, id: IdeaId) -> AgoraResult<Option<Idea>> {
        idea_ops::get_idea(self.conn, id)
    }

    fn root_idea(&self, discussion_id: DiscussionId) -> AgoraResult<Option<Idea>> {
        idea_ops::root_idea(self.conn, discussion_id)
    }

    fn get_link(&self, id: IdeaLinkId) -> AgoraResult<Option<IdeaLink>> {
        link_ops::get_link(self.conn, id)
    }

    fn get_children(&self, idea_id: IdeaId) -> AgoraResult<Vec<Idea>> {
        idea_ops::get_children(self.conn, idea_id)
    }

    fn get_parents(&self, idea_id: IdeaId) -> AgoraResult<Vec<Idea>> {
        idea_ops::get_parents(self.conn, idea_id)
    }

    fn num_children(&self, idea_id: IdeaId) -> AgoraResult<usize> {
        idea_ops::num_children(self.conn, idea_id)
    }

    fn first_parent_link(&self, idea_id: IdeaId) -> AgoraResult<Option<IdeaLink>> {
        link_ops::first_parent_link(self.conn, idea_id)
    }

    fn live_neighbor_ids(
        &self,
        ids: &[IdeaId],
        direction: LinkDirection,
    ) -> AgoraResult<BTreeSet<IdeaId>> {
        link_ops::live_neighbor_ids(self.conn, ids, direction)
    }

    fn closure_ids(
        &self,
        root: IdeaId,
        direction: LinkDirection,
        inclusive: bool,
    ) -> AgoraResult<BTreeSet<IdeaId>> {
        closure::closure_ids(self.conn, root, direction, inclusive)
    }

    fn discussion_ideas(&self, discussion_id: DiscussionId) -> AgoraResult<Vec<Idea>> {
        idea_ops::discussion_ideas(self.conn, discussion_id)
    }

    fn discussion_links(&self, discussion_id: DiscussionId) -> AgoraResult<Vec<IdeaLink>> {
        link_ops::discussion_links(self.conn, discussion_id)
    }

    fn get_post(&self, id: PostId) -> AgoraResult<Option<Post>> {
        post_ops::get_post(self.conn, id)
    }

    fn get_posts(&self, ids: &[PostId]) -> AgoraResult<Vec<Post>> {
        post_ops::get_posts(self.conn, ids)
    }

    fn related_post_ids(
        &self,
        discussion_id: DiscussionId,
        idea_ids: &[IdeaId],
    ) -> AgoraResult<Vec<PostId>> {
        analytics_ops::related_post_ids(self.conn, discussion_id, idea_ids)
    }

    fn related_post_counts(
        &self,
        discussion_id: DiscussionId,
        idea_ids: &[IdeaId],
        user: Option<AgentId>,
    ) -> AgoraResult<PostCounts> {
        analytics_ops::related_post_counts(self.conn, discussion_id, idea_ids, user)
    }

    fn discussion_post_count(&self, discussion_id: DiscussionId) -> AgoraResult<usize> {
        analytics_ops::discussion_post_count(self.conn, discussion_id)
    }

    fn orphan_post_ids(&self, discussion_id: DiscussionId) -> AgoraResult<Vec<PostId>> {
        analytics_ops::orphan_post_ids(self.conn, discussion_id)
    }

    fn synthesis_post_count(&self, discussion_id: DiscussionId) -> AgoraResult<usize> {
        analytics_ops::synthesis_post_count(self.conn, discussion_id)
    }

    fn contributor_stats(
        &self,
        discussion_id: DiscussionId,
        idea_ids: &[IdeaId],
    ) -> AgoraResult<Vec<ContributorStats>> {
        analytics_ops::contributor_stats(self.conn, discussion_id, idea_ids)
    }

    fn important_extract_stats(&self, idea_ids: &[IdeaId]) -> AgoraResult<Vec<ContributorStats>> {
        analytics_ops::important_extract_stats(self.conn, idea_ids)
    }

    fn ideas_linked_to_thread(&self, post_id: PostId) -> AgoraResult<BTreeSet<IdeaId>> {
        analytics_ops::ideas_linked_to_thread(self.conn, post_id)
    }
}
