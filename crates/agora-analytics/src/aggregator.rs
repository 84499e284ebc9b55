//! ContentAggregator: post counts, read counts, orphans and contributor
//! rankings over idea subtrees. Every operation runs inside one read
//! snapshot of the store.

use std::collections::BTreeSet;

use agora_core::config::{AgoraConfig, AnalyticsConfig, GraphConfig};
use agora_core::errors::AgoraResult;
use agora_core::models::{AgentId, DiscussionId, Idea, IdeaId, PostCounts, PostId};
use agora_core::traits::{read_snapshot, IGraphReader, IIdeaStorage};
use agora_graph::{resolver_for, visit_ideas, ClosureResolver, TraversalOrder};
use agora_observability::aggregation_span;
use tracing::debug;

use crate::contributors::{rank_contributors, rank_synthesis_contributors};
use crate::preview;
use crate::words::{WordCountVisitor, WordCounter};

pub struct ContentAggregator<'a> {
    storage: &'a dyn IIdeaStorage,
    resolver: Box<dyn ClosureResolver>,
    config: AnalyticsConfig,
}

impl<'a> ContentAggregator<'a> {
    pub fn new(storage: &'a dyn IIdeaStorage, graph: &GraphConfig, config: AnalyticsConfig) -> Self {
        Self::with_resolver(storage, resolver_for(graph), config)
    }

    pub fn from_config(storage: &'a dyn IIdeaStorage, config: &AgoraConfig) -> Self {
        Self::new(storage, &config.graph, config.analytics.clone())
    }

    pub fn with_resolver(
        storage: &'a dyn IIdeaStorage,
        resolver: Box<dyn ClosureResolver>,
        config: AnalyticsConfig,
    ) -> Self {
        Self {
            storage,
            resolver,
            config,
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Posts under the subtree of `root_idea_id`, ascending and distinct.
    pub fn related_posts(
        &self,
        discussion_id: DiscussionId,
        root_idea_id: IdeaId,
    ) -> AgoraResult<Vec<PostId>> {
        let _span = aggregation_span!("related_posts", root_idea_id).entered();
        read_snapshot(self.storage, |reader| {
            let subtree = self.subtree(reader, root_idea_id)?;
            reader.related_post_ids(discussion_id, &subtree)
        })
    }

    pub fn num_posts(&self, idea_id: IdeaId) -> AgoraResult<usize> {
        let _span = aggregation_span!("num_posts", idea_id).entered();
        read_snapshot(self.storage, |reader| {
            Ok(self.counts(reader, idea_id, None)?.total)
        })
    }

    /// Related posts read by `user`; 0 without a user.
    pub fn num_read_posts_for(&self, idea_id: IdeaId, user: Option<AgentId>) -> AgoraResult<usize> {
        let Some(user) = user else {
            return Ok(0);
        };
        let _span = aggregation_span!("num_read_posts_for", idea_id).entered();
        read_snapshot(self.storage, |reader| {
            Ok(self.counts(reader, idea_id, Some(user))?.read)
        })
    }

    pub fn num_total_and_read_posts_for(
        &self,
        idea_id: IdeaId,
        user: Option<AgentId>,
    ) -> AgoraResult<PostCounts> {
        let _span = aggregation_span!("num_total_and_read_posts_for", idea_id).entered();
        read_snapshot(self.storage, |reader| self.counts(reader, idea_id, user))
    }

    /// Eligible posts not reachable from any live idea.
    pub fn orphan_posts(&self, discussion_id: DiscussionId) -> AgoraResult<Vec<PostId>> {
        let _span = aggregation_span!("orphan_posts", discussion_id).entered();
        read_snapshot(self.storage, |reader| reader.orphan_post_ids(discussion_id))
    }

    pub fn num_orphan_posts(&self, discussion_id: DiscussionId) -> AgoraResult<usize> {
        Ok(self.orphan_posts(discussion_id)?.len())
    }

    pub fn num_synthesis_posts(&self, discussion_id: DiscussionId) -> AgoraResult<usize> {
        let _span = aggregation_span!("num_synthesis_posts", discussion_id).entered();
        read_snapshot(self.storage, |reader| reader.synthesis_post_count(discussion_id))
    }

    /// Authors of the subtree's posts, most pivotal first.
    pub fn contributors(&self, idea_id: IdeaId) -> AgoraResult<Vec<AgentId>> {
        let _span = aggregation_span!("contributors", idea_id).entered();
        let stats = read_snapshot(self.storage, |reader| {
            let Some(idea) = live_idea(reader, idea_id)? else {
                return Ok(Vec::new());
            };
            let subtree = self.subtree(reader, idea.id)?;
            reader.contributor_stats(idea.discussion_id, &subtree)
        })?;
        Ok(rank_contributors(stats, self.config.tie_break))
    }

    /// Authors of posts behind important extracts inside the subtree.
    pub fn synthesis_contributors(&self, idea_id: IdeaId) -> AgoraResult<Vec<AgentId>> {
        let _span = aggregation_span!("synthesis_contributors", idea_id).entered();
        let stats = read_snapshot(self.storage, |reader| {
            if live_idea(reader, idea_id)?.is_none() {
                return Ok(Vec::new());
            }
            let subtree = self.subtree(reader, idea_id)?;
            reader.important_extract_stats(&subtree)
        })?;
        Ok(rank_synthesis_contributors(stats, self.config.tie_break))
    }

    /// Ideas linked to the post's thread, plus all their ancestors.
    pub fn idea_ids_showing_post(&self, post_id: PostId) -> AgoraResult<BTreeSet<IdeaId>> {
        let _span = aggregation_span!("idea_ids_showing_post", post_id).entered();
        read_snapshot(self.storage, |reader| self.showing_post(reader, post_id))
    }

    /// `(idea, read count)` for every idea showing the post.
    pub fn idea_read_counts(
        &self,
        post_id: PostId,
        user: Option<AgentId>,
    ) -> AgoraResult<Vec<(IdeaId, usize)>> {
        let _span = aggregation_span!("idea_read_counts", post_id).entered();
        read_snapshot(self.storage, |reader| {
            let ideas = self.showing_post(reader, post_id)?;
            let mut out = Vec::with_capacity(ideas.len());
            for idea_id in ideas {
                let read = match user {
                    Some(_) => self.counts(reader, idea_id, user)?.read,
                    None => 0,
                };
                out.push((idea_id, read));
            }
            Ok(out)
        })
    }

    /// The `n` heaviest words of the subtree's text. Stop words follow
    /// `lang`, else the discussion's locales, else the configured defaults.
    pub fn most_common_words(
        &self,
        idea_id: IdeaId,
        lang: Option<&str>,
        n: Option<usize>,
    ) -> AgoraResult<Vec<String>> {
        let _span = aggregation_span!("most_common_words", idea_id).entered();
        let n = n.unwrap_or(self.config.default_word_count);
        read_snapshot(self.storage, |reader| {
            let Some(idea) = live_idea(reader, idea_id)? else {
                return Ok(Vec::new());
            };
            let locales = match lang {
                Some(lang) => vec![lang.to_string()],
                None => self.discussion_locales(reader, idea.discussion_id)?,
            };
            let counter = WordCounter::new(locales, self.config.min_word_length);
            let mut visitor = WordCountVisitor::new(
                reader,
                self.resolver.as_ref(),
                self.config.word_weights.clone(),
                counter,
            );
            visit_ideas(reader, idea.id, TraversalOrder::DepthFirst, &mut visitor)?;
            Ok(visitor.best(n))
        })
    }

    /// Plain-text preview of the idea's definition.
    pub fn definition_preview(&self, idea_id: IdeaId) -> AgoraResult<Option<String>> {
        read_snapshot(self.storage, |reader| {
            Ok(live_idea(reader, idea_id)?
                .and_then(|idea| idea.definition)
                .map(|definition| preview::definition_preview(&definition)))
        })
    }

    fn subtree(&self, reader: &dyn IGraphReader, root: IdeaId) -> AgoraResult<Vec<IdeaId>> {
        Ok(self
            .resolver
            .descendants(reader, root, true)?
            .into_iter()
            .collect())
    }

    fn counts(
        &self,
        reader: &dyn IGraphReader,
        idea_id: IdeaId,
        user: Option<AgentId>,
    ) -> AgoraResult<PostCounts> {
        let Some(idea) = live_idea(reader, idea_id)? else {
            return Ok(PostCounts::default());
        };
        let subtree = self.subtree(reader, idea.id)?;
        let related = reader.related_post_counts(idea.discussion_id, &subtree, user)?;
        if idea.is_root() {
            // The root's total also covers orphans; reads stay graph-bound.
            let total = reader.discussion_post_count(idea.discussion_id)?;
            return Ok(PostCounts { total, read: related.read });
        }
        Ok(related)
    }

    fn showing_post(
        &self,
        reader: &dyn IGraphReader,
        post_id: PostId,
    ) -> AgoraResult<BTreeSet<IdeaId>> {
        let linked: Vec<IdeaId> = reader.ideas_linked_to_thread(post_id)?.into_iter().collect();
        if linked.is_empty() {
            return Ok(BTreeSet::new());
        }
        if self.resolver.supports_multi_root() {
            return self.resolver.ancestors(reader, &linked, true);
        }
        let mut out = BTreeSet::new();
        for id in linked {
            out.extend(self.resolver.ancestors(reader, &[id], true)?);
        }
        debug!(post = post_id, ideas = out.len(), "resolved ideas per linked idea");
        Ok(out)
    }

    fn discussion_locales(
        &self,
        reader: &dyn IGraphReader,
        discussion_id: DiscussionId,
    ) -> AgoraResult<Vec<String>> {
        let declared = reader
            .get_discussion(discussion_id)?
            .map(|d| d.locales)
            .unwrap_or_default();
        if declared.is_empty() {
            Ok(self.config.default_locales.clone())
        } else {
            Ok(declared)
        }
    }
}

fn live_idea(reader: &dyn IGraphReader, id: IdeaId) -> AgoraResult<Option<Idea>> {
    Ok(reader.get_idea(id)?.filter(Idea::is_live))
}
