//! Visitor feeding idea and post text into a [`WordCounter`].

use std::collections::HashSet;

use agora_core::config::WordWeights;
use agora_core::errors::AgoraResult;
use agora_core::models::Idea;
use agora_core::traits::IGraphReader;
use agora_graph::{ClosureResolver, IdeaVisitor, VisitOutcome};
use tracing::debug;

use super::counter::WordCounter;
use super::text::clean_text;

/// Counts titles and definitions of every visited idea. The posts related
/// to the starting idea (level 0) are counted once: each body, plus each
/// distinct subject.
pub struct WordCountVisitor<'r> {
    reader: &'r dyn IGraphReader,
    resolver: &'r dyn ClosureResolver,
    weights: WordWeights,
    counter: WordCounter,
}

impl<'r> WordCountVisitor<'r> {
    pub fn new(
        reader: &'r dyn IGraphReader,
        resolver: &'r dyn ClosureResolver,
        weights: WordWeights,
        counter: WordCounter,
    ) -> Self {
        Self {
            reader,
            resolver,
            weights,
            counter,
        }
    }

    pub fn counter(&self) -> &WordCounter {
        &self.counter
    }

    pub fn into_counter(self) -> WordCounter {
        self.counter
    }

    pub fn best(&self, n: usize) -> Vec<String> {
        self.counter.best(n)
    }

    fn count_related_posts(&mut self, idea: &Idea) -> AgoraResult<()> {
        let subtree: Vec<_> = self
            .resolver
            .descendants(self.reader, idea.id, true)?
            .into_iter()
            .collect();
        let post_ids = self.reader.related_post_ids(idea.discussion_id, &subtree)?;
        let posts = self.reader.get_posts(&post_ids)?;
        debug!(idea = idea.id, posts = posts.len(), "counting related post text");

        let mut subjects = HashSet::new();
        for post in &posts {
            if let Some(body) = &post.body {
                self.counter.add_text(body, self.weights.post_body);
            }
            if let Some(subject) = &post.subject {
                let cleaned = clean_text(subject);
                if !cleaned.is_empty() && subjects.insert(cleaned.clone()) {
                    self.counter.add_text(&cleaned, self.weights.post_subject);
                }
            }
        }
        Ok(())
    }
}

impl IdeaVisitor for WordCountVisitor<'_> {
    type Output = ();

    fn visit_idea(
        &mut self,
        idea: &Idea,
        level: usize,
        _prev: Option<&()>,
    ) -> AgoraResult<VisitOutcome<()>> {
        if let Some(title) = &idea.short_title {
            self.counter.add_text(title, self.weights.short_title);
        }
        if let Some(title) = &idea.long_title {
            self.counter.add_text(title, self.weights.long_title);
        }
        if let Some(definition) = &idea.definition {
            self.counter.add_text(definition, self.weights.definition);
        }
        if level == 0 {
            self.count_related_posts(idea)?;
        }
        Ok(VisitOutcome::Continue(()))
    }
}
