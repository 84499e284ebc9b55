//! IdeaGraph: closures, adjacency and visitor walks, each call running
//! inside one read snapshot of the store.

use std::collections::{BTreeSet, HashSet};

use agora_core::config::GraphConfig;
use agora_core::errors::AgoraResult;
use agora_core::models::{Idea, IdeaId};
use agora_core::traits::{read_snapshot, IGraphReader, IIdeaStorage};

use crate::closure::{resolver_for, ClosureResolver};
use crate::traversal::{visit_ideas, IdeaVisitor, TraversalOrder};

pub struct IdeaGraph<'a> {
    storage: &'a dyn IIdeaStorage,
    resolver: Box<dyn ClosureResolver>,
}

impl<'a> IdeaGraph<'a> {
    pub fn new(storage: &'a dyn IIdeaStorage, config: &GraphConfig) -> Self {
        Self {
            storage,
            resolver: resolver_for(config),
        }
    }

    /// Use a specific resolver instead of the configured one.
    pub fn with_resolver(storage: &'a dyn IIdeaStorage, resolver: Box<dyn ClosureResolver>) -> Self {
        Self { storage, resolver }
    }

    pub fn resolver(&self) -> &dyn ClosureResolver {
        self.resolver.as_ref()
    }

    pub fn descendants(&self, root: IdeaId, inclusive: bool) -> AgoraResult<BTreeSet<IdeaId>> {
        read_snapshot(self.storage, |reader| {
            self.resolver.descendants(reader, root, inclusive)
        })
    }

    pub fn ancestors(&self, targets: &[IdeaId], inclusive: bool) -> AgoraResult<BTreeSet<IdeaId>> {
        read_snapshot(self.storage, |reader| {
            self.resolver.ancestors(reader, targets, inclusive)
        })
    }

    pub fn children(&self, id: IdeaId) -> AgoraResult<Vec<Idea>> {
        read_snapshot(self.storage, |reader| reader.get_children(id))
    }

    pub fn parents(&self, id: IdeaId) -> AgoraResult<Vec<Idea>> {
        read_snapshot(self.storage, |reader| reader.get_parents(id))
    }

    /// Distinct live children of the idea's parents, the idea excluded.
    /// Ordered by parent, then by each parent's child order.
    pub fn get_siblings(&self, id: IdeaId) -> AgoraResult<Vec<Idea>> {
        read_snapshot(self.storage, |reader| siblings(reader, id))
    }

    /// Walk the subtree under `root` with `visitor`.
    pub fn visit<V: IdeaVisitor>(
        &self,
        root: IdeaId,
        order: TraversalOrder,
        visitor: &mut V,
    ) -> AgoraResult<Option<V::Output>> {
        read_snapshot(self.storage, |reader| {
            visit_ideas(reader, root, order, visitor)
        })
    }
}

fn siblings(reader: &dyn IGraphReader, id: IdeaId) -> AgoraResult<Vec<Idea>> {
    let mut seen = HashSet::from([id]);
    let mut out = Vec::new();
    for parent in reader.get_parents(id)? {
        for child in reader.get_children(parent.id)? {
            if seen.insert(child.id) {
                out.push(child);
            }
        }
    }
    Ok(out)
}
