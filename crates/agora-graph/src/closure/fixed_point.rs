use std::collections::BTreeSet;

use tracing::debug;

use agora_core::config::ClosureStrategy;
use agora_core::errors::AgoraResult;
use agora_core::models::{IdeaId, LinkDirection};
use agora_core::traits::IGraphReader;
use agora_observability::closure_span;

use super::ClosureResolver;

/// Frontier expansion: seed with the direct neighbours of the roots, then
/// union in newly reached live neighbours until the set stops growing.
///
/// Each round is one batched neighbour query, so the number of queries is
/// bounded by the longest shortest path from the roots.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPointClosure;

impl FixedPointClosure {
    fn expand(
        &self,
        reader: &dyn IGraphReader,
        roots: &[IdeaId],
        direction: LinkDirection,
        inclusive: bool,
    ) -> AgoraResult<BTreeSet<IdeaId>> {
        let span = closure_span!(direction, self.strategy().as_str());
        let _entered = span.enter();

        let mut reached = BTreeSet::new();
        let mut frontier: Vec<IdeaId> = roots.to_vec();
        let mut rounds = 0usize;
        while !frontier.is_empty() {
            rounds += 1;
            let next = reader.live_neighbor_ids(&frontier, direction)?;
            frontier = next
                .into_iter()
                .filter(|id| reached.insert(*id))
                .collect();
        }
        if inclusive {
            reached.extend(roots.iter().copied());
        }
        debug!(
            roots = roots.len(),
            rounds,
            size = reached.len(),
            "fixed-point closure"
        );
        Ok(reached)
    }
}

impl ClosureResolver for FixedPointClosure {
    fn strategy(&self) -> ClosureStrategy {
        ClosureStrategy::FixedPoint
    }

    fn descendants(
        &self,
        reader: &dyn IGraphReader,
        root: IdeaId,
        inclusive: bool,
    ) -> AgoraResult<BTreeSet<IdeaId>> {
        self.expand(reader, &[root], LinkDirection::Forward, inclusive)
    }

    fn ancestors(
        &self,
        reader: &dyn IGraphReader,
        targets: &[IdeaId],
        inclusive: bool,
    ) -> AgoraResult<BTreeSet<IdeaId>> {
        self.expand(reader, targets, LinkDirection::Backward, inclusive)
    }

    fn supports_multi_root(&self) -> bool {
        true
    }
}
