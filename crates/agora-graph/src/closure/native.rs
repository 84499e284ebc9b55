use std::collections::BTreeSet;

use agora_core::config::ClosureStrategy;
use agora_core::errors::{AgoraResult, GraphError};
use agora_core::models::{IdeaId, LinkDirection};
use agora_core::traits::IGraphReader;
use agora_observability::closure_span;

use super::ClosureResolver;

/// Delegates to the store's recursive query, one root per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeClosure;

impl ClosureResolver for NativeClosure {
    fn strategy(&self) -> ClosureStrategy {
        ClosureStrategy::Native
    }

    fn descendants(
        &self,
        reader: &dyn IGraphReader,
        root: IdeaId,
        inclusive: bool,
    ) -> AgoraResult<BTreeSet<IdeaId>> {
        let span = closure_span!(LinkDirection::Forward, self.strategy().as_str());
        let _entered = span.enter();
        reader.closure_ids(root, LinkDirection::Forward, inclusive)
    }

    fn ancestors(
        &self,
        reader: &dyn IGraphReader,
        targets: &[IdeaId],
        inclusive: bool,
    ) -> AgoraResult<BTreeSet<IdeaId>> {
        let span = closure_span!(LinkDirection::Backward, self.strategy().as_str());
        let _entered = span.enter();
        match targets {
            [] => Ok(BTreeSet::new()),
            [target] => reader.closure_ids(*target, LinkDirection::Backward, inclusive),
            _ => Err(GraphError::unsupported(
                "ancestors",
                format!(
                    "native closure resolves one target at a time, got {}",
                    targets.len()
                ),
            )
            .into()),
        }
    }

    fn supports_multi_root(&self) -> bool {
        false
    }
}
