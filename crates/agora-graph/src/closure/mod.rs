//! Ancestor/descendant resolution.
//!
//! Both strategies return the same deduplicated set on any graph, cycles
//! included. Only the fixed-point strategy resolves ancestors of several
//! targets at once.

mod fixed_point;
mod native;

use std::collections::BTreeSet;

use agora_core::config::{ClosureStrategy, GraphConfig};
use agora_core::errors::AgoraResult;
use agora_core::models::IdeaId;
use agora_core::traits::IGraphReader;

pub use fixed_point::FixedPointClosure;
pub use native::NativeClosure;

/// Transitive closure over live links, excluding tombstoned ideas.
pub trait ClosureResolver: Send + Sync {
    fn strategy(&self) -> ClosureStrategy;

    /// Ideas reachable from `root` along outbound links. `inclusive` adds
    /// `root` unconditionally.
    fn descendants(
        &self,
        reader: &dyn IGraphReader,
        root: IdeaId,
        inclusive: bool,
    ) -> AgoraResult<BTreeSet<IdeaId>>;

    /// Ideas from which any of `targets` is reachable. `inclusive` adds the
    /// targets unconditionally.
    fn ancestors(
        &self,
        reader: &dyn IGraphReader,
        targets: &[IdeaId],
        inclusive: bool,
    ) -> AgoraResult<BTreeSet<IdeaId>>;

    /// Whether [`ancestors`](Self::ancestors) accepts more than one target.
    fn supports_multi_root(&self) -> bool;
}

/// The resolver selected by `config.closure_strategy`.
pub fn resolver_for(config: &GraphConfig) -> Box<dyn ClosureResolver> {
    match config.closure_strategy {
        ClosureStrategy::Native => Box::new(NativeClosure),
        ClosureStrategy::FixedPoint => Box::new(FixedPointClosure),
    }
}
