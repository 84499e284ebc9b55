//! # agora-graph
//!
//! Resolution over the idea graph of one discussion.
//!
//! - [`closure`]: ancestor/descendant sets, computed natively by the store
//!   or by fixed-point frontier expansion.
//! - [`traversal`]: depth-first and breadth-first walks driving an
//!   [`IdeaVisitor`] over a [`GraphSnapshot`].
//! - [`IdeaGraph`]: both, run inside one read snapshot per call.

pub mod closure;
pub mod idea_graph;
pub mod snapshot;
pub mod traversal;

pub use closure::{resolver_for, ClosureResolver, FixedPointClosure, NativeClosure};
pub use idea_graph::IdeaGraph;
pub use snapshot::{GraphSnapshot, LinkWeight};
pub use traversal::{visit_ideas, IdeaVisitor, TraversalOrder, VisitOutcome};
