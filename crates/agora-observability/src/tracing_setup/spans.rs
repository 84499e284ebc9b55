//! Span definitions per operation: closure, traversal, aggregation, cascade.

/// Create a closure-resolution span.
#[macro_export]
macro_rules! closure_span {
    ($direction:expr, $strategy:expr) => {
        tracing::debug_span!("agora.closure", direction = ?$direction, strategy = %$strategy)
    };
}

/// Create a traversal span.
#[macro_export]
macro_rules! traversal_span {
    ($root:expr, $order:expr) => {
        tracing::debug_span!("agora.traversal", root = $root, order = %$order)
    };
}

/// Create an aggregation span.
#[macro_export]
macro_rules! aggregation_span {
    ($operation:expr, $idea:expr) => {
        tracing::debug_span!("agora.aggregation", operation = %$operation, idea = $idea)
    };
}

/// Create a tombstone-cascade span.
#[macro_export]
macro_rules! cascade_span {
    ($idea:expr) => {
        tracing::info_span!("agora.cascade", idea = $idea)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const CLOSURE: &str = "agora.closure";
    pub const TRAVERSAL: &str = "agora.traversal";
    pub const AGGREGATION: &str = "agora.aggregation";
    pub const CASCADE: &str = "agora.cascade";
}
