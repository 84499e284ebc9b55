//! # agora-analytics
//!
//! Aggregation over idea subtrees.
//!
//! [`ContentAggregator`] answers post counts, read counts, orphan posts and
//! contributor rankings; the [`words`] module summarizes a subtree's text.

pub mod aggregator;
pub mod contributors;
pub mod preview;
pub mod words;

pub use aggregator::ContentAggregator;
pub use contributors::{rank_contributors, rank_synthesis_contributors};
pub use preview::definition_preview;
pub use words::{WordCountVisitor, WordCounter};
