//! Weighted word frequencies over idea subtrees.

mod counter;
mod stopwords;
pub mod text;
mod visitor;

pub use counter::WordCounter;
pub use stopwords::{is_stop_word, stop_words};
pub use visitor::WordCountVisitor;
